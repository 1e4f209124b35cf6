//! 推送渠道适配器
//!
//! 封装第三方推送网关的出站调用。适配器只返回推送回执，从不向上抛错：
//! 推送失败绝不能阻断通知落库或请求响应，这是子系统的核心失败策略。

mod expo;

pub use expo::ExpoPushClient;

use async_trait::async_trait;

use crate::models::PushReceipt;

/// Expo 推送 token 的两个合法命名空间前缀
const TOKEN_PREFIXES: [&str; 2] = ["ExponentPushToken[", "ExpoPushToken["];

/// 校验设备 token 是否落在推送服务商的 token 命名空间内
///
/// 不匹配的 token 在本地拒绝，不产生网络调用。
pub fn is_recognized_token(token: &str) -> bool {
    TOKEN_PREFIXES
        .iter()
        .any(|prefix| token.starts_with(prefix))
        && token.ends_with(']')
}

/// 推送发送器 trait
///
/// 实现必须把一切传输、构造与服务端错误折叠进回执的失败分支，
/// 调用方（扇出编排器）据此聚合统计，不做错误分支处理。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PushSender: Send + Sync {
    /// 向单个设备 token 发送一条推送，返回该次尝试的回执
    async fn send(&self, token: &str, title: &str, body: &str) -> PushReceipt;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_token_prefixes() {
        assert!(is_recognized_token("ExponentPushToken[abc123]"));
        assert!(is_recognized_token("ExpoPushToken[abc123]"));
    }

    #[test]
    fn test_unrecognized_tokens() {
        assert!(!is_recognized_token("xyz"));
        assert!(!is_recognized_token(""));
        assert!(!is_recognized_token("FcmToken[abc]"));
        assert!(!is_recognized_token("exponentpushtoken[abc]"));
        // 前缀正确但未闭合
        assert!(!is_recognized_token("ExponentPushToken[abc"));
    }
}
