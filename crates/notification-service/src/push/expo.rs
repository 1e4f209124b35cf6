//! Expo 推送网关客户端
//!
//! 每个 token 发起一次独立的出站 HTTP 调用，不做批量合并。
//! 接收者规模是俱乐部级而非海量用户，简单性优先于吞吐。

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use club_shared::config::PushConfig;

use super::{is_recognized_token, PushSender};
use crate::models::PushReceipt;

/// Expo 推送网关客户端
pub struct ExpoPushClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ExpoPushClient {
    /// 按配置构造客户端
    ///
    /// 单次请求超时由 reqwest 客户端统一约束，保证单个无响应的
    /// 网关调用不会拖住整批扇出的汇聚点。
    pub fn new(config: &PushConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_default();

        Self {
            http,
            endpoint: config.endpoint.clone(),
        }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(&PushConfig::default())
    }
}

#[async_trait]
impl PushSender for ExpoPushClient {
    async fn send(&self, token: &str, title: &str, body: &str) -> PushReceipt {
        // 空 token 视为无事可做：记失败但不报错，不发起网络调用
        if token.trim().is_empty() {
            debug!("设备 token 为空，跳过推送");
            return PushReceipt::failed(token, "设备 token 为空");
        }

        // 命名空间校验失败的 token 本地拒绝，不发起网络调用
        if !is_recognized_token(token) {
            warn!(token = %token, "设备 token 不在推送服务商命名空间内，本地拒绝");
            return PushReceipt::failed(token, "设备 token 格式不合法");
        }

        let payload = json!({
            "to": token,
            "sound": "default",
            "title": title,
            "body": body,
            "data": { "title": title, "message": body },
            "priority": "high",
            "channelId": "default",
            "badge": 1,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                debug!(token = %token, "推送网关调用成功");
                PushReceipt::success(token)
            }
            Ok(resp) => {
                // 网关返回了非 2xx 响应
                let status = resp.status();
                let detail = resp.text().await.unwrap_or_default();
                warn!(token = %token, status = %status, detail = %detail, "推送网关返回错误响应");
                PushReceipt::failed(token, format!("推送网关返回 {}", status))
            }
            Err(e) if e.is_builder() => {
                // 请求构造失败（如非法 endpoint）
                warn!(token = %token, error = %e, "推送请求构造失败");
                PushReceipt::failed(token, format!("推送请求构造失败: {e}"))
            }
            Err(e) => {
                // 传输层失败：超时、连接拒绝等，网关无响应
                warn!(token = %token, error = %e, "推送网关无响应");
                PushReceipt::failed(token, format!("推送网关无响应: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_token_fails_without_network_call() {
        let client = ExpoPushClient::with_defaults();
        let receipt = client.send("", "标题", "内容").await;

        assert!(!receipt.success);
        assert!(receipt.error.is_some());
    }

    #[tokio::test]
    async fn test_unrecognized_token_rejected_locally() {
        // endpoint 指向不可达地址：若本地拒绝生效，不会产生网络调用，
        // 因此不会出现传输错误的回执文案
        let config = PushConfig {
            endpoint: "http://127.0.0.1:1/unreachable".to_string(),
            timeout_seconds: 1,
        };
        let client = ExpoPushClient::new(&config);

        let receipt = client.send("xyz", "标题", "内容").await;

        assert!(!receipt.success);
        assert_eq!(receipt.error.as_deref(), Some("设备 token 格式不合法"));
    }

    #[tokio::test]
    async fn test_transport_failure_converted_to_failed_receipt() {
        let config = PushConfig {
            endpoint: "http://127.0.0.1:1/unreachable".to_string(),
            timeout_seconds: 1,
        };
        let client = ExpoPushClient::new(&config);

        let receipt = client
            .send("ExponentPushToken[abc]", "标题", "内容")
            .await;

        assert!(!receipt.success);
        assert!(receipt.error.unwrap().contains("推送网关无响应"));
    }
}
