//! 领域模型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 广播哨兵值，recipient 字段匹配该字面量（不区分大小写）时表示发给全员
pub const BROADCAST_SENTINEL: &str = "All";

/// 通知接收者
///
/// 请求中的 recipient 字段要么是具体用户 id 的十进制文本，
/// 要么是广播哨兵值 "All"。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientSpec {
    /// 发给发送时刻存在的全部用户
    Broadcast,
    /// 发给单个用户
    User(i64),
}

impl RecipientSpec {
    /// 从请求字符串解析
    ///
    /// 广播哨兵值不区分大小写；其余内容必须是合法的用户 id。
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.eq_ignore_ascii_case(BROADCAST_SENTINEL) {
            return Some(Self::Broadcast);
        }
        trimmed.parse::<i64>().ok().map(Self::User)
    }

    /// 是否为广播
    pub fn is_broadcast(&self) -> bool {
        matches!(self, Self::Broadcast)
    }

    /// 存库/回显用的文本形式
    pub fn as_db_value(&self) -> String {
        match self {
            Self::Broadcast => BROADCAST_SENTINEL.to_string(),
            Self::User(id) => id.to_string(),
        }
    }
}

impl std::fmt::Display for RecipientSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_db_value())
    }
}

/// 通知主记录
#[derive(Debug, Clone, FromRow)]
pub struct Notification {
    pub id: i64,
    pub recipient: String,
    pub title: String,
    pub message: String,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: DateTime<Utc>,
}

/// 用户视角的通知行（已合并自身已读状态）
#[derive(Debug, Clone, FromRow)]
pub struct UserNotificationRow {
    pub notification_id: i64,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

/// 推送目标：一个具体用户与其可能缺失的设备 token
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct PushTarget {
    pub user_id: i64,
    pub expo_push_token: Option<String>,
}

impl PushTarget {
    /// token 是否存在且非空
    pub fn has_token(&self) -> bool {
        self.expo_push_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }
}

/// 单次推送尝试的结果，仅用于聚合响应，不落库
#[derive(Debug, Clone)]
pub struct PushReceipt {
    pub token: String,
    pub success: bool,
    pub error: Option<String>,
}

impl PushReceipt {
    pub fn success(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            success: true,
            error: None,
        }
    }

    pub fn failed(token: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            success: false,
            error: Some(error.into()),
        }
    }
}

/// 投递统计
///
/// attempted = 持有 token（无论格式是否合法）的目标数，
/// successful + failed 恒等于 attempted。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStats {
    pub attempted: u32,
    pub successful: u32,
    pub failed: u32,
}

impl DeliveryStats {
    /// 由推送回执聚合统计
    pub fn from_receipts(receipts: &[PushReceipt]) -> Self {
        let attempted = receipts.len() as u32;
        let successful = receipts.iter().filter(|r| r.success).count() as u32;
        Self {
            attempted,
            successful,
            failed: attempted - successful,
        }
    }
}
