//! 响应体 DTO 定义
//!
//! 所有 REST API 的响应体结构

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{DeliveryStats, UserNotificationRow};
use crate::service::FanoutOutcome;

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（无数据）
    pub fn success_empty() -> ApiResponse<()> {
        ApiResponse {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: None,
        }
    }

    /// 创建成功响应（自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

/// 发送通知成功响应
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: i64,
    pub recipient: String,
    pub title: String,
    pub message: String,
    pub delivery_stats: DeliveryStats,
}

impl From<FanoutOutcome> for NotificationDto {
    fn from(outcome: FanoutOutcome) -> Self {
        Self {
            id: outcome.notification_id,
            recipient: outcome.recipient.as_db_value(),
            title: outcome.title,
            message: outcome.message,
            delivery_stats: outcome.stats,
        }
    }
}

/// 用户视角的通知列表项
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNotificationDto {
    pub notification_id: i64,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub is_read: bool,
}

impl From<UserNotificationRow> for UserNotificationDto {
    fn from(row: UserNotificationRow) -> Self {
        Self {
            notification_id: row.notification_id,
            title: row.title,
            message: row.message,
            created_at: row.created_at,
            is_read: row.is_read,
        }
    }
}
