//! 仓储 Trait 定义

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{PushTarget, RecipientSpec, UserNotificationRow};

/// 用户行的通知子系统视图
///
/// users 表归用户管理模块所有，这里只读取存在性校验、
/// 广播可见性过滤与推送投递所需的列。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub expo_push_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// 用户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// 按 id 查询用户（不存在返回 None）
    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>>;

    /// 列出全部用户及其可能缺失的设备 token（广播解析用）
    async fn list_push_targets(&self) -> Result<Vec<PushTarget>>;

    /// 更新用户的推送 token，返回受影响行数
    async fn update_push_token(&self, user_id: i64, device_token: &str) -> Result<u64>;
}

/// 通知仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationRepositoryTrait: Send + Sync {
    /// 插入通知主记录，返回新 id
    async fn create_notification(
        &self,
        recipient: &RecipientSpec,
        title: &str,
        message: &str,
        created_by: &str,
        updated_by: &str,
    ) -> Result<i64>;

    /// 批量插入投递记录（is_read=false），空集合为 no-op
    async fn create_delivery_records(&self, notification_id: i64, user_ids: &[i64]) -> Result<()>;

    /// 将指定 (user_id, notification_id) 的投递记录标记为已读，
    /// 返回受影响行数（0 表示记录不存在，由调用方决定语义）
    async fn mark_read(&self, user_id: i64, notification_id: i64) -> Result<u64>;

    /// 查询用户可见的通知：定向给该用户的，加上其注册时间之后创建的广播，
    /// 合并自身已读状态，按创建时间倒序（同刻按 id 升序）
    async fn list_for_user(
        &self,
        user_id: i64,
        registered_at: DateTime<Utc>,
    ) -> Result<Vec<UserNotificationRow>>;
}
