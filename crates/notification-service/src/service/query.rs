//! 用户视角的通知查询与已读维护

use std::sync::Arc;

use tracing::info;

use crate::error::{NotifyError, Result};
use crate::models::UserNotificationRow;
use crate::repository::{NotificationRepositoryTrait, UserRepositoryTrait};

/// 通知查询服务
pub struct NotificationQueryService {
    users: Arc<dyn UserRepositoryTrait>,
    notifications: Arc<dyn NotificationRepositoryTrait>,
}

impl NotificationQueryService {
    pub fn new(
        users: Arc<dyn UserRepositoryTrait>,
        notifications: Arc<dyn NotificationRepositoryTrait>,
    ) -> Self {
        Self {
            users,
            notifications,
        }
    }

    /// 列出用户可见的通知
    ///
    /// 定向给该用户的，加上其注册之后创建的广播；注册之前的广播
    /// 按用户注册时间过滤掉。用户不存在返回 404。
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<UserNotificationRow>> {
        let user = self
            .users
            .get_user(user_id)
            .await?
            .ok_or(NotifyError::UserNotFound(user_id))?;

        self.notifications.list_for_user(user.id, user.created_at).await
    }

    /// 把一条投递记录标记为已读
    ///
    /// 幂等：重复标记已读的记录仍然成功。只有 (user_id, notification_id)
    /// 根本没有投递记录时返回 404。
    pub async fn mark_read(&self, user_id: i64, notification_id: i64) -> Result<()> {
        let affected = self.notifications.mark_read(user_id, notification_id).await?;
        if affected == 0 {
            return Err(NotifyError::DeliveryRecordNotFound {
                user_id,
                notification_id,
            });
        }

        info!(user_id, notification_id, "通知已标记为已读");
        Ok(())
    }

    /// 更新用户的设备推送 token
    ///
    /// token 只要求非空，格式校验推迟到推送时刻（格式不合法的 token
    /// 在发送时本地拒绝并计入失败）；用户不存在返回 404。
    pub async fn update_push_token(&self, user_id: i64, device_token: &str) -> Result<()> {
        let token = device_token.trim();
        if token.is_empty() {
            return Err(NotifyError::invalid_field("deviceToken", "设备 token 不能为空"));
        }

        let affected = self.users.update_push_token(user_id, token).await?;
        if affected == 0 {
            return Err(NotifyError::UserNotFound(user_id));
        }

        info!(user_id, "设备推送 token 已更新");
        Ok(())
    }
}
