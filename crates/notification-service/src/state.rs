//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;

use club_shared::config::PushConfig;

use crate::push::{ExpoPushClient, PushSender};
use crate::repository::{
    NotificationRepository, NotificationRepositoryTrait, UserRepository, UserRepositoryTrait,
};
use crate::service::{FanoutService, NotificationQueryService};

/// Axum 应用共享状态
///
/// 服务在此组装一次，通过 Arc 在 handler 间共享
#[derive(Clone)]
pub struct AppState {
    /// 通知扇出服务
    pub fanout: Arc<FanoutService>,
    /// 通知查询服务
    pub query: Arc<NotificationQueryService>,
}

impl AppState {
    /// 创建新的应用状态，装配仓储与推送客户端
    pub fn new(pool: PgPool, push_config: &PushConfig) -> Self {
        let users: Arc<dyn UserRepositoryTrait> = Arc::new(UserRepository::new(pool.clone()));
        let notifications: Arc<dyn NotificationRepositoryTrait> =
            Arc::new(NotificationRepository::new(pool));
        let push: Arc<dyn PushSender> = Arc::new(ExpoPushClient::new(push_config));

        Self {
            fanout: Arc::new(FanoutService::new(
                users.clone(),
                notifications.clone(),
                push,
            )),
            query: Arc::new(NotificationQueryService::new(users, notifications)),
        }
    }
}
