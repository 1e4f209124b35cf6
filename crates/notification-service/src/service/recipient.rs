//! 接收者解析
//!
//! 把请求里的 recipient 规格展开为具体的推送目标集合。
//! 定向通知要求用户存在（否则整个操作在任何落库之前失败）；
//! 广播取发送时刻的全部用户，不做存在性校验——空用户表不是错误，
//! 只是零投递。

use std::sync::Arc;

use crate::error::{NotifyError, Result};
use crate::models::{PushTarget, RecipientSpec};
use crate::repository::UserRepositoryTrait;

/// 接收者解析结果
#[derive(Debug, Clone)]
pub struct ResolvedRecipients {
    pub targets: Vec<PushTarget>,
    pub is_broadcast: bool,
}

/// 接收者解析器
pub struct RecipientResolver {
    users: Arc<dyn UserRepositoryTrait>,
}

impl RecipientResolver {
    pub fn new(users: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { users }
    }

    /// 解析接收者规格
    pub async fn resolve(&self, spec: &RecipientSpec) -> Result<ResolvedRecipients> {
        match spec {
            RecipientSpec::User(user_id) => {
                let user = self
                    .users
                    .get_user(*user_id)
                    .await?
                    .ok_or(NotifyError::UserNotFound(*user_id))?;

                Ok(ResolvedRecipients {
                    targets: vec![PushTarget {
                        user_id: user.id,
                        expo_push_token: user.expo_push_token,
                    }],
                    is_broadcast: false,
                })
            }
            RecipientSpec::Broadcast => {
                let targets = self.users.list_push_targets().await?;
                Ok(ResolvedRecipients {
                    targets,
                    is_broadcast: true,
                })
            }
        }
    }
}
