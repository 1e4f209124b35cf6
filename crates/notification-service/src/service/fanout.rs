//! 通知扇出编排
//!
//! 发送一条通知的完整链路：参数验证 -> 接收者解析 -> 通知落库 ->
//! 投递记录落库 -> 并发推送 -> 统计聚合。
//!
//! 失败策略以通知落库为分界：落库之前任何失败都让整个操作失败
//! （不留半成品数据）；落库之后的失败一律吸收——投递记录写入失败
//! 只记日志，推送失败只体现在统计里，请求照常成功返回。

use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info, warn};

use super::recipient::RecipientResolver;
use crate::error::{FieldError, NotifyError, Result};
use crate::models::{DeliveryStats, PushReceipt, PushTarget, RecipientSpec};
use crate::push::PushSender;
use crate::repository::{NotificationRepositoryTrait, UserRepositoryTrait};

/// 扇出结果，handler 据此组装响应
#[derive(Debug, Clone)]
pub struct FanoutOutcome {
    pub notification_id: i64,
    pub recipient: RecipientSpec,
    pub title: String,
    pub message: String,
    pub stats: DeliveryStats,
}

/// 通知扇出服务
pub struct FanoutService {
    resolver: RecipientResolver,
    notifications: Arc<dyn NotificationRepositoryTrait>,
    push: Arc<dyn PushSender>,
}

impl FanoutService {
    pub fn new(
        users: Arc<dyn UserRepositoryTrait>,
        notifications: Arc<dyn NotificationRepositoryTrait>,
        push: Arc<dyn PushSender>,
    ) -> Self {
        Self {
            resolver: RecipientResolver::new(users),
            notifications,
            push,
        }
    }

    /// 发送一条通知（定向或广播）
    pub async fn send_notification(
        &self,
        recipient_raw: &str,
        title: &str,
        message: &str,
        created_by: &str,
        updated_by: &str,
    ) -> Result<FanoutOutcome> {
        let recipient = Self::validate(recipient_raw, title, message, created_by, updated_by)?;

        // 接收者解析在落库之前：定向给不存在用户的请求整体失败，
        // 不会留下无主的通知行
        let resolved = self.resolver.resolve(&recipient).await?;

        let notification_id = self
            .notifications
            .create_notification(&recipient, title, message, created_by, updated_by)
            .await?;

        info!(
            notification_id,
            recipient = %recipient,
            target_count = resolved.targets.len(),
            "通知已落库，开始投递"
        );

        // 通知主记录已持久化，此后进入尽力投递阶段：
        // 投递记录写入失败不回滚、不上抛
        let user_ids: Vec<i64> = resolved.targets.iter().map(|t| t.user_id).collect();
        if let Err(e) = self
            .notifications
            .create_delivery_records(notification_id, &user_ids)
            .await
        {
            error!(notification_id, error = %e, "投递记录写入失败，通知仍视为已发送");
        }

        let stats = self.dispatch_pushes(&resolved.targets, title, message).await;

        info!(
            notification_id,
            attempted = stats.attempted,
            successful = stats.successful,
            failed = stats.failed,
            "推送投递完成"
        );

        Ok(FanoutOutcome {
            notification_id,
            recipient,
            title: title.to_string(),
            message: message.to_string(),
            stats,
        })
    }

    /// 对持有 token 的目标并发推送并聚合回执
    ///
    /// 没有 token 的目标直接跳过，不计入 attempted。
    async fn dispatch_pushes(
        &self,
        targets: &[PushTarget],
        title: &str,
        message: &str,
    ) -> DeliveryStats {
        let sends = targets
            .iter()
            .filter(|t| t.has_token())
            .map(|t| {
                let token = t.expo_push_token.as_deref().unwrap_or_default();
                self.push.send(token, title, message)
            })
            .collect::<Vec<_>>();

        let receipts: Vec<PushReceipt> = join_all(sends).await;

        for receipt in receipts.iter().filter(|r| !r.success) {
            warn!(
                token = %receipt.token,
                error = receipt.error.as_deref().unwrap_or("未知原因"),
                "单条推送失败"
            );
        }

        DeliveryStats::from_receipts(&receipts)
    }

    /// 请求字段验证，汇总全部字段错误一次性返回
    fn validate(
        recipient_raw: &str,
        title: &str,
        message: &str,
        created_by: &str,
        updated_by: &str,
    ) -> Result<RecipientSpec> {
        let mut errors = Vec::new();

        let recipient = match RecipientSpec::parse(recipient_raw) {
            Some(spec) => Some(spec),
            None => {
                errors.push(FieldError::new(
                    "recipient",
                    "必须是用户 id 或广播值 \"All\"",
                ));
                None
            }
        };
        if title.trim().is_empty() {
            errors.push(FieldError::new("title", "标题不能为空"));
        }
        if message.trim().is_empty() {
            errors.push(FieldError::new("message", "内容不能为空"));
        }
        if created_by.trim().is_empty() {
            errors.push(FieldError::new("createdBy", "创建人不能为空"));
        }
        if updated_by.trim().is_empty() {
            errors.push(FieldError::new("updatedBy", "更新人不能为空"));
        }

        match recipient {
            Some(spec) if errors.is_empty() => Ok(spec),
            _ => Err(NotifyError::Validation(errors)),
        }
    }
}
