//! 通知仓储实现

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use super::traits::NotificationRepositoryTrait;
use crate::error::Result;
use crate::models::{RecipientSpec, UserNotificationRow, BROADCAST_SENTINEL};

/// 用户可见通知的合并查询
///
/// 左联接该用户自己的投递记录取已读状态；广播通知对发送后才注册的
/// 用户没有投递记录，is_read 用 COALESCE 回退为 false。
/// 注册之前创建的广播被时间条件排除。
const LIST_FOR_USER_SQL: &str = r#"
    SELECT
        n.id AS notification_id,
        n.title,
        n.message,
        n.created_at,
        COALESCE(un.is_read, FALSE) AS is_read
    FROM notifications n
    LEFT JOIN user_notifications un
        ON un.notification_id = n.id AND un.user_id = $1
    WHERE n.recipient = $2
       OR (LOWER(n.recipient) = LOWER($3) AND n.created_at >= $4)
    ORDER BY n.created_at DESC, n.id ASC
"#;

/// 通知仓储（PostgreSQL）
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepositoryTrait for NotificationRepository {
    async fn create_notification(
        &self,
        recipient: &RecipientSpec,
        title: &str,
        message: &str,
        created_by: &str,
        updated_by: &str,
    ) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO notifications (recipient, title, message, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(recipient.as_db_value())
        .bind(title)
        .bind(message)
        .bind(created_by)
        .bind(updated_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn create_delivery_records(&self, notification_id: i64, user_ids: &[i64]) -> Result<()> {
        if user_ids.is_empty() {
            debug!(notification_id, "接收者集合为空，跳过投递记录写入");
            return Ok(());
        }

        // UNNEST 一次写入整批接收者；ON CONFLICT 保证同一对
        // (notification_id, user_id) 不会重复建行
        sqlx::query(
            r#"
            INSERT INTO user_notifications (notification_id, user_id, is_read)
            SELECT $1, uid, FALSE FROM UNNEST($2::BIGINT[]) AS uid
            ON CONFLICT (notification_id, user_id) DO NOTHING
            "#,
        )
        .bind(notification_id)
        .bind(user_ids)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn mark_read(&self, user_id: i64, notification_id: i64) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE user_notifications SET is_read = TRUE WHERE user_id = $1 AND notification_id = $2",
        )
        .bind(user_id)
        .bind(notification_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        registered_at: DateTime<Utc>,
    ) -> Result<Vec<UserNotificationRow>> {
        let rows = sqlx::query_as::<_, UserNotificationRow>(LIST_FOR_USER_SQL)
            .bind(user_id)
            .bind(user_id.to_string())
            .bind(BROADCAST_SENTINEL)
            .bind(registered_at)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
