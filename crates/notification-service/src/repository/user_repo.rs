//! 用户仓储实现

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::{UserRecord, UserRepositoryTrait};
use crate::error::Result;
use crate::models::PushTarget;

/// 用户仓储（PostgreSQL）
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn get_user(&self, user_id: i64) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, expo_push_token, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_push_targets(&self) -> Result<Vec<PushTarget>> {
        let targets = sqlx::query_as::<_, PushTarget>(
            "SELECT id AS user_id, expo_push_token FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(targets)
    }

    async fn update_push_token(&self, user_id: i64, device_token: &str) -> Result<u64> {
        let result = sqlx::query("UPDATE users SET expo_push_token = $2 WHERE id = $1")
            .bind(user_id)
            .bind(device_token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
