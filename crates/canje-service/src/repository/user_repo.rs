//! 用户仓储
//!
//! 提供用户读取与积分扣减。扣减使用条件更新（`WHERE points >= $n`），
//! 保证余额不会被并发兑换扣成负数。

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::traits::UserRepositoryTrait;
use crate::error::Result;
use crate::models::User;

const USER_COLUMNS: &str =
    "id, name, email, points, active, locality_id, created_at, updated_at";

/// 用户仓储
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 获取单个用户
    pub async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// 在事务中锁定并获取用户（FOR UPDATE）
    ///
    /// 兑换事务内使用，串行化对同一用户余额的并发扣减。
    pub async fn get_user_for_update_in_tx(
        tx: &mut PgConnection,
        id: i64,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(tx)
        .await?;

        Ok(user)
    }

    /// 在事务中条件扣减积分
    ///
    /// 仅当余额足够时扣减；返回受影响行数，0 表示余额不足。
    pub async fn debit_points_in_tx(
        tx: &mut PgConnection,
        user_id: i64,
        points: i32,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET points = points - $2, updated_at = NOW()
            WHERE id = $1 AND points >= $2
            "#,
        )
        .bind(user_id)
        .bind(points)
        .execute(tx)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.get_user(id).await
    }
}
