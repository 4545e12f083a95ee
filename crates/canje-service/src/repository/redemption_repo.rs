//! 兑换记录仓储

use sqlx::{PgConnection, PgPool, Row};

use crate::error::Result;
use crate::models::Redemption;

const REDEMPTION_COLUMNS: &str =
    "id, user_id, discount_id, redeemed_at, points_used, code, consumed, consumed_at";

/// 兑换记录仓储
pub struct RedemptionRepository {
    pool: PgPool,
}

impl RedemptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 根据兑换码精确查找（区分大小写）
    pub async fn get_by_code(&self, code: &str) -> Result<Option<Redemption>> {
        let redemption = sqlx::query_as::<_, Redemption>(&format!(
            "SELECT {REDEMPTION_COLUMNS} FROM redemptions WHERE code = $1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(redemption)
    }

    /// 列出用户的兑换历史，按兑换时间倒序
    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<Redemption>> {
        let redemptions = sqlx::query_as::<_, Redemption>(&format!(
            r#"
            SELECT {REDEMPTION_COLUMNS}
            FROM redemptions
            WHERE user_id = $1
            ORDER BY redeemed_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(redemptions)
    }

    /// 在事务中统计某折扣的已兑换数量
    ///
    /// 必须在持有折扣行锁的事务内调用，计数结果才对后续插入有效。
    pub async fn count_for_discount_in_tx(
        tx: &mut PgConnection,
        discount_id: i64,
    ) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM redemptions WHERE discount_id = $1")
                .bind(discount_id)
                .fetch_one(tx)
                .await?;

        Ok(count)
    }

    /// 在事务中检查兑换码是否已存在
    pub async fn code_exists_in_tx(tx: &mut PgConnection, code: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM redemptions WHERE code = $1)")
                .bind(code)
                .fetch_one(tx)
                .await?;

        Ok(exists)
    }

    /// 在事务中创建兑换记录，返回新记录 ID
    pub async fn create_in_tx(tx: &mut PgConnection, redemption: &Redemption) -> Result<i64> {
        let row = sqlx::query(
            r#"
            INSERT INTO redemptions (user_id, discount_id, redeemed_at, points_used,
                                     code, consumed, consumed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(redemption.user_id)
        .bind(redemption.discount_id)
        .bind(redemption.redeemed_at)
        .bind(redemption.points_used)
        .bind(&redemption.code)
        .bind(redemption.consumed)
        .bind(redemption.consumed_at)
        .fetch_one(tx)
        .await?;

        Ok(row.get("id"))
    }

    /// 条件核销：仅当尚未核销时翻转 consumed 标志
    ///
    /// 返回受影响行数；并发核销同一码时只有一个调用方得到 1，
    /// 其余得到 0。
    pub async fn consume_by_code(
        &self,
        code: &str,
        consumed_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE redemptions
            SET consumed = true, consumed_at = $2
            WHERE code = $1 AND consumed = false
            "#,
        )
        .bind(code)
        .bind(consumed_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
