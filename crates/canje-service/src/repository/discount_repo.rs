//! 折扣仓储

use sqlx::{PgConnection, PgPool};

use crate::error::Result;
use crate::models::Discount;

const DISCOUNT_COLUMNS: &str = "id, name, description, required_points, discount_value, \
     is_percentage, starts_at, ends_at, active, available_quantity, created_at, updated_at";

/// 折扣仓储
pub struct DiscountRepository {
    pool: PgPool,
}

impl DiscountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 获取单个折扣
    pub async fn get_discount(&self, id: i64) -> Result<Option<Discount>> {
        let discount = sqlx::query_as::<_, Discount>(&format!(
            "SELECT {DISCOUNT_COLUMNS} FROM discounts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(discount)
    }

    /// 在事务中锁定并获取折扣（FOR UPDATE）
    ///
    /// 行锁把"可用数量检查 + 兑换插入"串行化，防止最后一份被超卖。
    pub async fn get_discount_for_update_in_tx(
        tx: &mut PgConnection,
        id: i64,
    ) -> Result<Option<Discount>> {
        let discount = sqlx::query_as::<_, Discount>(&format!(
            "SELECT {DISCOUNT_COLUMNS} FROM discounts WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(tx)
        .await?;

        Ok(discount)
    }

    /// 列出用户当前可负担的折扣
    ///
    /// 启用、在有效期内且所需积分不超过用户余额，按所需积分升序。
    pub async fn list_affordable(
        &self,
        user_points: i32,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Discount>> {
        let discounts = sqlx::query_as::<_, Discount>(&format!(
            r#"
            SELECT {DISCOUNT_COLUMNS}
            FROM discounts
            WHERE active = true
              AND starts_at <= $2
              AND ends_at >= $2
              AND required_points <= $1
            ORDER BY required_points ASC
            "#
        ))
        .bind(user_points)
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(discounts)
    }
}
