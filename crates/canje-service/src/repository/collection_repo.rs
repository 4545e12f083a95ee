//! 回收登记仓储
//!
//! 兑换核心对回收登记只读：频率校验需要最近一次同类型回收
//! 与近 30 天的回收次数。写入由外部的回收登记层负责。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::traits::CollectionRepositoryTrait;
use crate::error::Result;
use crate::models::Collection;

/// 回收登记仓储
pub struct CollectionRepository {
    pool: PgPool,
}

impl CollectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 用户最近一次同类型回收
    pub async fn last_of_type(
        &self,
        user_id: i64,
        waste_type_id: i64,
    ) -> Result<Option<Collection>> {
        let collection = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, user_id, waste_type_id, waste_subtype_id, weight_kg,
                   requested_at, points_awarded, state
            FROM collections
            WHERE user_id = $1 AND waste_type_id = $2
            ORDER BY requested_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(waste_type_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(collection)
    }

    /// 统计用户自某时刻起的回收次数
    pub async fn count_since(&self, user_id: i64, since: DateTime<Utc>) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM collections WHERE user_id = $1 AND requested_at >= $2",
        )
        .bind(user_id)
        .bind(since)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

#[async_trait]
impl CollectionRepositoryTrait for CollectionRepository {
    async fn last_of_type(
        &self,
        user_id: i64,
        waste_type_id: i64,
    ) -> Result<Option<Collection>> {
        self.last_of_type(user_id, waste_type_id).await
    }

    async fn count_since(&self, user_id: i64, since: DateTime<Utc>) -> Result<i64> {
        self.count_since(user_id, since).await
    }
}
