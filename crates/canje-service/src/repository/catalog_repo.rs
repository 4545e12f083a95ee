//! 基础目录仓储
//!
//! 废弃物类型、子类型、区域配置与加分规则的只读访问。
//! 这些数据读多写少，无需加锁。

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::CatalogRepositoryTrait;
use crate::error::Result;
use crate::models::{ValidationRule, WasteSubtype, WasteType, ZoneConfig};

/// 基础目录仓储
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 获取废弃物类型
    pub async fn get_waste_type(&self, id: i64) -> Result<Option<WasteType>> {
        let waste_type = sqlx::query_as::<_, WasteType>(
            r#"
            SELECT id, name, base_points, max_weight_kg, active, created_at, updated_at
            FROM waste_types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(waste_type)
    }

    /// 获取废弃物子类型
    pub async fn get_waste_subtype(&self, id: i64) -> Result<Option<WasteSubtype>> {
        let subtype = sqlx::query_as::<_, WasteSubtype>(
            r#"
            SELECT id, waste_type_id, name, description, bonus_points, active
            FROM waste_subtypes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(subtype)
    }

    /// 获取（地区，类型）对应的启用区域配置
    pub async fn get_zone_config(
        &self,
        locality_id: i64,
        waste_type_id: i64,
    ) -> Result<Option<ZoneConfig>> {
        let config = sqlx::query_as::<_, ZoneConfig>(
            r#"
            SELECT id, locality_id, waste_type_id, frequency_days, min_weight_kg,
                   max_weight_kg, window_start, window_end, require_photo, active
            FROM zone_configs
            WHERE locality_id = $1 AND waste_type_id = $2 AND active = true
            "#,
        )
        .bind(locality_id)
        .bind(waste_type_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(config)
    }

    /// 列出作用范围覆盖（类型，地区）的启用规则
    pub async fn list_matching_rules(
        &self,
        waste_type_id: i64,
        locality_id: i64,
    ) -> Result<Vec<ValidationRule>> {
        let rules = sqlx::query_as::<_, ValidationRule>(
            r#"
            SELECT id, name, description, condition, bonus_points, penalty_points,
                   waste_type_id, locality_id, active
            FROM validation_rules
            WHERE active = true
              AND (waste_type_id IS NULL OR waste_type_id = $1)
              AND (locality_id IS NULL OR locality_id = $2)
            ORDER BY id ASC
            "#,
        )
        .bind(waste_type_id)
        .bind(locality_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rules)
    }
}

#[async_trait]
impl CatalogRepositoryTrait for CatalogRepository {
    async fn get_waste_type(&self, id: i64) -> Result<Option<WasteType>> {
        self.get_waste_type(id).await
    }

    async fn get_waste_subtype(&self, id: i64) -> Result<Option<WasteSubtype>> {
        self.get_waste_subtype(id).await
    }

    async fn get_zone_config(
        &self,
        locality_id: i64,
        waste_type_id: i64,
    ) -> Result<Option<ZoneConfig>> {
        self.get_zone_config(locality_id, waste_type_id).await
    }

    async fn list_matching_rules(
        &self,
        waste_type_id: i64,
        locality_id: i64,
    ) -> Result<Vec<ValidationRule>> {
        self.list_matching_rules(waste_type_id, locality_id).await
    }
}
