//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Collection, User, ValidationRule, WasteSubtype, WasteType, ZoneConfig};

/// 用户仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn get_user(&self, id: i64) -> Result<Option<User>>;
}

/// 基础目录仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepositoryTrait: Send + Sync {
    async fn get_waste_type(&self, id: i64) -> Result<Option<WasteType>>;
    async fn get_waste_subtype(&self, id: i64) -> Result<Option<WasteSubtype>>;
    async fn get_zone_config(
        &self,
        locality_id: i64,
        waste_type_id: i64,
    ) -> Result<Option<ZoneConfig>>;
    async fn list_matching_rules(
        &self,
        waste_type_id: i64,
        locality_id: i64,
    ) -> Result<Vec<ValidationRule>>;
}

/// 回收登记仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CollectionRepositoryTrait: Send + Sync {
    async fn last_of_type(&self, user_id: i64, waste_type_id: i64)
    -> Result<Option<Collection>>;
    async fn count_since(&self, user_id: i64, since: DateTime<Utc>) -> Result<i64>;
}
