//! 领域模型定义
//!
//! 兑换核心涉及的实体：用户、折扣、兑换记录、废弃物类型、
//! 区域配置与加分规则。所有时间戳统一为 UTC。

mod collection;
mod discount;
mod redemption;
mod rule;
mod user;
mod waste;
mod zone;

pub use collection::Collection;
pub use discount::Discount;
pub use redemption::Redemption;
pub use rule::{RuleCondition, ValidationRule};
pub use user::User;
pub use waste::{WasteSubtype, WasteType};
pub use zone::ZoneConfig;
