//! 业务服务层
//!
//! - `redemption_service`: 兑换账本，事务内完成校验、扣减与兑换记录创建
//! - `consume_service`: 兑换码核销与只读预检
//! - `code_generator`: 8 位兑换码生成，事务内保证唯一
//! - `eligibility`: 回收资格校验与积分计算（纯函数求值）

pub mod code_generator;
pub mod consume_service;
pub mod dto;
pub mod eligibility;
pub mod redemption_service;

pub use code_generator::RedemptionCodeGenerator;
pub use consume_service::ConsumeService;
pub use eligibility::{EligibilityContext, EligibilityService, Evaluation};
pub use redemption_service::RedemptionService;
