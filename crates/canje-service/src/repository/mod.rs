//! 数据库仓储层
//!
//! 每个聚合一个仓储：普通方法走连接池，`_in_tx` 关联函数在调用方
//! 持有的事务连接上执行，由服务层负责事务边界。

mod catalog_repo;
mod collection_repo;
mod discount_repo;
mod redemption_repo;
pub mod traits;
mod user_repo;

pub use catalog_repo::CatalogRepository;
pub use collection_repo::CollectionRepository;
pub use discount_repo::DiscountRepository;
pub use redemption_repo::RedemptionRepository;
pub use traits::{CatalogRepositoryTrait, CollectionRepositoryTrait, UserRepositoryTrait};
pub use user_repo::UserRepository;
