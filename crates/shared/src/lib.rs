//! 共享库
//!
//! 包含各服务共用的配置加载、错误定义、数据库连接池与日志初始化等基础设施代码。

pub mod config;
pub mod database;
pub mod error;
pub mod events;
pub mod observability;
