//! EcoCanje 积分兑换服务
//!
//! 城市垃圾分类回收奖励平台的兑换核心：用户用回收攒下的积分
//! 兑换商家折扣，获得一次性兑换码，到店由商家核销。另提供
//! 回收申请的资格校验与积分计算，供回收登记层调用。
//!
//! ## 模块划分
//!
//! - [`models`]: 领域实体与 `FromRow` 映射
//! - [`repository`]: 数据访问层，事务内操作以 `_in_tx` 关联函数提供
//! - [`service`]: 兑换账本、核销、兑换码生成、资格校验
//! - [`notification`]: 事务提交后的进程内通知分发
//! - [`handlers`] / [`routes`]: axum HTTP 接口
//!
//! ## 一致性保证
//!
//! 兑换在单个数据库事务内完成校验、积分扣减与记录创建；
//! 行锁加条件更新保证限量折扣不超卖、余额不为负、兑换码
//! 只能核销一次。

pub mod dto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod notification;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

pub use error::{CanjeError, Result};
pub use state::AppState;
