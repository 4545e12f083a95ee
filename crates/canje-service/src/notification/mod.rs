//! 进程内通知子系统
//!
//! 业务事务提交后通过有界通道把通知消息交给独立的分发任务，
//! 送达失败带退避重试；任何失败都不回传业务层。

pub mod channels;
pub mod dispatcher;
pub mod types;

pub use dispatcher::{NotificationDispatcher, NotificationSender};
pub use types::NotificationMessage;
