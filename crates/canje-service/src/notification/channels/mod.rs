//! 通知送达通道
//!
//! 每种外部送达方式实现一次 [`DeliveryChannel`]；分发器按消息的
//! 首选渠道挑选通道，失败时重试由分发器统一处理，通道本身无状态。

mod email;
mod whatsapp;

pub use email::EmailChannel;
pub use whatsapp::WhatsAppChannel;

use async_trait::async_trait;

use super::types::NotificationMessage;

/// 通知送达通道接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeliveryChannel: Send + Sync {
    /// 通道名称，用于日志
    fn name(&self) -> &'static str;

    /// 送达一条消息；失败返回错误，由分发器决定是否重试
    async fn deliver(&self, message: &NotificationMessage) -> anyhow::Result<()>;
}
