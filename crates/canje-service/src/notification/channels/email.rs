//! 邮件送达通道
//!
//! 当前为模拟实现：完整记录收件人与内容但不真正外发。
//! TODO: 接入 SMTP 网关后替换为真实投递。

use async_trait::async_trait;
use tracing::info;

use super::DeliveryChannel;
use crate::notification::types::NotificationMessage;

/// 邮件通道
pub struct EmailChannel;

#[async_trait]
impl DeliveryChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn deliver(&self, message: &NotificationMessage) -> anyhow::Result<()> {
        info!(
            user_id = message.user_id,
            recipient = %message.recipient,
            subject = %message.subject,
            notification_type = %message.notification_type,
            "邮件模拟发送: {}",
            message.body
        );
        Ok(())
    }
}
