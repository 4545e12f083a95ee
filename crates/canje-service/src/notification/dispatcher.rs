//! 通知分发器
//!
//! 兑换核心在事务提交后把消息投入有界通道即返回，不等待送达；
//! 独立的分发任务消费通道，带退避地重试失败的送达。通道满或
//! 分发任务退出时消息被丢弃并记日志，业务结果不受影响。

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use eco_shared::config::NotificationConfig;
use eco_shared::events::NotificationChannel;

use super::channels::{DeliveryChannel, EmailChannel, WhatsAppChannel};
use super::types::NotificationMessage;

/// 通知发送句柄
///
/// 可廉价克隆；`send` 永不阻塞、永不失败，投递不进去只记日志。
#[derive(Clone)]
pub struct NotificationSender {
    tx: mpsc::Sender<NotificationMessage>,
}

impl NotificationSender {
    /// 异步投递一条通知（fire-and-forget）
    pub fn send(&self, message: NotificationMessage) {
        match self.tx.try_send(message) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(msg)) => {
                warn!(
                    user_id = msg.user_id,
                    notification_type = %msg.notification_type,
                    "通知队列已满，消息丢弃"
                );
            }
            Err(mpsc::error::TrySendError::Closed(msg)) => {
                warn!(
                    user_id = msg.user_id,
                    notification_type = %msg.notification_type,
                    "通知分发器已停止，消息丢弃"
                );
            }
        }
    }
}

/// 通知分发器
pub struct NotificationDispatcher {
    rx: mpsc::Receiver<NotificationMessage>,
    whatsapp: Arc<dyn DeliveryChannel>,
    email: Arc<dyn DeliveryChannel>,
    max_retries: u32,
    retry_backoff: Duration,
}

impl NotificationDispatcher {
    /// 按配置构建分发器与发送句柄
    pub fn new(config: &NotificationConfig) -> anyhow::Result<(NotificationSender, Self)> {
        let (tx, rx) = mpsc::channel(config.queue_size);

        let whatsapp = WhatsAppChannel::new(
            config.whatsapp_endpoint.clone(),
            config.whatsapp_api_key.clone(),
        )?;

        let dispatcher = Self {
            rx,
            whatsapp: Arc::new(whatsapp),
            email: Arc::new(EmailChannel),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        };

        Ok((NotificationSender { tx }, dispatcher))
    }

    #[cfg(test)]
    fn with_channels(
        queue_size: usize,
        whatsapp: Arc<dyn DeliveryChannel>,
        email: Arc<dyn DeliveryChannel>,
        max_retries: u32,
        retry_backoff: Duration,
    ) -> (NotificationSender, Self) {
        let (tx, rx) = mpsc::channel(queue_size);
        (
            NotificationSender { tx },
            Self {
                rx,
                whatsapp,
                email,
                max_retries,
                retry_backoff,
            },
        )
    }

    /// 消费通道直到所有发送句柄被丢弃
    pub async fn run(mut self) {
        info!("通知分发器启动");

        while let Some(message) = self.rx.recv().await {
            self.dispatch(&message).await;
        }

        info!("通知分发器停止");
    }

    async fn dispatch(&self, message: &NotificationMessage) {
        let channel = match message.preferred_channel {
            NotificationChannel::WhatsApp => &self.whatsapp,
            NotificationChannel::Email => &self.email,
        };

        for attempt in 0..=self.max_retries {
            match channel.deliver(message).await {
                Ok(()) => return,
                Err(e) if attempt < self.max_retries => {
                    warn!(
                        channel = channel.name(),
                        user_id = message.user_id,
                        attempt,
                        error = %e,
                        "通知送达失败，准备重试"
                    );
                    // 线性退避
                    tokio::time::sleep(self.retry_backoff * (attempt + 1)).await;
                }
                Err(e) => {
                    error!(
                        channel = channel.name(),
                        user_id = message.user_id,
                        notification_type = %message.notification_type,
                        error = %e,
                        "通知送达失败，重试耗尽，消息丢弃"
                    );
                }
            }
        }
    }
}
