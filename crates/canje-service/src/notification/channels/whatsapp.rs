//! WhatsApp 送达通道
//!
//! 通过 HTTP 网关发送；未配置网关地址时降级为模拟发送（只记日志），
//! 便于本地开发与测试环境运行。

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::info;

use super::DeliveryChannel;
use crate::notification::types::NotificationMessage;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// WhatsApp 网关请求体
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GatewayPayload<'a> {
    to: &'a str,
    text: String,
}

/// WhatsApp 通道
pub struct WhatsAppChannel {
    client: reqwest::Client,
    endpoint: Option<String>,
    api_key: Option<String>,
}

impl WhatsAppChannel {
    pub fn new(endpoint: Option<String>, api_key: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl DeliveryChannel for WhatsAppChannel {
    fn name(&self) -> &'static str {
        "whatsapp"
    }

    async fn deliver(&self, message: &NotificationMessage) -> anyhow::Result<()> {
        let Some(endpoint) = &self.endpoint else {
            // 未配置网关即模拟发送
            info!(
                user_id = message.user_id,
                recipient = %message.recipient,
                notification_type = %message.notification_type,
                "WhatsApp 模拟发送: {}",
                message.body
            );
            return Ok(());
        };

        let payload = GatewayPayload {
            to: &message.recipient,
            text: format!("{}\n{}", message.subject, message.body),
        };

        let mut request = self.client.post(endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        response.error_for_status()?;

        info!(
            user_id = message.user_id,
            notification_type = %message.notification_type,
            "WhatsApp 发送成功"
        );
        Ok(())
    }
}
