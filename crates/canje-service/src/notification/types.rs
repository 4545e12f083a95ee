//! 通知消息类型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eco_shared::events::{NotificationChannel, NotificationType};

/// 通知消息
///
/// 业务事务提交后投递到分发通道的完整消息；渲染在入队前完成，
/// 分发器只负责送达。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    pub notification_type: NotificationType,
    pub user_id: i64,
    /// 收件人地址（邮箱或手机号，视通道而定）
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub preferred_channel: NotificationChannel,
    pub created_at: DateTime<Utc>,
}

impl NotificationMessage {
    /// 兑换成功通知
    pub fn redemption_created(
        user_id: i64,
        recipient: String,
        discount_name: &str,
        code: &str,
        points_used: i32,
    ) -> Self {
        Self {
            notification_type: NotificationType::RedemptionCreated,
            user_id,
            recipient,
            subject: "兑换成功".to_string(),
            body: format!(
                "你已使用 {points_used} 积分兑换「{discount_name}」，兑换码 {code}，请在有效期内到店使用。"
            ),
            preferred_channel: NotificationChannel::WhatsApp,
            created_at: Utc::now(),
        }
    }

    /// 兑换码核销通知
    pub fn redemption_consumed(user_id: i64, recipient: String, code: &str) -> Self {
        Self {
            notification_type: NotificationType::RedemptionConsumed,
            user_id,
            recipient,
            subject: "兑换码已使用".to_string(),
            body: format!("你的兑换码 {code} 已在商家核销。"),
            preferred_channel: NotificationChannel::WhatsApp,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redemption_created_message_carries_code_and_points() {
        let msg = NotificationMessage::redemption_created(
            1,
            "ana@example.com".to_string(),
            "10% descuento",
            "AB12CD34",
            100,
        );
        assert_eq!(msg.notification_type, NotificationType::RedemptionCreated);
        assert!(msg.body.contains("AB12CD34"));
        assert!(msg.body.contains("100"));
        assert!(msg.body.contains("10% descuento"));
    }
}
