//! 通知事件模型
//!
//! 定义兑换核心在事务提交后对外发布的事件类型与通知渠道枚举。
//! 事件通过进程内通道投递给独立的通知分发器消费，核心业务的成败
//! 与事件的投递结果完全解耦。

use serde::{Deserialize, Serialize};

/// 通知类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// 兑换成功，向用户推送兑换码
    RedemptionCreated,
    /// 兑换码已被商家核销
    RedemptionConsumed,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::RedemptionCreated => "REDEMPTION_CREATED",
            Self::RedemptionConsumed => "REDEMPTION_CONSUMED",
        };
        write!(f, "{s}")
    }
}

/// 通知渠道枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationChannel {
    WhatsApp,
    Email,
}

impl std::fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::WhatsApp => "WHATSAPP",
            Self::Email => "EMAIL",
        };
        write!(f, "{s}")
    }
}
