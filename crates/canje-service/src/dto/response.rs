//! 响应体定义

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Discount, Redemption};

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }

    /// 创建成功响应（自定义消息）
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: message.into(),
            data: Some(data),
        }
    }
}

/// 兑换记录响应 DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionDto {
    pub id: i64,
    pub discount_id: i64,
    pub code: String,
    pub points_used: i32,
    pub redeemed_at: DateTime<Utc>,
    pub consumed: bool,
    pub consumed_at: Option<DateTime<Utc>>,
}

impl From<Redemption> for RedemptionDto {
    fn from(r: Redemption) -> Self {
        Self {
            id: r.id,
            discount_id: r.discount_id,
            code: r.code,
            points_used: r.points_used,
            redeemed_at: r.redeemed_at,
            consumed: r.consumed,
            consumed_at: r.consumed_at,
        }
    }
}

/// 折扣响应 DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub required_points: i32,
    pub discount_value: f64,
    pub is_percentage: bool,
    pub ends_at: DateTime<Utc>,
}

impl From<Discount> for DiscountDto {
    fn from(d: Discount) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            required_points: d.required_points,
            discount_value: d.discount_value,
            is_percentage: d.is_percentage,
            ends_at: d.ends_at,
        }
    }
}
