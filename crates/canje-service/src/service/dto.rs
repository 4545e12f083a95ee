//! 服务层数据传输对象

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Discount, Redemption};

/// 兑换码预检结果
///
/// 只读视图，商家核销前用来确认码的状态与折扣内容。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeValidation {
    pub code: String,
    /// 未被使用且折扣未过期
    pub valid: bool,
    pub consumed: bool,
    pub consumed_at: Option<DateTime<Utc>>,
    pub expired: bool,
    pub discount_name: String,
    pub discount_value: f64,
    pub is_percentage: bool,
    pub points_used: i32,
    pub redeemed_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

impl CodeValidation {
    pub fn from_parts(redemption: &Redemption, discount: &Discount, now: DateTime<Utc>) -> Self {
        let expired = discount.has_ended(now);
        Self {
            code: redemption.code.clone(),
            valid: !redemption.consumed && !expired,
            consumed: redemption.consumed,
            consumed_at: redemption.consumed_at,
            expired,
            discount_name: discount.name.clone(),
            discount_value: discount.discount_value,
            is_percentage: discount.is_percentage,
            points_used: redemption.points_used,
            redeemed_at: redemption.redeemed_at,
            ends_at: discount.ends_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fixtures() -> (Redemption, Discount) {
        let now = Utc::now();
        let redemption = Redemption {
            id: 7,
            user_id: 1,
            discount_id: 2,
            redeemed_at: now - Duration::hours(1),
            points_used: 100,
            code: "AB12CD34".to_string(),
            consumed: false,
            consumed_at: None,
        };
        let discount = Discount {
            id: 2,
            name: "10% descuento".to_string(),
            description: None,
            required_points: 100,
            discount_value: 10.0,
            is_percentage: true,
            starts_at: now - Duration::days(1),
            ends_at: now + Duration::days(30),
            active: true,
            available_quantity: Discount::UNLIMITED,
            created_at: now,
            updated_at: now,
        };
        (redemption, discount)
    }

    #[test]
    fn test_fresh_code_is_valid() {
        let (redemption, discount) = fixtures();
        let validation = CodeValidation::from_parts(&redemption, &discount, Utc::now());
        assert!(validation.valid);
        assert!(!validation.consumed);
        assert!(!validation.expired);
    }

    #[test]
    fn test_consumed_code_is_invalid() {
        let (mut redemption, discount) = fixtures();
        redemption.consumed = true;
        redemption.consumed_at = Some(Utc::now());
        let validation = CodeValidation::from_parts(&redemption, &discount, Utc::now());
        assert!(!validation.valid);
        assert!(validation.consumed);
    }

    #[test]
    fn test_expired_discount_invalidates_code() {
        let (redemption, mut discount) = fixtures();
        discount.ends_at = Utc::now() - Duration::days(1);
        let validation = CodeValidation::from_parts(&redemption, &discount, Utc::now());
        assert!(!validation.valid);
        assert!(validation.expired);
        assert!(!validation.consumed);
    }
}
