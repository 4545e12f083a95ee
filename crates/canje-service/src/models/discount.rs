//! 折扣实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 折扣
///
/// 可用积分兑换的奖励，带有效期窗口与可选的数量上限。
/// `available_quantity` 为 -1 时表示不限量；已兑换数量为派生值，
/// 由兑换记录计数得出，不在本行冗余存储。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: i64,
    /// 折扣名称，如 "10% descuento en supermercado"
    pub name: String,
    #[sqlx(default)]
    pub description: Option<String>,
    /// 兑换所需积分
    pub required_points: i32,
    /// 折扣额度（金额或百分比）
    pub discount_value: f64,
    /// 额度是否为百分比
    pub is_percentage: bool,
    /// 有效期开始
    pub starts_at: DateTime<Utc>,
    /// 有效期结束
    pub ends_at: DateTime<Utc>,
    /// 是否启用
    pub active: bool,
    /// 可兑换数量，-1 表示不限量
    pub available_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Discount {
    /// 数量上限标记值：不限量
    pub const UNLIMITED: i32 = -1;

    /// 是否不限量
    pub fn is_unlimited(&self) -> bool {
        self.available_quantity == Self::UNLIMITED
    }

    /// 有效期是否尚未开始
    pub fn not_yet_started(&self, now: DateTime<Utc>) -> bool {
        now < self.starts_at
    }

    /// 有效期是否已结束
    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        now > self.ends_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_test_discount() -> Discount {
        let now = Utc::now();
        Discount {
            id: 1,
            name: "10% descuento en supermercado".to_string(),
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
        }
    }

    #[test]
    fn test_is_unlimited() {
        let mut discount = create_test_discount();
        assert!(discount.is_unlimited());

        discount.available_quantity = 5;
        assert!(!discount.is_unlimited());

        discount.available_quantity = 0;
        assert!(!discount.is_unlimited());
    }

    #[test]
    fn test_validity_window() {
        let now = Utc::now();
        let mut discount = create_test_discount();
        assert!(!discount.not_yet_started(now));
        assert!(!discount.has_ended(now));

        discount.starts_at = now + Duration::days(1);
        assert!(discount.not_yet_started(now));

        discount.starts_at = now - Duration::days(10);
        discount.ends_at = now - Duration::days(1);
        assert!(discount.has_ended(now));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let now = Utc::now();
        let mut discount = create_test_discount();
        discount.starts_at = now;
        discount.ends_at = now;
        assert!(!discount.not_yet_started(now));
        assert!(!discount.has_ended(now));
    }
}
