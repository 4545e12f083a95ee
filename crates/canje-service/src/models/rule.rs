//! 加分规则实体
//!
//! 规则条件以 JSONB 存储，但在模型层解析为带标签的枚举，
//! 每种规则携带自己的强类型参数，避免在求值时解析无结构的
//! 键值对。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 规则条件
///
/// 带标签的变体：`kind` 字段区分规则种类，各变体携带自己的参数。
///
/// JSON 形如：
/// `{"kind": "SEPARATION"}`
/// `{"kind": "MIN_WEIGHT", "minWeightKg": 5.0}`
/// `{"kind": "FREQUENCY", "minCollections": 4}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCondition {
    /// 细分加分：指定了子类型即满足
    Separation,
    /// 重量加分：重量达到配置的最小值即满足
    #[serde(rename_all = "camelCase")]
    MinWeight { min_weight_kg: f64 },
    /// 高频加分：近 30 天回收次数达到配置的最小值即满足
    #[serde(rename_all = "camelCase")]
    Frequency { min_collections: i64 },
}

/// 加分规则
///
/// 可按废弃物类型和/或地区限定作用范围；空范围字段表示不限。
/// 各规则彼此独立求值，满足条件的加分全部累加。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    pub id: i64,
    pub name: String,
    #[sqlx(default)]
    pub description: Option<String>,
    /// 条件载荷（JSONB），通过 [`parse_condition`](Self::parse_condition) 解析
    pub condition: Value,
    /// 满足条件时的加分
    pub bonus_points: i32,
    /// 预留的减分字段（当前求值不使用）
    pub penalty_points: i32,
    /// 限定的废弃物类型，空表示不限
    #[sqlx(default)]
    pub waste_type_id: Option<i64>,
    /// 限定的地区，空表示不限
    #[sqlx(default)]
    pub locality_id: Option<i64>,
    pub active: bool,
}

impl ValidationRule {
    /// 解析条件载荷
    pub fn parse_condition(&self) -> Result<RuleCondition, serde_json::Error> {
        serde_json::from_value(self.condition.clone())
    }

    /// 检查规则作用范围是否覆盖给定的（类型，地区）组合
    pub fn applies_to(&self, waste_type_id: i64, locality_id: i64) -> bool {
        self.waste_type_id.is_none_or(|t| t == waste_type_id)
            && self.locality_id.is_none_or(|l| l == locality_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_rule(condition: Value) -> ValidationRule {
        ValidationRule {
            id: 1,
            name: "Bonus separación".to_string(),
            description: None,
            condition,
            bonus_points: 5,
            penalty_points: 0,
            waste_type_id: None,
            locality_id: None,
            active: true,
        }
    }

    #[test]
    fn test_parse_separation_condition() {
        let rule = create_test_rule(json!({"kind": "SEPARATION"}));
        assert_eq!(rule.parse_condition().unwrap(), RuleCondition::Separation);
    }

    #[test]
    fn test_parse_min_weight_condition() {
        let rule = create_test_rule(json!({"kind": "MIN_WEIGHT", "minWeightKg": 5.0}));
        assert_eq!(
            rule.parse_condition().unwrap(),
            RuleCondition::MinWeight { min_weight_kg: 5.0 }
        );
    }

    #[test]
    fn test_parse_frequency_condition() {
        let rule = create_test_rule(json!({"kind": "FREQUENCY", "minCollections": 4}));
        assert_eq!(
            rule.parse_condition().unwrap(),
            RuleCondition::Frequency { min_collections: 4 }
        );
    }

    #[test]
    fn test_parse_malformed_condition_is_error() {
        let rule = create_test_rule(json!({"tipo": "peso", "pesoMinimo": "5"}));
        assert!(rule.parse_condition().is_err());
    }

    #[test]
    fn test_applies_to_scoping() {
        let mut rule = create_test_rule(json!({"kind": "SEPARATION"}));

        // 不限范围
        assert!(rule.applies_to(1, 10));

        // 仅限类型
        rule.waste_type_id = Some(1);
        assert!(rule.applies_to(1, 99));
        assert!(!rule.applies_to(2, 10));

        // 类型 + 地区同时限定
        rule.locality_id = Some(10);
        assert!(rule.applies_to(1, 10));
        assert!(!rule.applies_to(1, 11));
    }
}
