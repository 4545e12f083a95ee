//! 废弃物类型实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 废弃物类型
///
/// `max_weight_kg` 是该类型的硬性重量上限（如有机物 50kg、
/// 可回收物 30kg、危险废弃物 10kg），独立于区域配置的上限，
/// 作为必填字段存在：新类型必须显式声明自己的上限，而不是
/// 按名称特判。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WasteType {
    pub id: i64,
    /// 类型名称，如 "Orgánico"
    pub name: String,
    /// 每次回收的基础积分
    pub base_points: i32,
    /// 单次回收的硬性重量上限（kg）
    pub max_weight_kg: f64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 废弃物子类型
///
/// 正确细分（如有机物下的 "FO"、"FV"、"Poda"）可获得额外积分。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WasteSubtype {
    pub id: i64,
    pub waste_type_id: i64,
    pub name: String,
    #[sqlx(default)]
    pub description: Option<String>,
    /// 细分加分
    pub bonus_points: i32,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waste_type_serialization() {
        let waste_type = WasteType {
            id: 1,
            name: "Orgánico".to_string(),
            base_points: 10,
            max_weight_kg: 50.0,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&waste_type).unwrap();
        assert_eq!(json["basePoints"], 10);
        assert_eq!(json["maxWeightKg"], 50.0);
    }
}
