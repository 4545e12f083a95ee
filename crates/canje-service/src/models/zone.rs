//! 区域配置实体

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// 区域配置
///
/// 每个（地区，废弃物类型）组合一条，约束回收申请的时段、
/// 重量范围与最小间隔天数。只读输入，不参与并发写。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ZoneConfig {
    pub id: i64,
    pub locality_id: i64,
    pub waste_type_id: i64,
    /// 两次同类型回收之间的最小间隔天数
    pub frequency_days: i32,
    pub min_weight_kg: f64,
    pub max_weight_kg: f64,
    /// 当日接受申请的时段起点
    pub window_start: NaiveTime,
    /// 当日接受申请的时段终点
    pub window_end: NaiveTime,
    /// 是否要求照片校验
    pub require_photo: bool,
    pub active: bool,
}

impl ZoneConfig {
    /// 申请时刻是否落在允许时段内（含边界）
    pub fn accepts_time(&self, time: NaiveTime) -> bool {
        time >= self.window_start && time <= self.window_end
    }

    /// 重量是否在区域限定范围内（含边界）
    pub fn accepts_weight(&self, weight_kg: f64) -> bool {
        weight_kg >= self.min_weight_kg && weight_kg <= self.max_weight_kg
    }
}
