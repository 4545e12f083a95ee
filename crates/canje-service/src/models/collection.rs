//! 回收登记实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 回收登记
///
/// 由外部的回收登记层写入；兑换核心只读取它做频率校验
/// （最近一次同类型回收、近 30 天回收次数）。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: i64,
    pub user_id: i64,
    pub waste_type_id: i64,
    #[sqlx(default)]
    pub waste_subtype_id: Option<i64>,
    #[sqlx(default)]
    pub weight_kg: Option<f64>,
    /// 申请时间
    pub requested_at: DateTime<Utc>,
    /// 校验通过时计算出的积分
    pub points_awarded: i32,
    /// 状态：Pendiente / Recolectado / Cancelado
    pub state: String,
}
