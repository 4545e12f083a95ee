//! 用户实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 用户
///
/// 积分余额为非负整数，扣减只在兑换事务内通过条件更新完成，
/// 已提交的兑换永远不会把余额扣成负数。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// 当前积分余额
    pub points: i32,
    /// 是否启用
    pub active: bool,
    /// 所属地区
    pub locality_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// 检查余额是否足以兑换指定积分的折扣
    pub fn can_afford(&self, required_points: i32) -> bool {
        self.points >= required_points
    }
}
