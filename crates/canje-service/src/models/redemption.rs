//! 兑换记录实体

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 兑换记录（Canje）
///
/// 由兑换账本在扣减积分的同一事务内创建；`points_used` 是兑换
/// 时刻折扣所需积分的快照，后续修改折扣不影响历史记录。
/// `consumed` 只允许 false -> true 翻转一次，记录永不删除。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    pub id: i64,
    pub user_id: i64,
    pub discount_id: i64,
    /// 兑换时间
    pub redeemed_at: DateTime<Utc>,
    /// 兑换时扣减的积分（快照，不随折扣变动重算）
    pub points_used: i32,
    /// 8 位大写字母数字兑换码，全局唯一
    pub code: String,
    /// 是否已被商家核销
    pub consumed: bool,
    /// 核销时间，未核销时为空
    #[sqlx(default)]
    pub consumed_at: Option<DateTime<Utc>>,
}

impl Redemption {
    /// 兑换码长度
    pub const CODE_LEN: usize = 8;
}
