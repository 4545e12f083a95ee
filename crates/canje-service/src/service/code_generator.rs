//! 兑换码生成器
//!
//! 生成 8 位大写字母数字兑换码（36 符号字母表，约 2.8e12 种组合）。
//! 碰撞概率极低，但唯一性必须经过存在性检查确认：候选码在兑换
//! 事务内查重，撞上就重新生成，数据库 UNIQUE 约束作为最终兜底。

use rand::Rng;
use sqlx::PgConnection;
use tracing::warn;

use crate::error::{CanjeError, Result};
use crate::models::Redemption;
use crate::repository::RedemptionRepository;

/// 兑换码字母表：大写字母 + 数字
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 重新生成的尝试上限；达到上限说明系统状态异常而非运气问题
const MAX_ATTEMPTS: u32 = 16;

/// 兑换码生成器
pub struct RedemptionCodeGenerator;

impl RedemptionCodeGenerator {
    /// 生成一个候选码（未查重）
    pub fn candidate() -> String {
        Self::candidate_with(&mut rand::rng())
    }

    /// 使用指定随机源生成候选码，便于测试
    pub fn candidate_with<R: Rng + ?Sized>(rng: &mut R) -> String {
        (0..Redemption::CODE_LEN)
            .map(|_| {
                let idx = rng.random_range(0..CODE_ALPHABET.len());
                CODE_ALPHABET[idx] as char
            })
            .collect()
    }

    /// 在事务内生成全局唯一的兑换码
    ///
    /// 每个候选码都查一次存在性；碰撞则重新生成。事务回滚时
    /// 生成的码随之作废，重试会产生新码，不复用。
    pub async fn generate_unique_in_tx(tx: &mut PgConnection) -> Result<String> {
        for attempt in 0..MAX_ATTEMPTS {
            let candidate = Self::candidate();

            if !RedemptionRepository::code_exists_in_tx(tx, &candidate).await? {
                return Ok(candidate);
            }

            warn!(attempt, code = %candidate, "兑换码碰撞，重新生成");
        }

        Err(CanjeError::Internal(format!(
            "连续 {MAX_ATTEMPTS} 次兑换码碰撞"
        )))
    }
}
