//! 兑换码核销服务
//!
//! 商家侧的两个入口：只读预检（validar）与实际核销（utilizar）。
//! 核销用条件更新实现一次性语义，同一个码的并发核销只有一个
//! 调用方成功，其余得到已被使用。

use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::error::{CanjeError, Result};
use crate::models::Redemption;
use crate::notification::{NotificationMessage, NotificationSender};
use crate::repository::{DiscountRepository, RedemptionRepository, UserRepository};
use crate::service::dto::CodeValidation;

/// 兑换码核销服务
pub struct ConsumeService {
    users: UserRepository,
    discounts: DiscountRepository,
    redemptions: RedemptionRepository,
    notifier: NotificationSender,
}

impl ConsumeService {
    pub fn new(pool: PgPool, notifier: NotificationSender) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            discounts: DiscountRepository::new(pool.clone()),
            redemptions: RedemptionRepository::new(pool),
            notifier,
        }
    }

    /// 核销一个兑换码
    ///
    /// 校验顺序：码存在 -> 未被使用 -> 折扣未过期 -> 条件翻转。
    /// 条件更新影响 0 行说明另一并发核销抢先，同样报已被使用。
    #[instrument(skip(self))]
    pub async fn consume(&self, code: &str) -> Result<Redemption> {
        let redemption = self
            .redemptions
            .get_by_code(code)
            .await?
            .ok_or_else(|| CanjeError::InvalidCode(code.to_string()))?;

        if redemption.consumed {
            return Err(CanjeError::AlreadyUsed(code.to_string()));
        }

        let discount = self
            .discounts
            .get_discount(redemption.discount_id)
            .await?
            .ok_or(CanjeError::DiscountNotFound(redemption.discount_id))?;

        let now = Utc::now();
        // 已兑换的码跟随折扣有效期失效，不单独续期
        if discount.has_ended(now) {
            return Err(CanjeError::DiscountExpired(discount.id));
        }

        let updated = self.redemptions.consume_by_code(code, now).await?;
        if updated == 0 {
            return Err(CanjeError::AlreadyUsed(code.to_string()));
        }

        info!(
            code,
            user_id = redemption.user_id,
            discount_id = discount.id,
            "兑换码核销成功"
        );

        if let Some(user) = self.users.get_user(redemption.user_id).await? {
            self.notifier.send(NotificationMessage::redemption_consumed(
                user.id, user.email, code,
            ));
        }

        Ok(Redemption {
            consumed: true,
            consumed_at: Some(now),
            ..redemption
        })
    }

    /// 只读预检一个兑换码
    ///
    /// 不修改任何状态；商家在核销前查看码的有效性与折扣内容。
    #[instrument(skip(self))]
    pub async fn validate(&self, code: &str) -> Result<CodeValidation> {
        let redemption = self
            .redemptions
            .get_by_code(code)
            .await?
            .ok_or_else(|| CanjeError::InvalidCode(code.to_string()))?;

        let discount = self
            .discounts
            .get_discount(redemption.discount_id)
            .await?
            .ok_or(CanjeError::DiscountNotFound(redemption.discount_id))?;

        Ok(CodeValidation::from_parts(&redemption, &discount, Utc::now()))
    }
}
