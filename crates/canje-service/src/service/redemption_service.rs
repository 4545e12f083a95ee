//! 兑换账本服务
//!
//! 兑换是系统内唯一的复合写入：校验、扣减积分与创建兑换记录
//! 必须在同一个数据库事务内完成，要么全部生效要么全部回滚。
//!
//! ## 并发控制
//!
//! - 用户行 `FOR UPDATE` 锁串行化同一用户的并发兑换，余额扣减
//!   另加条件更新兜底，保证余额不为负
//! - 折扣行 `FOR UPDATE` 锁把"已兑换计数 + 插入"变成临界区，
//!   限量折扣在最后一份上的并发兑换只有一个成功，其余得到已兑完
//!
//! 通知在事务提交之后异步投递，其成败不影响兑换结果。

use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::error::{CanjeError, Result};
use crate::models::{Discount, Redemption, User};
use crate::notification::{NotificationMessage, NotificationSender};
use crate::repository::{DiscountRepository, RedemptionRepository, UserRepository};
use crate::service::RedemptionCodeGenerator;

/// 兑换账本服务
pub struct RedemptionService {
    pool: PgPool,
    users: UserRepository,
    discounts: DiscountRepository,
    redemptions: RedemptionRepository,
    notifier: NotificationSender,
}

impl RedemptionService {
    pub fn new(pool: PgPool, notifier: NotificationSender) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            discounts: DiscountRepository::new(pool.clone()),
            redemptions: RedemptionRepository::new(pool.clone()),
            pool,
            notifier,
        }
    }

    /// 执行一次兑换
    ///
    /// 校验失败时事务随错误返回一起回滚，不留任何副作用。
    #[instrument(skip(self))]
    pub async fn redeem(&self, user_id: i64, discount_id: i64) -> Result<Redemption> {
        let mut tx = self.pool.begin().await?;

        let user = UserRepository::get_user_for_update_in_tx(&mut *tx, user_id)
            .await?
            .ok_or(CanjeError::UserNotFound(user_id))?;

        if !user.active {
            return Err(CanjeError::UserInactive(user_id));
        }

        let discount = DiscountRepository::get_discount_for_update_in_tx(&mut *tx, discount_id)
            .await?
            .ok_or(CanjeError::DiscountNotFound(discount_id))?;

        let now = Utc::now();
        Self::check_discount_redeemable(&discount, &user, now)?;

        // 持有折扣行锁时计数才不会与并发插入竞争
        if !discount.is_unlimited() {
            let redeemed = RedemptionRepository::count_for_discount_in_tx(&mut *tx, discount_id)
                .await?;
            if redeemed >= i64::from(discount.available_quantity) {
                return Err(CanjeError::SoldOut(discount_id));
            }
        }

        let code = RedemptionCodeGenerator::generate_unique_in_tx(&mut *tx).await?;

        let mut redemption = Redemption {
            id: 0,
            user_id,
            discount_id,
            redeemed_at: now,
            points_used: discount.required_points,
            code,
            consumed: false,
            consumed_at: None,
        };
        redemption.id = RedemptionRepository::create_in_tx(&mut *tx, &redemption).await?;

        let debited =
            UserRepository::debit_points_in_tx(&mut *tx, user_id, discount.required_points)
                .await?;
        if debited == 0 {
            return Err(CanjeError::InsufficientPoints {
                required: discount.required_points,
                available: user.points,
            });
        }

        tx.commit().await?;

        info!(
            user_id,
            discount_id,
            redemption_id = redemption.id,
            points_used = redemption.points_used,
            code = %redemption.code,
            "兑换成功"
        );

        self.notifier.send(NotificationMessage::redemption_created(
            user_id,
            user.email,
            &discount.name,
            &redemption.code,
            redemption.points_used,
        ));

        Ok(redemption)
    }

    /// 列出用户当前可兑换的折扣
    #[instrument(skip(self))]
    pub async fn list_available(&self, user_id: i64) -> Result<Vec<Discount>> {
        let user = self.user(user_id).await?;
        self.discounts.list_affordable(user.points, Utc::now()).await
    }

    /// 用户兑换历史，按兑换时间倒序
    #[instrument(skip(self))]
    pub async fn history(&self, user_id: i64) -> Result<Vec<Redemption>> {
        // 先确认用户存在，避免把不存在的用户当成空历史
        self.user(user_id).await?;
        self.redemptions.list_by_user(user_id).await
    }

    async fn user(&self, user_id: i64) -> Result<User> {
        self.users
            .get_user(user_id)
            .await?
            .ok_or(CanjeError::UserNotFound(user_id))
    }

    fn check_discount_redeemable(discount: &Discount, user: &User, now: chrono::DateTime<Utc>) -> Result<()> {
        if !discount.active {
            return Err(CanjeError::DiscountInactive(discount.id));
        }
        if discount.not_yet_started(now) {
            return Err(CanjeError::DiscountNotYetAvailable(discount.id));
        }
        if discount.has_ended(now) {
            return Err(CanjeError::DiscountExpired(discount.id));
        }
        if !user.can_afford(discount.required_points) {
            return Err(CanjeError::InsufficientPoints {
                required: discount.required_points,
                available: user.points,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_user(points: i32) -> User {
        User {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            points,
            active: true,
            locality_id: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn test_discount() -> Discount {
        let now = Utc::now();
        Discount {
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
        }
    }

    #[test]
    fn test_redeemable_checks_pass_for_valid_pair() {
        let result = RedemptionService::check_discount_redeemable(
            &test_discount(),
            &test_user(150),
            Utc::now(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_inactive_discount_rejected() {
        let mut discount = test_discount();
        discount.active = false;
        let err = RedemptionService::check_discount_redeemable(
            &discount,
            &test_user(150),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, CanjeError::DiscountInactive(2)));
    }

    #[test]
    fn test_window_checks_precede_affordability() {
        // 既过期又买不起时，先报过期
        let now = Utc::now();
        let mut discount = test_discount();
        discount.ends_at = now - Duration::days(1);
        let err =
            RedemptionService::check_discount_redeemable(&discount, &test_user(10), now)
                .unwrap_err();
        assert!(matches!(err, CanjeError::DiscountExpired(2)));
    }

    #[test]
    fn test_not_yet_started_rejected() {
        let now = Utc::now();
        let mut discount = test_discount();
        discount.starts_at = now + Duration::days(1);
        let err =
            RedemptionService::check_discount_redeemable(&discount, &test_user(150), now)
                .unwrap_err();
        assert!(matches!(err, CanjeError::DiscountNotYetAvailable(2)));
    }

    #[test]
    fn test_insufficient_points_carries_amounts() {
        let err = RedemptionService::check_discount_redeemable(
            &test_discount(),
            &test_user(40),
            Utc::now(),
        )
        .unwrap_err();
        match err {
            CanjeError::InsufficientPoints {
                required,
                available,
            } => {
                assert_eq!(required, 100);
                assert_eq!(available, 40);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_exact_balance_is_affordable() {
        let result = RedemptionService::check_discount_redeemable(
            &test_discount(),
            &test_user(100),
            Utc::now(),
        );
        assert!(result.is_ok());
    }
}
