//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use sqlx::PgPool;

use crate::notification::NotificationSender;
use crate::repository::{CatalogRepository, CollectionRepository, UserRepository};
use crate::service::{ConsumeService, EligibilityService, RedemptionService};

/// Axum 应用共享状态
///
/// 服务实例通过 Arc 在 handler 间共享。
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL 连接池（健康检查用）
    pub pool: PgPool,
    pub redemptions: Arc<RedemptionService>,
    pub consumes: Arc<ConsumeService>,
    pub eligibility: Arc<EligibilityService>,
}

impl AppState {
    /// 创建新的应用状态并装配各服务
    pub fn new(pool: PgPool, notifier: NotificationSender) -> Self {
        let eligibility = EligibilityService::new(
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(CatalogRepository::new(pool.clone())),
            Arc::new(CollectionRepository::new(pool.clone())),
        );

        Self {
            redemptions: Arc::new(RedemptionService::new(pool.clone(), notifier.clone())),
            consumes: Arc::new(ConsumeService::new(pool.clone(), notifier)),
            eligibility: Arc::new(eligibility),
            pool,
        }
    }
}
