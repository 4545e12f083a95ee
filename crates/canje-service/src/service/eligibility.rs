//! 回收资格校验与积分计算
//!
//! 回收登记层在落库加分之前调用本模块。校验分两步：仓储层把
//! 所需数据装配成 [`EligibilityContext`]，再由纯函数 [`evaluate`]
//! 求值，保证相同输入永远得到相同的错误列表与积分结果。
//!
//! ## 校验顺序
//!
//! 1. 用户 / 废弃物类型必须存在（缺失立即终止）
//! 2. 区域配置（如有）：重量范围、申请时段，边界均含
//! 3. 频率：距上次同类型回收须满配置的间隔天数（默认 7 天）
//! 4. 重量：必须大于 0 且不超过该类型的硬性上限
//!
//! 错误累加而不短路；只有零错误时才计算积分：
//! `基础积分 + 子类型加分 + floor(重量×2) + 满足条件的规则加分之和`

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{instrument, warn};

use crate::error::Result;
use crate::models::{RuleCondition, User, ValidationRule, WasteSubtype, WasteType, ZoneConfig};
use crate::repository::{CatalogRepositoryTrait, CollectionRepositoryTrait, UserRepositoryTrait};

/// 未配置区域时的默认回收间隔天数
pub const DEFAULT_FREQUENCY_DAYS: i32 = 7;

/// 高频规则的统计窗口
const FREQUENCY_WINDOW_DAYS: i64 = 30;

/// 每公斤重量折算的积分
const POINTS_PER_KG: f64 = 2.0;

/// 校验结果
///
/// 业务校验失败以错误列表返回而非异常；积分仅在零错误时非零。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub errors: Vec<String>,
    pub points_awarded: i32,
}

impl Evaluation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn rejected(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
            points_awarded: 0,
        }
    }
}

/// 校验上下文
///
/// 一次求值所需的全部数据快照；由服务层装配，纯函数消费。
#[derive(Debug, Clone)]
pub struct EligibilityContext {
    pub user: User,
    pub waste_type: WasteType,
    pub subtype: Option<WasteSubtype>,
    pub zone_config: Option<ZoneConfig>,
    /// 最近一次同类型回收的申请时间
    pub last_collection_at: Option<DateTime<Utc>>,
    /// 近 30 天回收次数
    pub collections_last_30_days: i64,
    pub rules: Vec<ValidationRule>,
    pub weight_kg: Option<f64>,
    pub requested_at: DateTime<Utc>,
}

/// 对上下文求值（纯函数）
pub fn evaluate(ctx: &EligibilityContext) -> Evaluation {
    let mut errors = Vec::new();

    check_zone_config(ctx, &mut errors);
    check_frequency(ctx, &mut errors);
    check_weight(ctx, &mut errors);

    let points_awarded = if errors.is_empty() { score(ctx) } else { 0 };

    Evaluation {
        errors,
        points_awarded,
    }
}

fn check_zone_config(ctx: &EligibilityContext, errors: &mut Vec<String>) {
    let Some(config) = &ctx.zone_config else {
        return;
    };

    if let Some(weight) = ctx.weight_kg {
        if !config.accepts_weight(weight) {
            errors.push(format!(
                "你所在区域该类型的单次重量须在 {}kg 至 {}kg 之间",
                config.min_weight_kg, config.max_weight_kg
            ));
        }
    }

    let time = ctx.requested_at.time();
    if !config.accepts_time(time) {
        errors.push(format!(
            "该类型仅在 {} 至 {} 之间接受申请",
            config.window_start.format("%H:%M"),
            config.window_end.format("%H:%M"),
        ));
    }
}

fn check_frequency(ctx: &EligibilityContext, errors: &mut Vec<String>) {
    let Some(last_at) = ctx.last_collection_at else {
        return;
    };

    let frequency_days = ctx
        .zone_config
        .as_ref()
        .map(|c| c.frequency_days)
        .unwrap_or(DEFAULT_FREQUENCY_DAYS);

    let elapsed_days =
        (ctx.requested_at - last_at).num_seconds() as f64 / Duration::days(1).num_seconds() as f64;

    if elapsed_days < frequency_days as f64 {
        // 剩余天数向上取整到整天
        let remaining = (frequency_days as f64 - elapsed_days).ceil() as i64;
        errors.push(format!(
            "还需等待 {remaining} 天才能再次申请该类型的回收"
        ));
    }
}

fn check_weight(ctx: &EligibilityContext, errors: &mut Vec<String>) {
    let Some(weight) = ctx.weight_kg else {
        errors.push("重量必须大于 0".to_string());
        return;
    };

    if weight <= 0.0 {
        errors.push("重量必须大于 0".to_string());
        return;
    }

    // 类型硬性上限独立于区域配置的上限
    if weight > ctx.waste_type.max_weight_kg {
        errors.push(format!(
            "{} 类型单次回收的重量上限为 {}kg",
            ctx.waste_type.name, ctx.waste_type.max_weight_kg
        ));
    }
}

fn score(ctx: &EligibilityContext) -> i32 {
    let base = ctx.waste_type.base_points;
    let subtype_bonus = ctx.subtype.as_ref().map(|s| s.bonus_points).unwrap_or(0);
    let weight_points = ctx
        .weight_kg
        .map(|w| (w * POINTS_PER_KG).floor() as i32)
        .unwrap_or(0);

    // 作用域匹配在求值内完成，上下文可以携带超出作用域的规则
    let rule_bonus: i32 = ctx
        .rules
        .iter()
        .filter(|r| r.active && r.applies_to(ctx.waste_type.id, ctx.user.locality_id))
        .filter(|r| rule_is_satisfied(r, ctx))
        .map(|r| r.bonus_points)
        .sum();

    base + subtype_bonus + weight_points + rule_bonus
}

/// 单条规则求值；各规则彼此独立，满足即加分
fn rule_is_satisfied(rule: &ValidationRule, ctx: &EligibilityContext) -> bool {
    let condition = match rule.parse_condition() {
        Ok(condition) => condition,
        Err(e) => {
            warn!(rule_id = rule.id, error = %e, "规则条件解析失败，跳过");
            return false;
        }
    };

    match condition {
        RuleCondition::Separation => ctx.subtype.is_some(),
        RuleCondition::MinWeight { min_weight_kg } => {
            ctx.weight_kg.is_some_and(|w| w >= min_weight_kg)
        }
        RuleCondition::Frequency { min_collections } => {
            ctx.collections_last_30_days >= min_collections
        }
    }
}

/// 回收资格校验服务
///
/// 通过仓储抽象装配上下文，便于 mock 测试。
pub struct EligibilityService {
    users: Arc<dyn UserRepositoryTrait>,
    catalog: Arc<dyn CatalogRepositoryTrait>,
    collections: Arc<dyn CollectionRepositoryTrait>,
}

impl EligibilityService {
    pub fn new(
        users: Arc<dyn UserRepositoryTrait>,
        catalog: Arc<dyn CatalogRepositoryTrait>,
        collections: Arc<dyn CollectionRepositoryTrait>,
    ) -> Self {
        Self {
            users,
            catalog,
            collections,
        }
    }

    /// 校验一次回收申请并计算积分
    #[instrument(skip(self))]
    pub async fn evaluate(
        &self,
        user_id: i64,
        waste_type_id: i64,
        subtype_id: Option<i64>,
        weight_kg: Option<f64>,
        requested_at: DateTime<Utc>,
    ) -> Result<Evaluation> {
        let Some(user) = self.users.get_user(user_id).await? else {
            return Ok(Evaluation::rejected("用户不存在"));
        };

        let Some(waste_type) = self.catalog.get_waste_type(waste_type_id).await? else {
            return Ok(Evaluation::rejected("废弃物类型不存在"));
        };

        // 子类型必须存在、启用且属于所选类型，否则按未指定处理
        let subtype = match subtype_id {
            Some(id) => self
                .catalog
                .get_waste_subtype(id)
                .await?
                .filter(|s| s.active && s.waste_type_id == waste_type_id),
            None => None,
        };

        let zone_config = self
            .catalog
            .get_zone_config(user.locality_id, waste_type_id)
            .await?;

        let last_collection_at = self
            .collections
            .last_of_type(user_id, waste_type_id)
            .await?
            .map(|c| c.requested_at);

        let collections_last_30_days = self
            .collections
            .count_since(user_id, requested_at - Duration::days(FREQUENCY_WINDOW_DAYS))
            .await?;

        let rules = self
            .catalog
            .list_matching_rules(waste_type_id, user.locality_id)
            .await?;

        let ctx = EligibilityContext {
            user,
            waste_type,
            subtype,
            zone_config,
            last_collection_at,
            collections_last_30_days,
            rules,
            weight_kg,
            requested_at,
        };

        Ok(evaluate(&ctx))
    }
}
