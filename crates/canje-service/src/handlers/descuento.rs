//! 折扣相关 API 处理器

use axum::Json;
use axum::extract::State;

use super::AuthUser;
use crate::dto::{ApiResponse, DiscountDto};
use crate::error::Result;
use crate::state::AppState;

/// GET /descuentos/disponibles
///
/// 当前用户可负担的启用折扣，按所需积分升序。
pub async fn disponibles(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<Vec<DiscountDto>>>> {
    let discounts = state.redemptions.list_available(user_id).await?;
    let items = discounts.into_iter().map(DiscountDto::from).collect();
    Ok(Json(ApiResponse::success(items)))
}
