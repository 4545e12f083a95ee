//! 兑换相关 API 处理器

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use super::AuthUser;
use crate::dto::{ApiResponse, ConsumeRequest, RedeemRequest, RedemptionDto};
use crate::error::{CanjeError, Result};
use crate::models::Redemption;
use crate::service::dto::CodeValidation;
use crate::state::AppState;

/// POST /canjes/realizar
///
/// 用积分兑换折扣，返回兑换码。
pub async fn realizar(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<RedeemRequest>,
) -> Result<Json<ApiResponse<RedemptionDto>>> {
    request.validate()?;

    let redemption = state.redemptions.redeem(user_id, request.discount_id).await?;

    Ok(Json(ApiResponse::success_with_message(
        redemption.into(),
        "兑换成功",
    )))
}

/// POST /canjes/utilizar
///
/// 商家核销兑换码；无需用户认证，码本身即凭证。
pub async fn utilizar(
    State(state): State<AppState>,
    Json(request): Json<ConsumeRequest>,
) -> Result<Json<ApiResponse<RedemptionDto>>> {
    let code = request.normalized_code();
    if code.len() != Redemption::CODE_LEN {
        return Err(CanjeError::Validation(format!(
            "兑换码必须为 {} 位",
            Redemption::CODE_LEN
        )));
    }

    let redemption = state.consumes.consume(&code).await?;

    Ok(Json(ApiResponse::success_with_message(
        redemption.into(),
        "核销成功",
    )))
}

/// GET /canjes/validar/{code}
///
/// 只读预检兑换码状态，不产生任何副作用。
pub async fn validar(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<CodeValidation>>> {
    let validation = state.consumes.validate(code.trim()).await?;
    Ok(Json(ApiResponse::success(validation)))
}

/// GET /canjes/usuario
///
/// 当前用户的兑换历史，按兑换时间倒序。
pub async fn historial(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<Vec<RedemptionDto>>>> {
    let redemptions = state.redemptions.history(user_id).await?;
    let items = redemptions.into_iter().map(RedemptionDto::from).collect();
    Ok(Json(ApiResponse::success(items)))
}
