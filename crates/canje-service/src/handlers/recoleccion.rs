//! 回收资格校验 API 处理器

use axum::Json;
use axum::extract::State;
use chrono::Utc;
use validator::Validate;

use super::AuthUser;
use crate::dto::{ApiResponse, EvaluateCollectionRequest};
use crate::error::Result;
use crate::service::Evaluation;
use crate::state::AppState;

/// POST /recolecciones/validar
///
/// 校验一次回收申请并返回错误列表与可得积分；只读求值，
/// 不落库、不加分，回收登记层在确认前调用。
pub async fn validar(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<EvaluateCollectionRequest>,
) -> Result<Json<ApiResponse<Evaluation>>> {
    request.validate()?;

    let evaluation = state
        .eligibility
        .evaluate(
            user_id,
            request.waste_type_id,
            request.waste_subtype_id,
            request.weight_kg,
            Utc::now(),
        )
        .await?;

    Ok(Json(ApiResponse::success(evaluation)))
}
