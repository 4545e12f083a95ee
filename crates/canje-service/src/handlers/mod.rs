//! HTTP 处理器
//!
//! 调用方身份由网关校验后通过 `X-User-Id` 请求头传入，
//! [`AuthUser`] 提取器负责解析；认证协议本身不在本服务内。

pub mod canje;
pub mod descuento;
pub mod health;
pub mod recoleccion;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::CanjeError;

/// 请求头中的用户身份
pub const USER_ID_HEADER: &str = "x-user-id";

/// 已认证用户提取器
///
/// 从 `X-User-Id` 请求头解析用户 ID；缺失或非法时拒绝请求。
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = CanjeError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                CanjeError::Validation("缺少或非法的 X-User-Id 请求头".to_string())
            })?;

        Ok(AuthUser(user_id))
    }
}
