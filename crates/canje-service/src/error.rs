//! 兑换服务错误类型
//!
//! 区分业务校验错误与系统错误：业务错误是确定性的返回值，携带
//! 可读信息并映射为 400 类响应；系统错误在服务边界处捕获并以
//! 统一的"内部错误"对外暴露。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// 兑换服务错误类型
#[derive(Debug, Error)]
pub enum CanjeError {
    // === 用户相关错误 ===
    #[error("用户不存在: {0}")]
    UserNotFound(i64),

    #[error("用户已停用: {0}")]
    UserInactive(i64),

    #[error("积分不足: 需要 {required}, 当前 {available}")]
    InsufficientPoints { required: i32, available: i32 },

    // === 折扣相关错误 ===
    #[error("折扣不存在: {0}")]
    DiscountNotFound(i64),

    #[error("折扣未启用: {0}")]
    DiscountInactive(i64),

    #[error("折扣尚未开始: {0}")]
    DiscountNotYetAvailable(i64),

    #[error("折扣已过期: {0}")]
    DiscountExpired(i64),

    #[error("折扣已兑完: {0}")]
    SoldOut(i64),

    // === 兑换码相关错误 ===
    #[error("兑换码无效: {0}")]
    InvalidCode(String),

    #[error("兑换码已被使用: {0}")]
    AlreadyUsed(String),

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON 序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("参数校验失败: {0}")]
    Validation(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 兑换服务 Result 类型别名
pub type Result<T> = std::result::Result<T, CanjeError>;

impl CanjeError {
    /// 检查是否为业务错误（非系统错误）
    ///
    /// 业务错误是确定性的校验结果，调用方据此区分
    /// "请求不合法"与"系统故障"。
    pub fn is_business_error(&self) -> bool {
        !matches!(
            self,
            Self::Database(_) | Self::Serialization(_) | Self::Internal(_)
        )
    }

    /// 获取错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::UserInactive(_) => "USER_INACTIVE",
            Self::InsufficientPoints { .. } => "INSUFFICIENT_POINTS",
            Self::DiscountNotFound(_) => "DISCOUNT_NOT_FOUND",
            Self::DiscountInactive(_) => "DISCOUNT_INACTIVE",
            Self::DiscountNotYetAvailable(_) => "DISCOUNT_NOT_YET_AVAILABLE",
            Self::DiscountExpired(_) => "DISCOUNT_EXPIRED",
            Self::SoldOut(_) => "SOLD_OUT",
            Self::InvalidCode(_) => "INVALID_CODE",
            Self::AlreadyUsed(_) => "ALREADY_USED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UserNotFound(_) | Self::DiscountNotFound(_) | Self::InvalidCode(_) => {
                StatusCode::NOT_FOUND
            }

            Self::AlreadyUsed(_) | Self::SoldOut(_) => StatusCode::CONFLICT,

            Self::UserInactive(_)
            | Self::InsufficientPoints { .. }
            | Self::DiscountInactive(_)
            | Self::DiscountNotYetAvailable(_)
            | Self::DiscountExpired(_)
            | Self::Validation(_) => StatusCode::BAD_REQUEST,

            Self::Database(_) | Self::Serialization(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for CanjeError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Serialization(e) => {
                tracing::error!(error = %e, "JSON 处理失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for CanjeError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_business_error() {
        assert!(CanjeError::UserNotFound(1).is_business_error());
        assert!(CanjeError::SoldOut(3).is_business_error());
        assert!(
            CanjeError::InsufficientPoints {
                required: 100,
                available: 50
            }
            .is_business_error()
        );
        assert!(!CanjeError::Internal("panic".to_string()).is_business_error());
        assert!(!CanjeError::Database(sqlx::Error::RowNotFound).is_business_error());
    }

    #[test]
    fn test_error_code() {
        assert_eq!(CanjeError::SoldOut(1).error_code(), "SOLD_OUT");
        assert_eq!(
            CanjeError::AlreadyUsed("AB12CD34".to_string()).error_code(),
            "ALREADY_USED"
        );
        assert_eq!(
            CanjeError::Database(sqlx::Error::RowNotFound).error_code(),
            "DATABASE_ERROR"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CanjeError::UserNotFound(1).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(CanjeError::SoldOut(1).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            CanjeError::AlreadyUsed("AB12CD34".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            CanjeError::DiscountExpired(1).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CanjeError::Internal("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_insufficient_points_message_carries_both_numbers() {
        let err = CanjeError::InsufficientPoints {
            required: 100,
            available: 50,
        };
        let msg = err.to_string();
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }
}
