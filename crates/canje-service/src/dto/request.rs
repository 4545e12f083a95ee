//! 请求体定义

use serde::Deserialize;
use validator::Validate;

use crate::models::Redemption;

/// 兑换折扣请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RedeemRequest {
    #[validate(range(min = 1, message = "折扣 ID 必须为正数"))]
    pub discount_id: i64,
}

/// 核销兑换码请求
///
/// 码先规范化再校验长度，容忍复制粘贴带来的空白与小写。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumeRequest {
    pub code: String,
}

impl ConsumeRequest {
    /// 规范化兑换码：去除首尾空白并转大写
    pub fn normalized_code(&self) -> String {
        self.code.trim().to_uppercase()
    }
}

/// 回收资格校验请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateCollectionRequest {
    #[validate(range(min = 1, message = "废弃物类型 ID 必须为正数"))]
    pub waste_type_id: i64,
    pub waste_subtype_id: Option<i64>,
    pub weight_kg: Option<f64>,
}

// 编译期保证请求校验长度与模型的码长一致
const _: () = assert!(Redemption::CODE_LEN == 8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_request_normalizes_code() {
        let request = ConsumeRequest {
            code: " ab12cd34 ".to_string(),
        };
        assert_eq!(request.normalized_code(), "AB12CD34");
    }

    #[test]
    fn test_redeem_request_rejects_non_positive_id() {
        let request = RedeemRequest { discount_id: 0 };
        assert!(request.validate().is_err());

        let request = RedeemRequest { discount_id: 2 };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_evaluate_request_requires_positive_type_id() {
        let request = EvaluateCollectionRequest {
            waste_type_id: 0,
            waste_subtype_id: None,
            weight_kg: Some(5.0),
        };
        assert!(request.validate().is_err());
    }
}
