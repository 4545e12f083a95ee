//! HTTP 请求与响应 DTO

pub mod request;
pub mod response;

pub use request::{ConsumeRequest, EvaluateCollectionRequest, RedeemRequest};
pub use response::{ApiResponse, DiscountDto, RedemptionDto};
