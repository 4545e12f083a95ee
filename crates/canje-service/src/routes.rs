//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppState};

/// 构建兑换相关的路由
fn canje_routes() -> Router<AppState> {
    Router::new()
        .route("/canjes/realizar", post(handlers::canje::realizar))
        .route("/canjes/utilizar", post(handlers::canje::utilizar))
        .route("/canjes/validar/{code}", get(handlers::canje::validar))
        .route("/canjes/usuario", get(handlers::canje::historial))
        .route(
            "/descuentos/disponibles",
            get(handlers::descuento::disponibles),
        )
        .route(
            "/recolecciones/validar",
            post(handlers::recoleccion::validar),
        )
}

/// 组装完整的应用路由
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .merge(canje_routes())
        .route("/health", get(handlers::health::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
