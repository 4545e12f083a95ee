//! 兑换服务入口
//!
//! 启动顺序：配置 -> 日志 -> 数据库（含迁移）-> 通知分发器 ->
//! HTTP 服务。收到 SIGTERM/Ctrl+C 后优雅停机：先停止接收新
//! 请求，再等待通知分发器把通道内的消息消费完。

use std::time::Duration;

use canje_service::notification::NotificationDispatcher;
use canje_service::{AppState, routes};
use eco_shared::{config::AppConfig, database::Database, observability};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load("canje-service").unwrap_or_default();

    observability::init(&config.observability)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(environment = %config.environment, %addr, "canje-service 启动");

    let db = Database::connect(&config.database).await?;
    sqlx::migrate!("../../migrations").run(db.pool()).await?;

    let (notifier, dispatcher) = NotificationDispatcher::new(&config.notification)?;
    let dispatcher_handle = tokio::spawn(dispatcher.run());

    let state = AppState::new(db.pool().clone(), notifier);
    let app = routes::app_router(
        state,
        Duration::from_secs(config.server.request_timeout_seconds),
    );

    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "开始监听");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // AppState 随 serve 结束被丢弃，发送端关闭后分发器自行退出
    info!("HTTP 服务已停止，等待通知分发器排空");
    dispatcher_handle.await?;

    db.close().await;
    info!("canje-service 已退出");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .unwrap_or_else(|e| tracing::error!(error = %e, "无法安装 Ctrl+C 处理器"));
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "无法安装 SIGTERM 处理器"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("收到 Ctrl+C，开始停机"),
        _ = terminate => info!("收到 SIGTERM，开始停机"),
    }
}
