//! 基础设施错误类型
//!
//! 定义共享层（配置、数据库）的错误，业务错误由各服务自行定义。

use thiserror::Error;

/// 共享层错误类型
#[derive(Debug, Error)]
pub enum SharedError {
    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("日志初始化失败: {0}")]
    Observability(String),
}

/// 共享层 Result 类型别名
pub type Result<T> = std::result::Result<T, SharedError>;
