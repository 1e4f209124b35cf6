//! 统一错误处理模块
//!
//! 定义基础设施层共用的错误类型，使用 thiserror 提供良好的错误信息。
//! 业务错误由各服务自行定义（如通知服务的 NotifyError）。

use thiserror::Error;

/// 基础设施错误类型
#[derive(Debug, Error)]
pub enum ClubError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, ClubError>;

impl ClubError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}
