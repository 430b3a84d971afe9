//! 错误类型

use std::path::PathBuf;
use thiserror::Error;

/// puppet-slack 错误类型
///
/// 投递失败不在这里：单个渠道的失败只体现在 `DeliveryOutcome` 和日志里，
/// 不会向上抛出。
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Slack report config file {path} not readable: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("Invalid report: {0}")]
    Report(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Transport(String),
}

impl NotifyError {
    pub fn config(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        NotifyError::Config {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifyError>;
