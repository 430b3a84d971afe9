//! CLI command handling

pub mod check_config;
pub mod notify;
pub mod output;
pub mod render;

pub use check_config::*;
pub use notify::*;
pub use output::*;
pub use render::*;

use crate::config::{default_config_path, NotificationConfig};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// 加载配置：未指定路径时使用默认查找顺序
pub fn load_config(path: Option<PathBuf>) -> Result<NotificationConfig> {
    let path = path.unwrap_or_else(default_config_path);
    NotificationConfig::load(&path).with_context(|| format!("加载配置失败: {}", path.display()))
}
