//! slack.yaml 配置加载
//!
//! ```yaml
//! webhook: https://hooks.slack.com/services/T000/B000/XXXX
//! channels:
//!   - '#ops'
//!   - '\#alerts'
//! statuses: changed,failed
//! username: puppet
//! ```

use crate::error::{NotifyError, Result};
use crate::notification::status::Status;
use reqwest::Url;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "slack.yaml";
pub const DEFAULT_STATUSES: &str = "changed,failed";
pub const DEFAULT_USERNAME: &str = "puppet";

/// 配置文件原始内容
#[derive(Debug, Deserialize)]
struct RawConfig {
    webhook: Option<String>,
    #[serde(default)]
    channels: Vec<String>,
    statuses: Option<String>,
    username: Option<String>,
}

/// 通知配置（已校验）
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// Slack incoming webhook，必须是 https
    pub webhook: Url,
    /// 目标渠道，按配置顺序投递
    pub channels: Vec<String>,
    /// 触发通知的运行状态
    pub statuses: Vec<String>,
    /// 消息显示的用户名
    pub username: String,
}

impl NotificationConfig {
    pub fn new(webhook: Url, channels: Vec<String>) -> Self {
        Self {
            webhook,
            channels,
            statuses: parse_statuses(DEFAULT_STATUSES),
            username: DEFAULT_USERNAME.to_string(),
        }
    }

    pub fn with_statuses(mut self, statuses: &str) -> Self {
        self.statuses = parse_statuses(statuses);
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// webhook 路径里带有凭据，日志和输出只显示 scheme 与 host
    pub fn redacted_webhook(&self) -> String {
        format!(
            "{}://{}/...",
            self.webhook.scheme(),
            self.webhook.host_str().unwrap_or("")
        )
    }

    /// 运行状态是否在过滤列表中
    pub fn should_notify(&self, status: Status) -> bool {
        self.statuses.iter().any(|s| s == status.as_str())
    }

    /// 从 slack.yaml 加载
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(NotifyError::config(path, "file does not exist"));
        }

        let content = std::fs::read_to_string(path).map_err(|e| NotifyError::config(path, e))?;
        Self::from_yaml(&content).map_err(|e| match e {
            NotifyError::Config { reason, .. } => NotifyError::config(path, reason),
            other => other,
        })
    }

    /// 解析 YAML 内容（错误中的路径为空）
    pub fn from_yaml(content: &str) -> Result<Self> {
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| NotifyError::config("", e))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        let webhook = raw
            .webhook
            .ok_or_else(|| NotifyError::config("", "missing 'webhook'"))?;
        let webhook = parse_webhook(&webhook)?;

        if raw.channels.is_empty() {
            return Err(NotifyError::config("", "'channels' must list at least one channel"));
        }

        let statuses = raw.statuses.as_deref().unwrap_or(DEFAULT_STATUSES);

        Ok(Self {
            webhook,
            channels: raw.channels,
            statuses: parse_statuses(statuses),
            username: raw.username.unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
        })
    }
}

/// 校验 webhook：https，端口只能是 443
pub fn parse_webhook(webhook: &str) -> Result<Url> {
    let url = Url::parse(webhook.trim())
        .map_err(|e| NotifyError::config("", format!("invalid webhook '{}': {}", webhook, e)))?;

    if url.scheme() != "https" {
        return Err(NotifyError::config(
            "",
            format!("webhook must use https, got '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(NotifyError::config("", "webhook has no host"));
    }
    if let Some(port) = url.port() {
        if port != 443 {
            return Err(NotifyError::config("", format!("webhook port must be 443, got {}", port)));
        }
    }

    Ok(url)
}

/// `"changed, failed"` -> `["changed", "failed"]`
pub fn parse_statuses(statuses: &str) -> Vec<String> {
    statuses
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// 查找配置文件路径
///
/// 顺序：`$PUPPET_SLACK_CONFIG`，`$PUPPET_CONFDIR/slack.yaml`，
/// `/etc/puppetlabs/puppet/slack.yaml`（存在时），`~/.puppetlabs/etc/puppet/slack.yaml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("PUPPET_SLACK_CONFIG") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Ok(confdir) = std::env::var("PUPPET_CONFDIR") {
        if !confdir.is_empty() {
            return PathBuf::from(confdir).join(CONFIG_FILE_NAME);
        }
    }

    let system = Path::new("/etc/puppetlabs/puppet").join(CONFIG_FILE_NAME);
    if system.exists() {
        return system;
    }

    // 非 root 运行的 puppet 使用用户目录下的 confdir
    dirs::home_dir()
        .map(|home| home.join(".puppetlabs/etc/puppet").join(CONFIG_FILE_NAME))
        .unwrap_or(system)
}
