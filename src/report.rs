//! Puppet run report 数据模型
//!
//! 字段布局沿用 Puppet 的 JSON report 格式（`puppet report` 的 to_data_hash），
//! 未识别的字段直接忽略。

use crate::error::{NotifyError, Result};
use crate::notification::status::Status;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// 一次 Puppet 运行的报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// 节点名
    pub host: String,
    /// Puppet environment
    #[serde(default)]
    pub environment: String,
    /// 整体运行状态
    pub status: Status,
    /// 资源状态，key 是资源标识（如 `File[/etc/motd]`）
    #[serde(default)]
    pub resource_statuses: BTreeMap<String, ResourceStatus>,
    /// 日志条目（按产生顺序，不保证有序）
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

/// 单个资源的执行结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceStatus {
    pub resource_type: String,
    pub title: String,
    #[serde(default)]
    pub changed: bool,
    #[serde(default)]
    pub failed: bool,
    #[serde(default)]
    pub skipped: bool,
}

impl ResourceStatus {
    /// `Type[title]` 形式的展示名
    pub fn display_name(&self) -> String {
        format!("{}[{}]", self.resource_type, self.title)
    }
}

/// 日志条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: DateTime<FixedOffset>,
    pub level: LogLevel,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub message: String,
}

/// Puppet 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Notice,
    Warning,
    Err,
    Alert,
    Emerg,
    Crit,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Notice => "notice",
            LogLevel::Warning => "warning",
            LogLevel::Err => "err",
            LogLevel::Alert => "alert",
            LogLevel::Emerg => "emerg",
            LogLevel::Crit => "crit",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Report {
    /// 从文件加载报告
    ///
    /// `.yaml` / `.yml` 按 YAML 解析，其余按 JSON 解析；`-` 表示从 stdin 读取 JSON。
    pub fn from_file(path: &Path) -> Result<Self> {
        if path == Path::new("-") {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            return Self::from_json(&content);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            NotifyError::Report(format!("cannot read {}: {}", path.display(), e))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| NotifyError::Report(e.to_string()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| NotifyError::Report(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_puppet_json_report() {
        let json = r#"{
            "host": "web1.example.com",
            "environment": "production",
            "status": "changed",
            "puppet_version": "8.4.0",
            "resource_statuses": {
                "File[/etc/motd]": {
                    "resource_type": "File",
                    "title": "/etc/motd",
                    "changed": true,
                    "failed": false,
                    "skipped": false,
                    "out_of_sync": true
                }
            },
            "logs": [{
                "level": "notice",
                "message": "content changed '{md5}a' to '{md5}b'",
                "source": "/Stage[main]/Main/File[/etc/motd]/content",
                "tags": ["notice", "file"],
                "time": "2024-03-01T10:15:30.123+00:00"
            }]
        }"#;

        let report = Report::from_json(json).unwrap();
        assert_eq!(report.host, "web1.example.com");
        assert_eq!(report.status, Status::Changed);
        assert_eq!(report.resource_statuses.len(), 1);
        let motd = &report.resource_statuses["File[/etc/motd]"];
        assert!(motd.changed);
        assert_eq!(motd.display_name(), "File[/etc/motd]");
        assert_eq!(report.logs[0].level, LogLevel::Notice);
    }

    #[test]
    fn test_unknown_status_is_accepted() {
        let report = Report::from_json(r#"{"host": "h", "status": "pending"}"#).unwrap();
        assert_eq!(report.status, Status::Unknown);
        assert!(report.logs.is_empty());
    }

    #[test]
    fn test_parse_yaml_report() {
        let yaml = r#"
host: db1
environment: staging
status: failed
logs:
  - time: "2024-03-01T10:15:30+02:00"
    level: err
    source: Puppet
    message: "Could not retrieve catalog"
"#;
        let report = Report::from_yaml(yaml).unwrap();
        assert_eq!(report.status, Status::Failed);
        assert_eq!(report.logs[0].level, LogLevel::Err);
        assert_eq!(report.logs[0].level.to_string(), "err");
    }

    #[test]
    fn test_invalid_report_is_rejected() {
        let err = Report::from_json(r#"{"status": "changed"}"#).unwrap_err();
        assert!(matches!(err, NotifyError::Report(_)));
    }
}
