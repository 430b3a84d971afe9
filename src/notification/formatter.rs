//! 消息格式化模块 - 将 Puppet run report 转换为 Slack 消息
//!
//! 消息结构：
//! - pretext: `<icon> <host> *<status>* (<environment>)`
//! - body: 资源变更摘要 + 日志代码块
//! - color: 运行状态对应的颜色
//!
//! 日志部分超过 `MAX_LOG_CHARS` 个字符时截断，并追加 `...` 标记。

use super::status::{classify_resource, classify_run, Status};
use crate::config::NotificationConfig;
use crate::error::{NotifyError, Result};
use crate::report::{LogEntry, LogLevel, Report};
use serde::{Deserialize, Serialize};

/// 日志部分最多保留的字符数
pub const MAX_LOG_CHARS: usize = 6000;

/// 截断标记
pub const TRUNCATION_MARKER: &str = "...";

/// 标记"值从 A 变为 B"的日志
const CHANGE_PATTERN: &str = "changed to";

/// 日志时间格式
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// 渲染后的消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub pretext: String,
    pub body: String,
    pub color: String,
}

/// 消息格式化器
#[derive(Debug, Clone, Copy)]
pub struct MessageFormatter {
    max_log_chars: usize,
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageFormatter {
    pub fn new() -> Self {
        Self {
            max_log_chars: MAX_LOG_CHARS,
        }
    }

    /// 设置日志部分的字符上限
    pub fn with_max_log_chars(mut self, max_log_chars: usize) -> Self {
        self.max_log_chars = max_log_chars;
        self
    }

    /// 渲染报告
    ///
    /// 纯函数：同样的输入总是得到同样的输出。只有报告结构不合法时才会失败。
    pub fn render(&self, report: &Report, _config: &NotificationConfig) -> Result<RenderedMessage> {
        if report.host.trim().is_empty() {
            return Err(NotifyError::Report("report has no host".to_string()));
        }

        let status = classify_run(report.status);

        let mut body = Self::resources_message(report);
        body.push_str(&self.logs_message(report));

        Ok(RenderedMessage {
            pretext: Self::pretext(report, status),
            body,
            color: status.color().to_string(),
        })
    }

    fn pretext(report: &Report, status: Status) -> String {
        format!(
            "{} {} *{}* ({})",
            status.icon(),
            report.host,
            status,
            report.environment
        )
    }

    /// 资源部分：只列出 changed 或 failed 的资源，按状态分组
    pub fn resources_message(report: &Report) -> String {
        let mut groups: Vec<(Status, Vec<String>)> = Vec::new();

        for resource in report
            .resource_statuses
            .values()
            .filter(|r| r.changed || r.failed)
        {
            let status = classify_resource(resource);
            match groups.iter_mut().find(|(s, _)| *s == status) {
                Some((_, names)) => names.push(resource.display_name()),
                None => groups.push((status, vec![resource.display_name()])),
            }
        }

        groups
            .iter()
            .map(|(status, names)| format!("*{}*:  {}\n", status, names.join(", ")))
            .collect()
    }

    /// 日志部分：没有选中任何条目时返回空字符串
    pub fn logs_message(&self, report: &Report) -> String {
        let run_failed = report.status == Status::Failed;

        let mut entries: Vec<&LogEntry> = report
            .logs
            .iter()
            .filter(|entry| run_failed || is_relevant(entry))
            .collect();

        if entries.is_empty() {
            return String::new();
        }

        // sort_by_key 是稳定排序，时间相同的条目保持原顺序
        entries.sort_by_key(|entry| entry.time);

        let log_text = entries
            .iter()
            .map(|entry| format_entry(entry))
            .collect::<Vec<_>>()
            .join("\n");

        format!("```\n{}\n```", truncate_chars(&log_text, self.max_log_chars))
    }
}

/// 便捷函数：用默认格式化器渲染
pub fn render(report: &Report, config: &NotificationConfig) -> Result<RenderedMessage> {
    MessageFormatter::new().render(report, config)
}

fn is_relevant(entry: &LogEntry) -> bool {
    matches!(entry.level, LogLevel::Warning | LogLevel::Err) || entry.message.contains(CHANGE_PATTERN)
}

fn format_entry(entry: &LogEntry) -> String {
    let message: String = entry
        .message
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();

    format!(
        "{} - {} - {}: {}",
        entry.time.format(TIME_FORMAT),
        entry.level,
        entry.source,
        message
    )
}

/// 超过 `max_chars` 个字符时保留前 `max_chars` 个字符并另起一行追加标记
fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}\n{}", &text[..idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
