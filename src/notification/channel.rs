//! 通知渠道 trait 定义

use super::formatter::RenderedMessage;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// 发送结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendResult {
    /// 对端返回 200
    Sent,
    /// 对端返回非 200
    Rejected {
        status: u16,
        reason: String,
        body: String,
    },
}

/// 单个渠道一次投递的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub channel: String,
    pub succeeded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl DeliveryOutcome {
    pub fn sent(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            succeeded: true,
            http_status: Some(200),
            error_detail: None,
        }
    }

    pub fn rejected(channel: impl Into<String>, status: u16, detail: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            succeeded: false,
            http_status: Some(status),
            error_detail: Some(detail.into()),
        }
    }

    /// 请求本身失败（连接、TLS 等），没有 HTTP 状态码
    pub fn transport_failed(channel: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            succeeded: false,
            http_status: None,
            error_detail: Some(detail.into()),
        }
    }

    pub fn from_result(channel: &str, result: Result<SendResult>) -> Self {
        match result {
            Ok(SendResult::Sent) => Self::sent(channel),
            Ok(SendResult::Rejected { status, reason, body }) => Self::rejected(
                channel,
                status,
                format!("POST returned {} {} (body={})", status, reason, body),
            ),
            Err(e) => Self::transport_failed(channel, format!("{:#}", e)),
        }
    }
}

/// 通知渠道 trait
pub trait NotificationChannel: Send + Sync {
    /// 渠道名称（用于日志和结果）
    fn name(&self) -> &str;

    /// 同步发送消息
    fn send(&self, message: &RenderedMessage) -> Result<SendResult>;
}

/// 去掉渠道名开头的一个反斜杠
///
/// YAML 里常写成 `'\#ops'` 以免 `#` 被当作注释。
pub fn normalize_channel_name(channel: &str) -> &str {
    channel.strip_prefix('\\').unwrap_or(channel)
}
