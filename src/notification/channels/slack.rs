//! Slack webhook 渠道
//!
//! 每个配置的 Slack channel 对应一个 `SlackChannel`，共享同一个 HTTP transport。

use crate::notification::channel::{NotificationChannel, SendResult};
use crate::notification::formatter::RenderedMessage;
use crate::notification::payload::SlackPayload;
use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::Url;
use std::sync::Arc;
use tracing::debug;

/// Webhook 响应
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

/// 发送 payload 的 HTTP 层
///
/// `Err` 表示请求没有拿到响应（DNS、连接、TLS 失败等）。
pub trait WebhookTransport: Send + Sync {
    fn post(&self, url: &Url, payload: &SlackPayload) -> Result<WebhookResponse>;
}

/// 基于 reqwest 的 HTTPS transport，使用默认超时
#[derive(Debug, Clone)]
pub struct HttpsTransport {
    client: Client,
}

impl HttpsTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client })
    }
}

impl WebhookTransport for HttpsTransport {
    fn post(&self, url: &Url, payload: &SlackPayload) -> Result<WebhookResponse> {
        let response = self
            .client
            .post(url.clone())
            .json(payload)
            .send()
            .with_context(|| format!("POST to {} failed", url.host_str().unwrap_or("webhook")))?;

        let status = response.status();
        let body = response.text().unwrap_or_default();

        Ok(WebhookResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}

/// Slack 渠道
pub struct SlackChannel {
    /// 已去掉前导反斜杠的渠道名
    channel: String,
    username: String,
    webhook: Url,
    transport: Arc<dyn WebhookTransport>,
}

impl SlackChannel {
    pub fn new(
        channel: impl Into<String>,
        username: impl Into<String>,
        webhook: Url,
        transport: Arc<dyn WebhookTransport>,
    ) -> Self {
        Self {
            channel: channel.into(),
            username: username.into(),
            webhook,
            transport,
        }
    }

    pub fn payload(&self, message: &RenderedMessage) -> SlackPayload {
        SlackPayload::new(&self.username, message, &self.channel)
    }
}

impl NotificationChannel for SlackChannel {
    fn name(&self) -> &str {
        &self.channel
    }

    fn send(&self, message: &RenderedMessage) -> Result<SendResult> {
        let payload = self.payload(message);
        debug!(channel = %self.channel, "Posting to Slack webhook");

        let response = self.transport.post(&self.webhook, &payload)?;

        if response.status == 200 {
            Ok(SendResult::Sent)
        } else {
            Ok(SendResult::Rejected {
                status: response.status,
                reason: response.reason,
                body: response.body,
            })
        }
    }
}
