//! 通知系统构建器 - 根据配置注册渠道

use super::channel::normalize_channel_name;
use super::channels::slack::{HttpsTransport, SlackChannel, WebhookTransport};
use super::dispatcher::NotificationDispatcher;
use super::formatter::RenderedMessage;
use super::payload::SlackPayload;
use crate::config::NotificationConfig;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// 通知系统构建器
pub struct NotificationBuilder {
    config: NotificationConfig,
    transport: Option<Arc<dyn WebhookTransport>>,
    concurrent: bool,
}

impl NotificationBuilder {
    pub fn new(config: NotificationConfig) -> Self {
        Self {
            config,
            transport: None,
            concurrent: false,
        }
    }

    /// 替换 HTTP transport（默认 `HttpsTransport`）
    pub fn transport(mut self, transport: Arc<dyn WebhookTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// 是否并发投递
    pub fn concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// 为每个配置的渠道注册一个 `SlackChannel`
    pub fn build(self) -> Result<NotificationDispatcher> {
        let transport: Arc<dyn WebhookTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpsTransport::new()?),
        };

        let mut dispatcher = NotificationDispatcher::new(self.config.statuses.clone())
            .with_concurrent(self.concurrent);

        for channel in &self.config.channels {
            let name = normalize_channel_name(channel);
            debug!(channel = %name, "Configured Slack channel");
            dispatcher.register_channel(Arc::new(SlackChannel::new(
                name,
                self.config.username.clone(),
                self.config.webhook.clone(),
                transport.clone(),
            )));
        }

        Ok(dispatcher)
    }

    /// 每个渠道的 payload 预览，不发送
    pub fn preview(&self, message: &RenderedMessage) -> Vec<SlackPayload> {
        self.config
            .channels
            .iter()
            .map(|channel| {
                SlackPayload::new(&self.config.username, message, normalize_channel_name(channel))
            })
            .collect()
    }
}
