//! Slack report 处理入口
//!
//! 每次 Puppet 运行结束后调用一次 `SlackReporter::process`。

use crate::config::NotificationConfig;
use crate::error::{NotifyError, Result};
use crate::notification::{
    DeliveryOutcome, MessageFormatter, NotificationBuilder, NotificationDispatcher,
    RenderedMessage, WebhookTransport,
};
use crate::report::Report;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// 渲染并投递 run report
pub struct SlackReporter {
    config: NotificationConfig,
    formatter: MessageFormatter,
    dispatcher: NotificationDispatcher,
}

impl SlackReporter {
    /// 使用默认 HTTPS transport
    pub fn new(config: NotificationConfig) -> Result<Self> {
        let dispatcher = NotificationBuilder::new(config.clone())
            .build()
            .map_err(|e| NotifyError::Transport(format!("{:#}", e)))?;
        Ok(Self::with_dispatcher(config, dispatcher))
    }

    /// 使用自定义 transport（测试、代理等）
    pub fn with_transport(config: NotificationConfig, transport: Arc<dyn WebhookTransport>) -> Result<Self> {
        let dispatcher = NotificationBuilder::new(config.clone())
            .transport(transport)
            .build()
            .map_err(|e| NotifyError::Transport(format!("{:#}", e)))?;
        Ok(Self::with_dispatcher(config, dispatcher))
    }

    pub fn with_dispatcher(config: NotificationConfig, dispatcher: NotificationDispatcher) -> Self {
        Self {
            config,
            formatter: MessageFormatter::new(),
            dispatcher,
        }
    }

    /// 从配置文件创建；配置不可用时在任何网络请求之前失败
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let config = NotificationConfig::load(path)?;
        Self::new(config)
    }

    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    pub fn render(&self, report: &Report) -> Result<RenderedMessage> {
        self.formatter.render(report, &self.config)
    }

    /// 处理一份报告
    ///
    /// 状态不在过滤列表时返回空列表。部分渠道失败不算错误，结果里逐个体现。
    pub fn process(&self, report: &Report) -> Result<Vec<DeliveryOutcome>> {
        if !self.dispatcher.accepts(report.status) {
            debug!(host = %report.host, status = %report.status, "Run status not configured for notification");
            return Ok(Vec::new());
        }

        let message = self.render(report)?;
        let outcomes = self.dispatcher.dispatch(report.status, &message);

        let failed = outcomes.iter().filter(|o| !o.succeeded).count();
        if failed > 0 {
            warn!(
                host = %report.host,
                failed,
                total = outcomes.len(),
                "Some Slack channels did not receive the notification"
            );
        }

        Ok(outcomes)
    }
}
