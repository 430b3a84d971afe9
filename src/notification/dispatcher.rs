//! 通知分发器 - 管理多个渠道并路由消息

use super::channel::{DeliveryOutcome, NotificationChannel};
use super::formatter::RenderedMessage;
use super::status::Status;
use std::sync::Arc;
use tracing::{debug, error, info};

/// 通知分发器 - 按状态过滤后逐个渠道投递
pub struct NotificationDispatcher {
    /// 所有注册的渠道
    channels: Vec<Arc<dyn NotificationChannel>>,
    /// 触发通知的运行状态
    statuses: Vec<String>,
    /// 每个渠道一个线程并发投递
    concurrent: bool,
}

impl NotificationDispatcher {
    /// 创建新的分发器
    pub fn new(statuses: Vec<String>) -> Self {
        Self {
            channels: Vec::new(),
            statuses,
            concurrent: false,
        }
    }

    /// 设置并发投递
    pub fn with_concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// 注册渠道
    pub fn register_channel(&mut self, channel: Arc<dyn NotificationChannel>) {
        debug!(channel = channel.name(), "Registering notification channel");
        self.channels.push(channel);
    }

    /// 运行状态是否需要通知
    pub fn accepts(&self, status: Status) -> bool {
        self.statuses.iter().any(|s| s == status.as_str())
    }

    /// 投递到所有渠道
    ///
    /// 状态不在过滤列表时什么也不做，返回空列表。单个渠道失败只记录在结果里，
    /// 不影响其他渠道。结果顺序与渠道注册顺序一致。
    pub fn dispatch(&self, status: Status, message: &RenderedMessage) -> Vec<DeliveryOutcome> {
        if !self.accepts(status) {
            debug!(status = %status, "Status not in filter, skipping notification");
            return Vec::new();
        }

        if self.concurrent {
            self.dispatch_concurrent(message)
        } else {
            self.channels
                .iter()
                .map(|channel| Self::deliver(channel.as_ref(), message))
                .collect()
        }
    }

    fn dispatch_concurrent(&self, message: &RenderedMessage) -> Vec<DeliveryOutcome> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = self
                .channels
                .iter()
                .map(|channel| {
                    let handle = scope.spawn(move || Self::deliver(channel.as_ref(), message));
                    (channel.name(), handle)
                })
                .collect();

            handles
                .into_iter()
                .map(|(name, handle)| {
                    handle.join().unwrap_or_else(|_| {
                        error!(channel = %name, "Delivery thread panicked");
                        DeliveryOutcome::transport_failed(name, "delivery thread panicked")
                    })
                })
                .collect()
        })
    }

    fn deliver(channel: &dyn NotificationChannel, message: &RenderedMessage) -> DeliveryOutcome {
        let name = channel.name();
        let outcome = DeliveryOutcome::from_result(name, channel.send(message));

        if outcome.succeeded {
            info!(channel = %name, "Notification sent to slack channel: {}", name);
        } else {
            error!(
                channel = %name,
                status = ?outcome.http_status,
                error = outcome.error_detail.as_deref().unwrap_or(""),
                "Failed to send notification to slack channel: {}",
                name
            );
        }

        outcome
    }

    /// 获取已注册的渠道数量
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// 获取已注册的渠道名称
    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::channel::SendResult;
    use anyhow::Result;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 测试用的 mock 渠道
    struct MockChannel {
        name: String,
        status: u16,
        send_count: AtomicUsize,
    }

    impl MockChannel {
        fn new(name: &str, status: u16) -> Self {
            Self {
                name: name.to_string(),
                status,
                send_count: AtomicUsize::new(0),
            }
        }

        fn get_send_count(&self) -> usize {
            self.send_count.load(Ordering::SeqCst)
        }
    }

    impl NotificationChannel for MockChannel {
        fn name(&self) -> &str {
            &self.name
        }

        fn send(&self, _message: &RenderedMessage) -> Result<SendResult> {
            self.send_count.fetch_add(1, Ordering::SeqCst);
            if self.status == 0 {
                anyhow::bail!("connection refused");
            }
            if self.status == 200 {
                Ok(SendResult::Sent)
            } else {
                Ok(SendResult::Rejected {
                    status: self.status,
                    reason: String::new(),
                    body: String::new(),
                })
            }
        }
    }

    fn message() -> RenderedMessage {
        RenderedMessage {
            pretext: ":balloon: web1 *changed* (prod)".to_string(),
            body: String::new(),
            color: "good".to_string(),
        }
    }

    fn default_statuses() -> Vec<String> {
        vec!["changed".to_string(), "failed".to_string()]
    }

    #[test]
    fn test_dispatcher_register_channel() {
        let mut dispatcher = NotificationDispatcher::new(default_statuses());
        assert_eq!(dispatcher.channel_count(), 0);

        dispatcher.register_channel(Arc::new(MockChannel::new("ops", 200)));
        assert_eq!(dispatcher.channel_count(), 1);
        assert_eq!(dispatcher.channel_names(), vec!["ops"]);
    }

    #[test]
    fn test_filtered_status_sends_nothing() {
        let mut dispatcher = NotificationDispatcher::new(default_statuses());
        let channel = Arc::new(MockChannel::new("ops", 200));
        dispatcher.register_channel(channel.clone());

        let outcomes = dispatcher.dispatch(Status::Unchanged, &message());
        assert!(outcomes.is_empty());
        assert_eq!(channel.get_send_count(), 0);
    }

    #[test]
    fn test_failures_are_independent() {
        let mut dispatcher = NotificationDispatcher::new(default_statuses());
        let down = Arc::new(MockChannel::new("down", 0));
        let ops = Arc::new(MockChannel::new("ops", 500));
        let alerts = Arc::new(MockChannel::new("alerts", 200));
        dispatcher.register_channel(down.clone());
        dispatcher.register_channel(ops.clone());
        dispatcher.register_channel(alerts.clone());

        let outcomes = dispatcher.dispatch(Status::Failed, &message());

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].channel, "down");
        assert!(!outcomes[0].succeeded);
        assert_eq!(outcomes[0].http_status, None);
        assert_eq!(outcomes[1].http_status, Some(500));
        assert!(!outcomes[1].succeeded);
        assert!(outcomes[2].succeeded);
        assert_eq!(alerts.get_send_count(), 1);
    }

    #[test]
    fn test_concurrent_preserves_channel_order() {
        let mut dispatcher = NotificationDispatcher::new(default_statuses()).with_concurrent(true);
        for (name, status) in [("a", 200), ("b", 500), ("c", 200)] {
            dispatcher.register_channel(Arc::new(MockChannel::new(name, status)));
        }

        let outcomes = dispatcher.dispatch(Status::Changed, &message());
        let names: Vec<&str> = outcomes.iter().map(|o| o.channel.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(!outcomes[1].succeeded);
    }
}
