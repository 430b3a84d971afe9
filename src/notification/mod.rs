//! 通知层 - 把 run report 渲染成 Slack 消息并投递到各个渠道
//!
//! # 流程
//! 1. `status` 给运行和资源分类，决定颜色和图标
//! 2. `MessageFormatter` 渲染 pretext / body / color
//! 3. `NotificationDispatcher` 按状态过滤，然后逐个渠道 POST
//!
//! # 使用示例
//! ```ignore
//! use puppet_slack::notification::{MessageFormatter, NotificationBuilder};
//!
//! let dispatcher = NotificationBuilder::new(config.clone()).build()?;
//! let message = MessageFormatter::new().render(&report, &config)?;
//! let outcomes = dispatcher.dispatch(report.status, &message);
//! ```

pub mod builder;
pub mod channel;
pub mod channels;
pub mod dispatcher;
pub mod formatter;
pub mod payload;
pub mod status;

pub use builder::NotificationBuilder;
pub use channel::{normalize_channel_name, DeliveryOutcome, NotificationChannel, SendResult};
pub use channels::{HttpsTransport, SlackChannel, WebhookResponse, WebhookTransport};
pub use dispatcher::NotificationDispatcher;
pub use formatter::{render, MessageFormatter, RenderedMessage};
pub use payload::{Attachment, SlackPayload};
pub use status::{classify_resource, classify_run, Status};
