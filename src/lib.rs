//! puppet-slack - 把 Puppet run report 推送到 Slack

pub mod cli;
pub mod config;
pub mod error;
pub mod notification;
pub mod report;
pub mod reporter;

pub use config::NotificationConfig;
pub use error::NotifyError;
pub use notification::{
    DeliveryOutcome, MessageFormatter, NotificationBuilder, NotificationDispatcher,
    RenderedMessage, SlackPayload, Status, WebhookResponse, WebhookTransport,
};
pub use report::{LogEntry, LogLevel, Report, ResourceStatus};
pub use reporter::SlackReporter;
