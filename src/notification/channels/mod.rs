//! 具体渠道实现

pub mod slack;

pub use slack::{HttpsTransport, SlackChannel, WebhookResponse, WebhookTransport};
