//! Slack incoming-webhook payload
//!
//! ```json
//! {
//!   "username": "puppet",
//!   "attachments": [{
//!     "pretext": ":balloon: web1 *changed* (prod)",
//!     "text": "*changed*:  File[/etc/motd]\n",
//!     "mrkdwn_in": ["text", "pretext"],
//!     "color": "good"
//!   }],
//!   "channel": "#ops"
//! }
//! ```

use super::formatter::RenderedMessage;
use serde::{Deserialize, Serialize};

/// 请求体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackPayload {
    pub username: String,
    pub attachments: Vec<Attachment>,
    pub channel: String,
}

/// 带颜色侧边栏的消息块
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub pretext: String,
    pub text: String,
    /// 需要按 mrkdwn 渲染的字段
    pub mrkdwn_in: Vec<String>,
    pub color: String,
}

impl SlackPayload {
    pub fn new(username: &str, message: &RenderedMessage, channel: &str) -> Self {
        Self {
            username: username.to_string(),
            attachments: vec![Attachment {
                pretext: message.pretext.clone(),
                text: message.body.clone(),
                mrkdwn_in: vec!["text".to_string(), "pretext".to_string()],
                color: message.color.clone(),
            }],
            channel: channel.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_shape() {
        let message = RenderedMessage {
            pretext: ":warning: db1 *failed* (prod)".to_string(),
            body: "*failed*:  Service[pg]\n".to_string(),
            color: "warning".to_string(),
        };
        let payload = SlackPayload::new("puppet", &message, "alerts");

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "username": "puppet",
                "attachments": [{
                    "pretext": ":warning: db1 *failed* (prod)",
                    "text": "*failed*:  Service[pg]\n",
                    "mrkdwn_in": ["text", "pretext"],
                    "color": "warning"
                }],
                "channel": "alerts"
            })
        );
    }
}
