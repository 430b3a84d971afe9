//! Shared helpers for integration tests

#![allow(dead_code)]

use anyhow::Result;
use puppet_slack::{
    LogEntry, LogLevel, NotificationConfig, Report, ResourceStatus, SlackPayload, Status,
    WebhookResponse, WebhookTransport,
};
use reqwest::Url;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

pub const WEBHOOK: &str = "https://hooks.slack.com/services/T000/B000/XXXX";

/// Records every POST and answers with a per-channel status code (200 by default)
#[derive(Default)]
pub struct RecordingTransport {
    statuses: HashMap<String, u16>,
    unreachable: Vec<String>,
    pub posted: Mutex<Vec<(Url, SlackPayload)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, channel: &str, status: u16) -> Self {
        self.statuses.insert(channel.to_string(), status);
        self
    }

    pub fn unreachable(mut self, channel: &str) -> Self {
        self.unreachable.push(channel.to_string());
        self
    }

    pub fn posted(&self) -> Vec<(Url, SlackPayload)> {
        self.posted.lock().unwrap().clone()
    }
}

impl WebhookTransport for RecordingTransport {
    fn post(&self, url: &Url, payload: &SlackPayload) -> Result<WebhookResponse> {
        self.posted.lock().unwrap().push((url.clone(), payload.clone()));

        if self.unreachable.contains(&payload.channel) {
            anyhow::bail!("error trying to connect: tcp connect error: Connection refused");
        }

        let status = self.statuses.get(&payload.channel).copied().unwrap_or(200);
        Ok(WebhookResponse {
            status,
            reason: if status == 200 { "OK" } else { "Internal Server Error" }.to_string(),
            body: if status == 200 { "ok" } else { "server_error" }.to_string(),
        })
    }
}

pub fn config(channels: &[&str]) -> NotificationConfig {
    NotificationConfig::new(
        WEBHOOK.parse().unwrap(),
        channels.iter().map(|c| c.to_string()).collect(),
    )
}

pub fn report(status: Status) -> Report {
    Report {
        host: "web1".to_string(),
        environment: "prod".to_string(),
        status,
        resource_statuses: BTreeMap::new(),
        logs: Vec::new(),
    }
}

pub fn resource(resource_type: &str, title: &str) -> ResourceStatus {
    ResourceStatus {
        resource_type: resource_type.to_string(),
        title: title.to_string(),
        ..Default::default()
    }
}

pub fn log(time: &str, level: LogLevel, message: &str) -> LogEntry {
    LogEntry {
        time: chrono::DateTime::parse_from_rfc3339(time).unwrap(),
        level,
        source: "Puppet".to_string(),
        message: message.to_string(),
    }
}
