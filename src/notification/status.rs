//! Status classification for Puppet runs and resources
//!
//! Every run and every resource maps onto one fixed taxonomy. Each status
//! carries the Slack attachment color and emoji used to display it:
//! - changed: :balloon: / good
//! - failed: :warning: / warning
//! - unchanged: :zzz: / #cccccc
//! - anything else: :grey_question: / warning

use crate::report::ResourceStatus;

/// Run or resource status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Changed,
    Failed,
    Unchanged,
    Skipped,
    Unknown,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Status::parse(&s)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Changed => "changed",
            Status::Failed => "failed",
            Status::Unchanged => "unchanged",
            Status::Skipped => "skipped",
            Status::Unknown => "unknown",
        }
    }

    /// Parse a status name; unrecognized names become `Unknown`
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "changed" => Status::Changed,
            "failed" => Status::Failed,
            "unchanged" => Status::Unchanged,
            "skipped" => Status::Skipped,
            _ => Status::Unknown,
        }
    }

    /// Slack attachment color
    pub fn color(&self) -> &'static str {
        match self {
            Status::Changed => "good",
            Status::Failed => "warning",
            Status::Unchanged => "#cccccc",
            _ => "warning",
        }
    }

    /// Slack emoji shortcode
    pub fn icon(&self) -> &'static str {
        match self {
            Status::Changed => ":balloon:",
            Status::Failed => ":warning:",
            Status::Unchanged => ":zzz:",
            _ => ":grey_question:",
        }
    }
}

/// Classify a single resource
///
/// First match wins: failed, then skipped, then changed, otherwise unchanged.
pub fn classify_resource(resource: &ResourceStatus) -> Status {
    if resource.failed {
        Status::Failed
    } else if resource.skipped {
        Status::Skipped
    } else if resource.changed {
        Status::Changed
    } else {
        Status::Unchanged
    }
}

/// Classify the overall run status
pub fn classify_run(status: Status) -> Status {
    status
}
