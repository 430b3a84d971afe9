//! Output formatting for CLI commands

use crate::notification::DeliveryOutcome;
use serde::Serialize;

/// Pretty JSON, `{}` if serialization fails
pub fn to_json<T: Serialize>(data: &T) -> String {
    serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string())
}

/// One line per channel
pub fn format_outcomes(outcomes: &[DeliveryOutcome]) -> String {
    if outcomes.is_empty() {
        return "No notification sent (status not in filter)".to_string();
    }

    outcomes
        .iter()
        .map(|o| {
            if o.succeeded {
                format!("✅ {}", o.channel)
            } else {
                let status = o
                    .http_status
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                format!(
                    "❌ {} [{}] {}",
                    o.channel,
                    status,
                    o.error_detail.as_deref().unwrap_or("")
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
