//! Shared presentation: endpoint responses, lifecycle outcomes, JSON output.

use crate::api::ApiResponse;
use crate::error::ApiError;
use crate::lifecycle::LifecycleOutcome;
use owo_colors::OwoColorize;
use serde::Serialize;

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::ConfigError(format!("Failed to render JSON: {}", e)))
}

/// Successful responses become a status line; failures become `Rejected`.
pub fn format_response(response: &ApiResponse) -> Result<String, ApiError> {
    if !response.success {
        return Err(ApiError::Rejected(
            response.message.clone().unwrap_or_else(|| "Request failed".to_string()),
        ));
    }
    let mut line = match (&response.field, &response.value) {
        (Some(field), Some(value)) => format!("{} = {}", field, value),
        _ => response.message.clone().unwrap_or_default(),
    };
    if response.field.is_some() {
        if let Some(message) = &response.message {
            line = format!("{} ({})", line, message);
        }
    }
    Ok(format!("{} {}", "✓".green(), line))
}

pub fn format_lifecycle_outcome(hook: &str, outcome: &LifecycleOutcome) -> Result<String, ApiError> {
    let line = match outcome {
        LifecycleOutcome::Created => "Theme settings created with defaults".to_string(),
        LifecycleOutcome::Unchanged => "Theme settings already up to date".to_string(),
        LifecycleOutcome::Migrated(report) => {
            let mut s = format!(
                "Theme settings migrated from schema v{}",
                report.from_version
            );
            if !report.moved.is_empty() {
                s.push_str(&format!("\n  Moved: {}", report.moved.join(", ")));
            }
            if !report.dropped.is_empty() {
                s.push_str(&format!("\n  Dropped: {}", report.dropped.join(", ")));
            }
            s
        }
        LifecycleOutcome::Removed => "Theme settings removed".to_string(),
        LifecycleOutcome::Failed { message } => {
            return Err(ApiError::Rejected(format!("{} failed: {}", hook, message)));
        }
    };
    Ok(format!("{} {}", "✓".green(), line))
}
