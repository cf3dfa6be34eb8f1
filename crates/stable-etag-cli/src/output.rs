//! Output formatting utilities.

use serde_json::Value;

/// Formats a report as pretty JSON.
pub fn format_json(report: &Value) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}
