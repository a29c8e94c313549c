//! Output formatting utilities.

use chrono::{TimeZone, Utc};
use serde_json::Value;

/// Formats a value as pretty JSON.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Renders an `auth_date` as RFC 3339, or `?` when it is not a valid timestamp.
pub fn format_auth_date(auth_date: &str) -> String {
    auth_date
        .parse::<i64>()
        .ok()
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        .unwrap_or_else(|| "?".to_string())
}

/// Prints the verdict table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!("{:<20} {:<22} {:<10} {}", "ID", "AUTH_DATE", "VERDICT", "REASON");
    println!("{}", "-".repeat(70));
}

/// Formats one verdict as a table row.
pub fn format_table_row(id: &str, auth_date: &str, verdict: &str, reason: &str) -> String {
    format!(
        "{:<20} {:<22} {:<10} {}",
        truncate(id, 20),
        format_auth_date(auth_date),
        verdict,
        reason
    )
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
