//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

/// Current Unix timestamp in milliseconds.
pub fn timestamp_millis_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Identifier for a record created while offline.
///
/// Remote rows carry server-assigned sequential ids; locally-created records
/// use the creation timestamp in milliseconds, which stays clear of the
/// remote id range and never collides in single-user usage.
pub fn local_record_id() -> i64 {
    timestamp_millis_now()
}

/// Current time as an RFC 3339 string, the `created_at` format the remote
/// tables use.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
