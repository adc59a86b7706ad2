//! Data models for the careers page and client logo gallery.
//!
//! Request types are validated at the API boundary into the plain inputs the
//! repository accepts, so persistence code never sees unchecked bodies.

mod careers;
mod client_logo;
mod job_posting;

pub use careers::*;
pub use client_logo::*;
pub use job_posting::*;

use crate::errors::AppError;

/// Trim a required text field and check it against its length limit.
pub(crate) fn required_text(field: &str, value: Option<&str>, max: usize) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => bounded(field, v, max),
        _ => Err(AppError::Validation(format!(
            "{} is required and cannot be empty",
            field
        ))),
    }
}

/// Trim an optional text field; blank input is kept as an empty string.
pub(crate) fn optional_text(field: &str, value: &str, max: usize) -> Result<String, AppError> {
    bounded(field, value.trim(), max)
}

fn bounded(field: &str, value: &str, max: usize) -> Result<String, AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(value.to_string())
}

/// Current time as a fixed-width RFC 3339 UTC timestamp.
///
/// Fixed width keeps lexicographic order equal to chronological order, which
/// the `created_at DESC` tie-breaker in list queries relies on.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}
