//! # Epoch-Offset Timestamps
//!
//! The webhook protocol counts time in seconds since a fixed anchor,
//! `2025-01-01T00:00:00Z`, not since the Unix epoch. The same string that is
//! signed (`webhook-timestamp`) and the `timestamp` field inside event
//! payloads are both decoded here, so the two can never disagree.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// `2025-01-01T00:00:00Z` as Unix milliseconds.
pub const EPOCH_ANCHOR_UNIX_MILLIS: i64 = 1_735_689_600_000;

/// The anchor as an absolute time.
#[must_use]
pub fn epoch_anchor() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(EPOCH_ANCHOR_UNIX_MILLIS).unwrap_or_default()
}

/// Decode an epoch-offset string.
///
/// Accepts integer or fractional seconds, surrounding whitespace allowed.
/// Returns `None` for empty, non-numeric, non-finite or negative input, and
/// for offsets outside the representable date range. Fractional
/// milliseconds are truncated.
#[must_use]
pub fn parse_epoch_offset(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let seconds: f64 = trimmed.parse().ok()?;
    offset_seconds_to_time(seconds)
}

/// Decode an epoch offset carried in JSON, either as a number or a string.
#[must_use]
pub fn parse_epoch_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(number) => offset_seconds_to_time(number.as_f64()?),
        Value::String(raw) => parse_epoch_offset(raw),
        _ => None,
    }
}

/// Encode an absolute time as whole seconds since the anchor.
///
/// Times before the anchor yield negative offsets, which
/// [`parse_epoch_offset`] rejects.
#[must_use]
pub fn to_epoch_offset(time: DateTime<Utc>) -> i64 {
    (time.timestamp_millis() - EPOCH_ANCHOR_UNIX_MILLIS).div_euclid(1000)
}

fn offset_seconds_to_time(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    let offset_millis = (seconds * 1000.0).trunc();
    // Beyond this chrono cannot represent the result anyway.
    if offset_millis > i64::MAX as f64 / 2.0 {
        return None;
    }
    let millis = EPOCH_ANCHOR_UNIX_MILLIS.checked_add(offset_millis as i64)?;
    DateTime::from_timestamp_millis(millis)
}
