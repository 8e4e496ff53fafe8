//! # Protocol Constants
//!
//! Values both the webhook receiver and the REST client announce to the
//! partner API.

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Protocol version this library speaks.
pub const COMPATIBILITY_DATE: &str = "2025-07-01";

/// Library identification, sent as `X-Client-Library` on webhook responses
/// and as `User-Agent` on REST calls.
#[must_use]
pub fn client_version() -> String {
    format!("freestuff-rs/{VERSION} (https://docs.freestuffbot.xyz/libraries/rust/)")
}
