//! Response and problem types.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::fmt;

/// A decoded 2xx response.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
    pub headers: HeaderMap,
}

impl<T> ApiResponse<T> {
    /// Rate limit state as reported by the API, when it reports one.
    pub fn rate_limit(&self) -> RateLimit {
        RateLimit::from_headers(&self.headers)
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

/// `x-ratelimit-*` response headers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimit {
    /// Requests left in the current window
    pub remaining: Option<u64>,
    /// Seconds until the window resets
    pub reset: Option<u64>,
}

impl RateLimit {
    pub const REMAINING_HEADER: &'static str = "x-ratelimit-remaining";
    pub const RESET_HEADER: &'static str = "x-ratelimit-reset";

    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse().ok())
        };
        Self {
            remaining: read(Self::REMAINING_HEADER),
            reset: read(Self::RESET_HEADER),
        }
    }
}

/// An RFC 9457 style problem document returned by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    pub problem_type: String,
    pub title: String,
    pub detail: String,
    /// The document as received
    pub raw: Map<String, Value>,
}

impl Problem {
    pub const UNKNOWN_TYPE: &'static str = "fsb:problem:unknown";
    pub const UNKNOWN_TITLE: &'static str = "Unknown Problem";
    pub const UNKNOWN_DETAIL: &'static str = "An unknown error occurred";

    /// Build from a problem document. Missing or `null` fields take the
    /// unknown-problem defaults; non-string values are stringified.
    pub fn from_raw(raw: Map<String, Value>) -> Self {
        let field = |name: &str, default: &str| match raw.get(name) {
            None | Some(Value::Null) => default.to_string(),
            Some(Value::String(value)) => value.clone(),
            Some(other) => other.to_string(),
        };

        Self {
            problem_type: field("type", Self::UNKNOWN_TYPE),
            title: field("title", Self::UNKNOWN_TITLE),
            detail: field("detail", Self::UNKNOWN_DETAIL),
            raw,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.title, self.problem_type, self.detail)
    }
}
