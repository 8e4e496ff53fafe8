//! REST client errors.

use crate::domain::entities::Problem;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestError {
    /// The token or compatibility date cannot be sent as a header.
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// Transport failure, including timeouts.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a problem document.
    #[error("API problem (HTTP {status}): {problem}")]
    Problem { status: StatusCode, problem: Problem },

    /// A non-2xx answer without a problem document.
    #[error("unexpected HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// A 2xx answer whose body did not decode.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl RestError {
    /// The problem document, if the API sent one.
    pub fn problem(&self) -> Option<&Problem> {
        match self {
            RestError::Problem { problem, .. } => Some(problem),
            _ => None,
        }
    }
}
