//! # Verification Entities
//!
//! The input to a verification and the verdict it produces.

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// The only signature algorithm version accepted.
pub const SIGNATURE_VERSION: &str = "v1a";

/// One webhook delivery as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationInput {
    /// The raw request body, exactly as received.
    pub data: Bytes,
    /// `webhook-signature` header, `"<version>,<base64>"`.
    pub signature: String,
    /// `webhook-id` header.
    pub message_id: String,
    /// `webhook-timestamp` header, seconds since the epoch anchor.
    pub timestamp: String,
}

impl VerificationInput {
    pub fn new(
        data: impl Into<Bytes>,
        signature: impl Into<String>,
        message_id: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            data: data.into(),
            signature: signature.into(),
            message_id: message_id.into(),
            timestamp: timestamp.into(),
        }
    }

    /// All four fields carry a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.data.is_empty()
            && !self.signature.is_empty()
            && !self.message_id.is_empty()
            && !self.timestamp.is_empty()
    }
}

/// Why a delivery was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rejection {
    /// Body, signature, id or timestamp is empty.
    MissingParameters,
    /// Timestamp undecodable or older than the maximum message age.
    InvalidTimestamp,
    /// Message id already seen.
    Duplicate,
    /// Signature version is not `v1a`.
    UnsupportedAlgorithm,
    /// Signature missing, malformed, or not matching the content.
    InvalidSignature,
    /// Signature valid, but the body is not JSON.
    MalformedPayload,
}

impl Rejection {
    /// The wire name, e.g. `missing-parameters`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Rejection::MissingParameters => "missing-parameters",
            Rejection::InvalidTimestamp => "invalid-timestamp",
            Rejection::Duplicate => "duplicate",
            Rejection::UnsupportedAlgorithm => "unsupported-algorithm",
            Rejection::InvalidSignature => "invalid-signature",
            Rejection::MalformedPayload => "malformed-payload",
        }
    }

    /// Rejections caused by the sender, as opposed to the receiver failing
    /// to process an authentic delivery.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        !matches!(self, Rejection::MalformedPayload)
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authentic delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedPayload {
    /// The parsed body; `None` only when the body was empty.
    pub payload_json: Option<Value>,
    /// The body bytes as received.
    pub payload_raw: Bytes,
}

/// The verdict on one delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationOutput {
    Valid(VerifiedPayload),
    Rejected(Rejection),
}

impl VerificationOutput {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, VerificationOutput::Valid(_))
    }

    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            VerificationOutput::Valid(_) => None,
            VerificationOutput::Rejected(reason) => Some(*reason),
        }
    }

    /// `valid` or the rejection's wire name.
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            VerificationOutput::Valid(_) => "valid",
            VerificationOutput::Rejected(reason) => reason.as_str(),
        }
    }

    /// Convert into a `Result`, for `?` at call sites.
    ///
    /// # Errors
    ///
    /// The rejection reason.
    pub fn into_result(self) -> Result<VerifiedPayload, Rejection> {
        match self {
            VerificationOutput::Valid(payload) => Ok(payload),
            VerificationOutput::Rejected(reason) => Err(reason),
        }
    }
}

impl From<Rejection> for VerificationOutput {
    fn from(reason: Rejection) -> Self {
        VerificationOutput::Rejected(reason)
    }
}
