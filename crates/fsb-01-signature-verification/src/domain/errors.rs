//! # Verifier Errors
//!
//! Configuration errors raised while building a verifier. Rejected
//! deliveries are not errors; they are [`crate::Rejection`] values.

use thiserror::Error;

/// The public key could not be turned into a verifying key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The key string is not valid base64.
    #[error("Public key is not valid base64: {0}")]
    InvalidBase64(String),

    /// The decoded bytes are not an Ed25519 SubjectPublicKeyInfo.
    ///
    /// Keys of other algorithms end up here too; the algorithm identifier
    /// inside the SPKI is checked while decoding.
    #[error("Public key is not a DER-encoded Ed25519 SPKI: {0}")]
    InvalidSpki(String),
}

/// A replay tracking mode name that is neither `strict` nor `legacy`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown replay tracking mode {0:?} (expected \"strict\" or \"legacy\")")]
pub struct ReplayTrackingParseError(pub String);
