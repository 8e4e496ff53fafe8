//! # Verifier Configuration

use crate::domain::errors::{KeyError, ReplayTrackingParseError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ed25519_dalek::pkcs8::DecodePublicKey;
use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How long a message id outlives `max_message_age` in the replay cache.
pub const DRAIN_WINDOW: Duration = Duration::from_secs(60);

/// Default maximum delivery age.
pub const DEFAULT_MAX_MESSAGE_AGE: Duration = Duration::from_secs(5 * 60);

/// When message ids are put into the replay cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayTracking {
    /// Register every id while duplicate checking is enabled.
    #[default]
    Strict,

    /// Register ids only while duplicate checking is disabled.
    ///
    /// With duplicate checking enabled nothing is ever registered, so
    /// duplicates are never detected. Kept for hosts that depend on the
    /// behaviour of earlier receivers.
    Legacy,
}

impl ReplayTracking {
    /// Whether a delivery's id goes into the replay cache.
    #[must_use]
    pub fn registers(self, skip_duplicate_check: bool) -> bool {
        match self {
            ReplayTracking::Strict => !skip_duplicate_check,
            ReplayTracking::Legacy => skip_duplicate_check,
        }
    }
}

impl FromStr for ReplayTracking {
    type Err = ReplayTrackingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ReplayTracking::Strict),
            "legacy" => Ok(ReplayTracking::Legacy),
            _ => Err(ReplayTrackingParseError(s.to_string())),
        }
    }
}

impl fmt::Display for ReplayTracking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayTracking::Strict => f.write_str("strict"),
            ReplayTracking::Legacy => f.write_str("legacy"),
        }
    }
}

/// The key deliveries are checked against.
#[derive(Debug, Clone)]
pub enum PublicKeyMaterial {
    /// Base64 of a DER-encoded SubjectPublicKeyInfo, as shown in the
    /// partner dashboard.
    Base64Der(String),

    /// An already parsed key.
    Key(VerifyingKey),
}

impl PublicKeyMaterial {
    /// Decode into a verifying key.
    ///
    /// # Errors
    ///
    /// `KeyError` if the string is not base64 or not an Ed25519 SPKI.
    pub fn into_verifying_key(self) -> Result<VerifyingKey, KeyError> {
        match self {
            PublicKeyMaterial::Key(key) => Ok(key),
            PublicKeyMaterial::Base64Der(encoded) => {
                let der = STANDARD
                    .decode(encoded.trim())
                    .map_err(|e| KeyError::InvalidBase64(e.to_string()))?;
                VerifyingKey::from_public_key_der(&der)
                    .map_err(|e| KeyError::InvalidSpki(e.to_string()))
            }
        }
    }
}

impl From<&str> for PublicKeyMaterial {
    fn from(encoded: &str) -> Self {
        PublicKeyMaterial::Base64Der(encoded.to_string())
    }
}

impl From<String> for PublicKeyMaterial {
    fn from(encoded: String) -> Self {
        PublicKeyMaterial::Base64Der(encoded)
    }
}

impl From<VerifyingKey> for PublicKeyMaterial {
    fn from(key: VerifyingKey) -> Self {
        PublicKeyMaterial::Key(key)
    }
}

/// Options for [`crate::SignedMessageVerifier`].
#[derive(Debug, Clone)]
pub struct VerifierOptions {
    pub public_key: PublicKeyMaterial,
    /// Deliveries older than this are rejected, and ids are remembered for
    /// this long plus [`DRAIN_WINDOW`].
    pub max_message_age: Duration,
    /// Not recommended.
    pub skip_duplicate_check: bool,
    /// Not recommended.
    pub skip_timestamp_check: bool,
    pub replay_tracking: ReplayTracking,
}

impl VerifierOptions {
    #[must_use]
    pub fn new(public_key: impl Into<PublicKeyMaterial>) -> Self {
        Self {
            public_key: public_key.into(),
            max_message_age: DEFAULT_MAX_MESSAGE_AGE,
            skip_duplicate_check: false,
            skip_timestamp_check: false,
            replay_tracking: ReplayTracking::default(),
        }
    }

    #[must_use]
    pub fn with_max_message_age(mut self, max_message_age: Duration) -> Self {
        self.max_message_age = max_message_age;
        self
    }

    #[must_use]
    pub fn with_skip_duplicate_check(mut self, skip: bool) -> Self {
        self.skip_duplicate_check = skip;
        self
    }

    #[must_use]
    pub fn with_skip_timestamp_check(mut self, skip: bool) -> Self {
        self.skip_timestamp_check = skip;
        self
    }

    #[must_use]
    pub fn with_replay_tracking(mut self, replay_tracking: ReplayTracking) -> Self {
        self.replay_tracking = replay_tracking;
        self
    }

    /// How long an id stays in the replay cache.
    #[must_use]
    pub fn replay_retention(&self) -> Duration {
        self.max_message_age.saturating_add(DRAIN_WINDOW)
    }
}
