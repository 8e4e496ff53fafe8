//! # Signed-Message Verification (FSB-01)
//!
//! Decides whether an incoming webhook delivery is authentic, fresh and
//! not a replay.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): signed-content encoding, the verdict
//!   types, the replay cache. No I/O.
//! - **Ports Layer** (`ports/`): the verification API and the clock it
//!   reads through.
//! - **Service Layer** (`service.rs`): the `SignedMessageVerifier` that runs
//!   the checks in order.
//!
//! ## Check Order
//!
//! 1. All four inputs present
//! 2. Timestamp not older than `max_message_age`
//! 3. Message id not seen before
//! 4. Message id registered in the replay cache
//! 5. Signature algorithm is `v1a`
//! 6. Ed25519 signature over `"{id}.{timestamp}.{body}"`
//!
//! The first failing check decides the rejection reason.
//!
//! ## Security Notes
//!
//! - Timestamps in the future are accepted; only staleness is checked.
//! - With `ReplayTracking::Strict` a message id is registered before its
//!   signature is checked, so a forged delivery can burn an id for the
//!   length of the drain window.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::config::{PublicKeyMaterial, ReplayTracking, VerifierOptions, DRAIN_WINDOW};
pub use domain::entities::{
    Rejection, VerificationInput, VerificationOutput, VerifiedPayload, SIGNATURE_VERSION,
};
pub use domain::errors::{KeyError, ReplayTrackingParseError};
pub use domain::signed_content::{signature_header, signed_content};
pub use ports::inbound::SignedMessageVerifierApi;
pub use ports::outbound::{ManualTimeSource, SystemTimeSource, TimeSource};
pub use service::SignedMessageVerifier;
