//! # Signed-Message Verification Service
//!
//! Application service layer that implements the `SignedMessageVerifierApi`
//! trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`SignedMessageVerifierApi`)
//! - Reads the clock through the outbound port (`TimeSource`)
//! - Delegates content encoding and replay bookkeeping to the domain layer

use crate::domain::config::{ReplayTracking, VerifierOptions};
use crate::domain::entities::{
    Rejection, VerificationInput, VerificationOutput, VerifiedPayload, SIGNATURE_VERSION,
};
use crate::domain::errors::KeyError;
use crate::domain::replay_cache::ReplayCache;
use crate::domain::signed_content::{signed_content, SignatureHeader};
use crate::ports::inbound::SignedMessageVerifierApi;
use crate::ports::outbound::{SystemTimeSource, TimeSource};
use ed25519_dalek::{Verifier, VerifyingKey};
use parking_lot::Mutex;
use shared_types::parse_epoch_offset;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Verifies webhook deliveries against one public key.
///
/// Owns its replay cache; concurrent `verify` calls on one verifier share
/// it. Cheap to wrap in an `Arc` and hand to every request.
pub struct SignedMessageVerifier {
    key: VerifyingKey,
    max_message_age_millis: i64,
    retention_millis: i64,
    skip_duplicate_check: bool,
    skip_timestamp_check: bool,
    replay_tracking: ReplayTracking,
    replay_cache: Arc<Mutex<ReplayCache>>,
    clock: Arc<dyn TimeSource>,
}

impl SignedMessageVerifier {
    /// Build a verifier reading the system clock.
    ///
    /// # Errors
    ///
    /// `KeyError` if the public key cannot be decoded.
    pub fn new(options: VerifierOptions) -> Result<Self, KeyError> {
        Self::with_time_source(options, Arc::new(SystemTimeSource))
    }

    /// Build a verifier reading `clock`.
    ///
    /// # Errors
    ///
    /// `KeyError` if the public key cannot be decoded.
    pub fn with_time_source(
        options: VerifierOptions,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, KeyError> {
        let retention = options.replay_retention();
        let key = options.public_key.into_verifying_key()?;

        if options.replay_tracking == ReplayTracking::Legacy {
            warn!(
                skip_duplicate_check = options.skip_duplicate_check,
                "Legacy replay tracking enabled; duplicates are only recorded while the duplicate check is skipped"
            );
        }

        Ok(Self {
            key,
            max_message_age_millis: duration_millis(options.max_message_age),
            retention_millis: duration_millis(retention),
            skip_duplicate_check: options.skip_duplicate_check,
            skip_timestamp_check: options.skip_timestamp_check,
            replay_tracking: options.replay_tracking,
            replay_cache: Arc::new(Mutex::new(ReplayCache::new())),
            clock,
        })
    }

    /// Number of ids currently held by the replay cache.
    #[must_use]
    pub fn replay_cache_len(&self) -> usize {
        self.replay_cache.lock().len()
    }

    /// Periodically evict expired replay entries.
    ///
    /// Expired entries are also evicted on every `verify`; the sweeper only
    /// matters for receivers that go quiet after a burst. The task holds a
    /// weak reference and ends once the verifier is dropped.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let weak: Weak<Mutex<ReplayCache>> = Arc::downgrade(&self.replay_cache);
        let clock = Arc::clone(&self.clock);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let Some(cache) = weak.upgrade() else {
                    debug!("Verifier dropped, replay sweeper stopping");
                    return;
                };
                let evicted = cache.lock().sweep(clock.now().timestamp_millis());
                if evicted > 0 {
                    debug!(evicted, "Swept expired replay entries");
                }
            }
        })
    }

    /// Run every check against one delivery.
    pub fn verify(&self, input: VerificationInput) -> VerificationOutput {
        let message_id = input.message_id.clone();

        match self.run_checks(input) {
            Ok(payload) => {
                debug!(message_id = %message_id, "Delivery verified");
                VerificationOutput::Valid(payload)
            }
            Err(reason) => {
                debug!(message_id = %message_id, reason = %reason, "Delivery rejected");
                VerificationOutput::Rejected(reason)
            }
        }
    }

    fn is_stale(&self, timestamp: &str, now: i64) -> bool {
        match parse_epoch_offset(timestamp) {
            Some(sent) => now.saturating_sub(sent.timestamp_millis()) > self.max_message_age_millis,
            None => true,
        }
    }

    /// Steps 3 and 4 under one lock, so two concurrent deliveries of one id
    /// cannot both pass.
    fn check_replay(&self, message_id: &str, now: i64) -> Result<(), Rejection> {
        let mut cache = self.replay_cache.lock();

        if !self.skip_duplicate_check && cache.contains(message_id, now) {
            return Err(Rejection::Duplicate);
        }

        if self.replay_tracking.registers(self.skip_duplicate_check) {
            cache.register(message_id, now, now.saturating_add(self.retention_millis));
        }

        Ok(())
    }

    fn check_signature(&self, input: &VerificationInput) -> Result<(), Rejection> {
        let header = SignatureHeader::parse(&input.signature);
        if header.version != SIGNATURE_VERSION {
            return Err(Rejection::UnsupportedAlgorithm);
        }

        let signature = header
            .decode_signature()
            .ok_or(Rejection::InvalidSignature)?;
        let content = signed_content(&input.message_id, &input.timestamp, &input.data);

        self.key
            .verify(&content, &signature)
            .map_err(|_| Rejection::InvalidSignature)
    }

    fn run_checks(&self, input: VerificationInput) -> Result<VerifiedPayload, Rejection> {
        // 1. Presence
        if !input.is_complete() {
            return Err(Rejection::MissingParameters);
        }

        let now = self.clock.now().timestamp_millis();

        // 2. Staleness
        if !self.skip_timestamp_check && self.is_stale(&input.timestamp, now) {
            return Err(Rejection::InvalidTimestamp);
        }

        // 3 + 4. Duplicate check and registration
        self.check_replay(&input.message_id, now)?;

        // 5 + 6. Algorithm and signature
        self.check_signature(&input)?;

        // 7. Decode
        let payload_json =
            serde_json::from_slice(&input.data).map_err(|_| Rejection::MalformedPayload)?;

        Ok(VerifiedPayload {
            payload_json: Some(payload_json),
            payload_raw: input.data,
        })
    }
}

impl SignedMessageVerifierApi for SignedMessageVerifier {
    fn verify(&self, input: VerificationInput) -> VerificationOutput {
        SignedMessageVerifier::verify(self, input)
    }
}

fn duration_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
