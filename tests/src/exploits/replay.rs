//! # Replay Attacks
//!
//! An attacker captures a valid delivery and resends it: immediately, after
//! the cache would have forgotten it, or in a concurrent burst.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use fsb_01_signature_verification::{
        ManualTimeSource, Rejection, SignedMessageVerifier, TimeSource, VerifierOptions,
        DRAIN_WINDOW,
    };

    use crate::fixtures::{ping_body, Partner};

    fn setup(partner: &Partner) -> (SignedMessageVerifier, Arc<ManualTimeSource>) {
        let clock = Arc::new(ManualTimeSource::new(
            Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap(),
        ));
        let verifier = SignedMessageVerifier::with_time_source(
            VerifierOptions::new(partner.verifying_key()),
            clock.clone(),
        )
        .unwrap();
        (verifier, clock)
    }

    #[test]
    fn test_immediate_replay() {
        let partner = Partner::new(20);
        let (verifier, clock) = setup(&partner);
        let captured = partner.sign("evt-1", clock.now(), ping_body(true).as_bytes());

        assert!(verifier.verify(captured.clone()).is_valid());
        assert_eq!(verifier.verify(captured).rejection(), Some(Rejection::Duplicate));
    }

    /// Once the id is forgotten the delivery is already stale.
    #[test]
    fn test_replay_after_retention() {
        let partner = Partner::new(21);
        let (verifier, clock) = setup(&partner);
        let captured = partner.sign("evt-2", clock.now(), ping_body(true).as_bytes());
        assert!(verifier.verify(captured.clone()).is_valid());

        clock.advance(Duration::from_secs(300) + DRAIN_WINDOW + Duration::from_secs(1));
        assert_eq!(verifier.verify(captured).rejection(), Some(Rejection::InvalidTimestamp));
    }

    /// A fresh timestamp with a captured signature does not verify.
    #[test]
    fn test_replay_with_refreshed_timestamp() {
        let partner = Partner::new(22);
        let (verifier, clock) = setup(&partner);
        let body = ping_body(false);
        let captured = partner.sign("evt-3", clock.now(), body.as_bytes());

        clock.advance(Duration::from_secs(600));
        let refreshed = partner.sign("evt-3b", clock.now(), body.as_bytes());
        let mut spliced = captured.clone();
        spliced.timestamp = refreshed.timestamp;
        spliced.message_id = "evt-3c".to_string();

        assert_eq!(
            verifier.verify(spliced).rejection(),
            Some(Rejection::InvalidSignature)
        );
    }

    #[test]
    fn test_concurrent_replay_burst() {
        let partner = Partner::new(23);
        let (verifier, clock) = setup(&partner);
        let verifier = Arc::new(verifier);
        let captured = partner.sign("evt-4", clock.now(), ping_body(true).as_bytes());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let verifier = Arc::clone(&verifier);
                let input = captured.clone();
                thread::spawn(move || verifier.verify(input).is_valid())
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|valid| *valid)
            .count();
        assert_eq!(accepted, 1);
    }
}
