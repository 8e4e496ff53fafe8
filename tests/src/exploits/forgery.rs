//! # Forgery Attempts
//!
//! Deliveries that were never signed by the partner key, or were altered
//! in flight.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use chrono::Utc;
    use fsb_01_signature_verification::{
        Rejection, SignedMessageVerifier, VerificationInput, VerifierOptions,
    };
    use rand::Rng;

    use crate::fixtures::{product_updated_body, Partner};

    fn verifier(partner: &Partner) -> SignedMessageVerifier {
        SignedMessageVerifier::new(VerifierOptions::new(partner.verifying_key())).unwrap()
    }

    /// Flip a random bit in the body, then check every other field too.
    #[test]
    fn test_random_bit_flips_never_verify() {
        let partner = Partner::new(30);
        let verifier = verifier(&partner);
        let body = product_updated_body(55, 0b0100);
        let mut rng = rand::thread_rng();

        for round in 0..64 {
            let mut input = partner.sign(&format!("flip-{round}"), Utc::now(), body.as_bytes());
            let mut data = input.data.to_vec();
            let index = rng.gen_range(0..data.len());
            data[index] ^= 1 << rng.gen_range(0..8);
            input.data = Bytes::from(data);

            assert_eq!(
                verifier.verify(input).rejection(),
                Some(Rejection::InvalidSignature),
                "round {round}"
            );
        }
    }

    #[test]
    fn test_header_swaps_never_verify() {
        let partner = Partner::new(31);
        let verifier = verifier(&partner);
        let body = product_updated_body(56, 0);

        let original = partner.sign("swap-1", Utc::now(), body.as_bytes());
        let other = partner.sign("swap-2", Utc::now(), body.as_bytes());

        let mut wrong_id = original.clone();
        wrong_id.message_id = "swap-3".into();
        assert_eq!(
            verifier.verify(wrong_id).rejection(),
            Some(Rejection::InvalidSignature)
        );

        let mut borrowed_signature = original;
        borrowed_signature.signature = other.signature;
        assert_eq!(
            verifier.verify(borrowed_signature).rejection(),
            Some(Rejection::InvalidSignature)
        );
    }

    #[test]
    fn test_algorithm_downgrade() {
        let partner = Partner::new(32);
        let verifier = verifier(&partner);
        let mut input = partner.sign("alg-1", Utc::now(), b"{}");
        input.signature = input.signature.replacen("v1a,", "v1,", 1);

        assert_eq!(
            verifier.verify(input).rejection(),
            Some(Rejection::UnsupportedAlgorithm)
        );
    }

    #[test]
    fn test_garbage_signature() {
        let partner = Partner::new(33);
        let verifier = verifier(&partner);
        let timestamp = shared_types::to_epoch_offset(Utc::now()).to_string();

        for (i, signature) in ["v1a,", "v1a,!!!!", "v1a,AAAA", "v1a"].into_iter().enumerate() {
            let input = VerificationInput::new(
                Bytes::from_static(b"{}"),
                signature,
                format!("garbage-{i}"),
                timestamp.clone(),
            );
            let rejection = verifier.verify(input).rejection();
            assert!(
                matches!(
                    rejection,
                    Some(Rejection::InvalidSignature | Rejection::UnsupportedAlgorithm)
                ),
                "{signature}: {rejection:?}"
            );
        }
    }
}
