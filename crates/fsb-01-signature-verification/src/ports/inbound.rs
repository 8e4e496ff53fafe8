//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::{VerificationInput, VerificationOutput};

/// Primary verification API.
///
/// Implementations must be thread-safe (`Send + Sync`); one verifier serves
/// every concurrent delivery.
pub trait SignedMessageVerifierApi: Send + Sync {
    /// Run every check against one delivery.
    ///
    /// Never fails: bad input is a `VerificationOutput::Rejected` verdict.
    fn verify(&self, input: VerificationInput) -> VerificationOutput;
}
