//! # Signed Content
//!
//! Encoding of the bytes a delivery's signature covers, and of the
//! `webhook-signature` header.

use crate::domain::entities::SIGNATURE_VERSION;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ed25519_dalek::{Signature, Signer, SigningKey};

/// The bytes covered by a delivery's signature:
/// `"{message_id}.{timestamp}.{body}"`.
///
/// The body is read as UTF-8; invalid sequences become U+FFFD, the same
/// substitution the sender applies before signing.
#[must_use]
pub fn signed_content(message_id: &str, timestamp: &str, data: &[u8]) -> Vec<u8> {
    format!(
        "{message_id}.{timestamp}.{}",
        String::from_utf8_lossy(data)
    )
    .into_bytes()
}

/// A `webhook-signature` header split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureHeader<'a> {
    pub version: &'a str,
    pub signature: Option<&'a str>,
}

impl<'a> SignatureHeader<'a> {
    /// Split on the first `,`. Everything after it is the signature part,
    /// so a header with extra parts never decodes.
    #[must_use]
    pub fn parse(header: &'a str) -> Self {
        let mut parts = header.splitn(2, ',');
        Self {
            version: parts.next().unwrap_or_default(),
            signature: parts.next(),
        }
    }

    /// Decode the signature part as canonical, padded base64.
    ///
    /// `None` if it is missing, not canonical base64, or not 64 bytes long.
    #[must_use]
    pub fn decode_signature(&self) -> Option<Signature> {
        let bytes = STANDARD.decode(self.signature?).ok()?;
        Signature::from_slice(&bytes).ok()
    }
}

/// Produce the `webhook-signature` header value for a delivery.
///
/// This is the sender's side of the protocol. Receivers only need it to
/// build test deliveries.
#[must_use]
pub fn signature_header(
    signing_key: &SigningKey,
    message_id: &str,
    timestamp: &str,
    data: &[u8],
) -> String {
    let signature = signing_key.sign(&signed_content(message_id, timestamp, data));
    format!(
        "{SIGNATURE_VERSION},{}",
        STANDARD.encode(signature.to_bytes())
    )
}
