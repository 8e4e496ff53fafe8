//! # Partner Fixtures
//!
//! The sending side of a webhook: a deterministic signing key and helpers
//! that sign deliveries the way the FreeStuff API does.

use axum::body::Body;
use axum::http::Request;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use ed25519_dalek::SigningKey;
use fsb_01_signature_verification::{signature_header, VerificationInput};
use fsb_03_webhook_gateway::{headers, COMPATIBILITY_DATE};
use serde_json::{json, Value};
use shared_types::to_epoch_offset;

/// A webhook sender with a fixed key.
pub struct Partner {
    key: SigningKey,
}

impl Partner {
    pub fn new(seed: u8) -> Self {
        Self {
            key: SigningKey::from_bytes(&[seed; 32]),
        }
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.key
    }

    pub fn verifying_key(&self) -> ed25519_dalek::VerifyingKey {
        self.key.verifying_key()
    }

    /// A signed delivery as the verifier sees it.
    pub fn sign(&self, message_id: &str, sent_at: DateTime<Utc>, body: &[u8]) -> VerificationInput {
        let timestamp = to_epoch_offset(sent_at).to_string();
        let signature = signature_header(&self.key, message_id, &timestamp, body);
        VerificationInput::new(
            Bytes::copy_from_slice(body),
            signature,
            message_id,
            timestamp,
        )
    }

    /// A signed delivery as an HTTP request against `route`, sent now.
    pub fn request(&self, route: &str, message_id: &str, body: &str) -> Request<Body> {
        let timestamp = to_epoch_offset(Utc::now()).to_string();
        self.request_at(route, message_id, &timestamp, body)
    }

    /// Like [`request`](Self::request), with a literal `webhook-timestamp`.
    pub fn request_at(
        &self,
        route: &str,
        message_id: &str,
        timestamp: &str,
        body: &str,
    ) -> Request<Body> {
        let signature = signature_header(&self.key, message_id, timestamp, body.as_bytes());
        Request::post(route)
            .header(headers::WEBHOOK_ID, message_id)
            .header(headers::WEBHOOK_SIGNATURE, signature)
            .header(headers::WEBHOOK_TIMESTAMP, timestamp)
            .header(headers::COMPATIBILITY_DATE, COMPATIBILITY_DATE)
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|e| panic!("invalid test request: {e}"))
    }
}

pub fn ping_body(manual: bool) -> String {
    json!({
        "type": "fsb:event:ping",
        "timestamp": 42,
        "data": { "manual": manual },
    })
    .to_string()
}

pub fn product(id: u64, flags: u64) -> Value {
    json!({
        "id": id,
        "title": format!("Game {id}"),
        "until": null,
        "flags": flags,
        "urls": [{ "url": format!("https://store.example/{id}"), "flags": 1 }],
        "images": [],
    })
}

pub fn product_updated_body(id: u64, flags: u64) -> String {
    json!({
        "type": "fsb:event:product_updated",
        "timestamp": 1000,
        "data": product(id, flags),
    })
    .to_string()
}

pub fn announcement_body(ids: &[u64]) -> String {
    json!({
        "type": "fsb:event:announcement_created",
        "timestamp": 2000,
        "data": {
            "id": 9,
            "resolvedProducts": ids.iter().map(|id| product(*id, 0)).collect::<Vec<_>>(),
        },
    })
    .to_string()
}
