//! Webhook request handler.
//!
//! One request runs: raw body capture, verification, compatibility check,
//! then a spawned dispatch of the decoded event to the bus.

use crate::domain::config::GatewayConfig;
use crate::headers;
use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use fsb_01_signature_verification::{
    Rejection, SignedMessageVerifierApi, VerificationInput, VerificationOutput,
};
use fsb_02_event_parsing::{parse_event, supported_event_type};
use serde_json::Value;
use shared_bus::EventPublisher;
use std::sync::Arc;
use tracing::{debug, warn};

/// State shared by every webhook request.
#[derive(Clone)]
pub struct WebhookState {
    verifier: Arc<dyn SignedMessageVerifierApi>,
    publisher: Arc<dyn EventPublisher>,
    compatibility_date: Arc<str>,
    max_body_size: usize,
}

impl WebhookState {
    /// State with the default compatibility date and body limit.
    pub fn new(
        verifier: Arc<dyn SignedMessageVerifierApi>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self::from_config(&GatewayConfig::default(), verifier, publisher)
    }

    pub fn from_config(
        config: &GatewayConfig,
        verifier: Arc<dyn SignedMessageVerifierApi>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            verifier,
            publisher,
            compatibility_date: Arc::from(config.compatibility_date.as_str()),
            max_body_size: config.max_body_size,
        }
    }

    pub fn with_compatibility_date(mut self, compatibility_date: &str) -> Self {
        self.compatibility_date = Arc::from(compatibility_date);
        self
    }

    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    /// The compatibility date requests must carry.
    pub fn compatibility_date(&self) -> &str {
        &self.compatibility_date
    }
}

/// Handle one webhook delivery.
pub async fn handle_webhook(State(state): State<WebhookState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    // A JSON extractor or middleware ahead of us has already consumed the
    // body, so there are no raw bytes left to verify.
    if parts.extensions.get::<Value>().is_some() {
        warn!("Webhook body was parsed before reaching the webhook handler; mount JSON parsing after it");
        return text(StatusCode::INTERNAL_SERVER_ERROR, "Invalid server configuration");
    }

    let body = match read_body(body, state.max_body_size).await {
        Ok(body) => body,
        Err(response) => return response,
    };

    let message_id = header(&parts.headers, headers::WEBHOOK_ID);
    let input = VerificationInput::new(
        body,
        header(&parts.headers, headers::WEBHOOK_SIGNATURE),
        message_id.clone(),
        header(&parts.headers, headers::WEBHOOK_TIMESTAMP),
    );

    let payload = match state.verifier.verify(input) {
        VerificationOutput::Valid(payload) => payload,
        VerificationOutput::Rejected(reason) => return rejected(&message_id, reason),
    };

    if header(&parts.headers, headers::COMPATIBILITY_DATE) != *state.compatibility_date {
        warn!(message_id = %message_id, "Compatibility date mismatch");
        return text(StatusCode::BAD_REQUEST, "Incompatible compatibility date");
    }

    if let Some(event) = payload.payload_json {
        let publisher = Arc::clone(&state.publisher);
        tokio::spawn(async move {
            dispatch(publisher.as_ref(), event, &message_id);
        });
    }

    StatusCode::NO_CONTENT.into_response()
}

async fn read_body(body: Body, limit: usize) -> Result<axum::body::Bytes, Response> {
    let body = to_bytes(body, limit).await.map_err(|e| {
        warn!(error = %e, "Failed to read webhook body");
        text(StatusCode::INTERNAL_SERVER_ERROR, "Error parsing request body")
    })?;

    if body.is_empty() {
        return Err(text(StatusCode::BAD_REQUEST, "Missing body"));
    }

    Ok(body)
}

fn rejected(message_id: &str, reason: Rejection) -> Response {
    warn!(message_id = %message_id, reason = %reason, "Webhook verification failed");

    let status = if reason.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    text(status, format!("Verification failed: {reason}"))
}

/// Parse a verified payload and hand it to the bus.
fn dispatch(publisher: &dyn EventPublisher, payload: Value, message_id: &str) {
    let Some(event_type) = supported_event_type(&payload) else {
        warn!(message_id = %message_id, "Received a correctly signed but unsupported payload");
        debug!(payload = %payload, "Unsupported payload");
        return;
    };
    let event_type = event_type.to_string();

    match parse_event(payload) {
        Ok(event) => {
            let listeners = publisher.emit(&event);
            debug!(message_id = %message_id, event_type = %event_type, listeners, "Webhook event dispatched");
        }
        Err(e) => {
            warn!(message_id = %message_id, event_type = %event_type, error = %e, "Dropping undecodable webhook event");
        }
    }
}

/// Header value as a string; absent or non-UTF-8 headers read as empty.
fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn text(status: StatusCode, body: impl Into<String>) -> Response {
    (status, body.into()).into_response()
}
