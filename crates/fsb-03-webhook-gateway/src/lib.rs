//! FSB-03 Webhook Gateway - HTTP endpoint for FreeStuff partner webhooks.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  WEBHOOK GATEWAY (fsb-03)                    │
//! ├──────────────────────────────────────────────────────────────┤
//! │   POST <route>                                               │
//! │        │                                                     │
//! │  ┌─────┴──────────────────────────────────────────┐          │
//! │  │  Library headers (every response)              │          │
//! │  └─────┬──────────────────────────────────────────┘          │
//! │        │                                                     │
//! │  ┌─────┴──────────────────────────────────────────┐          │
//! │  │  Raw body → Verifier (fsb-01) → compat date    │ ─► 4xx/5xx│
//! │  └─────┬──────────────────────────────────────────┘          │
//! │        │ 204                                                 │
//! │  ┌─────┴──────────────────────────────────────────┐          │
//! │  │  Spawned task: Parser (fsb-02) → Event Bus     │          │
//! │  └────────────────────────────────────────────────┘          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Status Codes
//!
//! | Condition                                | Status |
//! |------------------------------------------|--------|
//! | Body could not be read                   | 500    |
//! | Body already consumed by another layer   | 500    |
//! | Empty body                               | 400    |
//! | Verification rejected                    | 400    |
//! | Signature valid, body not JSON           | 500    |
//! | Compatibility date mismatch              | 400    |
//! | Accepted                                 | 204    |
//!
//! # Usage
//!
//! ```ignore
//! use fsb_03_webhook_gateway::{webhook_router, WebhookState};
//!
//! let state = WebhookState::new(verifier, bus);
//! let app = Router::new().merge(webhook_router(state, "/webhooks/freestuff")?);
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod handler;
pub mod router;
pub mod service;

// Re-exports for public API
pub use domain::config::{ConfigError, GatewayConfig};
pub use domain::error::GatewayError;
pub use handler::{handle_webhook, WebhookState};
pub use router::webhook_router;
pub use service::{ServerHandle, WebhookServer};

pub use shared_types::protocol::{client_version, COMPATIBILITY_DATE, VERSION};

/// Request header names.
pub mod headers {
    pub const WEBHOOK_ID: &str = "webhook-id";
    pub const WEBHOOK_SIGNATURE: &str = "webhook-signature";
    pub const WEBHOOK_TIMESTAMP: &str = "webhook-timestamp";
    pub const COMPATIBILITY_DATE: &str = "x-compatibility-date";

    /// Response header announcing the compatibility date.
    pub const SET_COMPATIBILITY_DATE: &str = "x-set-compatibility-date";
    /// Response header identifying this library.
    pub const CLIENT_LIBRARY: &str = "x-client-library";
}
