//! # Service Wiring
//!
//! ```text
//! NodeConfig ──► SignedMessageVerifier ─┐
//!                                       ├─► WebhookState ─► gateway
//!                InMemoryEventBus ──────┘
//! ```

use std::sync::Arc;

use fsb_01_signature_verification::{KeyError, SignedMessageVerifier};
use fsb_03_webhook_gateway::WebhookState;
use shared_bus::InMemoryEventBus;
use tracing::{info, instrument};

use crate::container::config::NodeConfig;

/// The verifier and bus every other component shares.
pub struct ServiceContainer {
    pub config: NodeConfig,
    pub verifier: Arc<SignedMessageVerifier>,
    pub event_bus: Arc<InMemoryEventBus>,
}

impl ServiceContainer {
    /// Decode the public key and build the services.
    ///
    /// # Errors
    ///
    /// `KeyError` if `FSB_PUBLIC_KEY` is not a base64 Ed25519 SPKI.
    #[instrument(skip_all)]
    pub fn new(config: NodeConfig) -> Result<Self, KeyError> {
        let verifier = Arc::new(SignedMessageVerifier::new(config.verifier.clone())?);
        let event_bus = Arc::new(InMemoryEventBus::new());

        info!(
            max_message_age = ?config.verifier.max_message_age,
            replay_tracking = %config.verifier.replay_tracking,
            "Services initialized"
        );

        Ok(Self {
            config,
            verifier,
            event_bus,
        })
    }

    /// Request state for the webhook gateway.
    pub fn webhook_state(&self) -> WebhookState {
        WebhookState::from_config(
            &self.config.gateway,
            Arc::clone(&self.verifier) as _,
            Arc::clone(&self.event_bus) as _,
        )
    }
}
