//! # Node Runtime Library
//!
//! Wires the webhook receiver into a runnable node. The `fsb-node` binary is
//! a thin shell around [`NodeRuntime`]; the library is exposed for tests.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from `FSB_*` variables
//! 2. Decode the public key and build the verifier and bus
//! 3. Register logging listeners
//! 4. Start the replay-cache sweeper
//! 5. Bind and serve the webhook route
//! 6. Optionally ping the REST API with `FSB_API_TOKEN`

#![allow(clippy::module_name_repetitions)]

pub mod container;
pub mod handlers;

use std::net::SocketAddr;

use anyhow::{Context, Result};
use fsb_03_webhook_gateway::{ServerHandle, WebhookServer};
use fsb_04_rest_client::{RestApiClient, RestClientConfig};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::container::{NodeConfig, ServiceContainer};
use crate::handlers::register_logging_listeners;

/// A running webhook node.
pub struct NodeRuntime {
    container: ServiceContainer,
    server: ServerHandle,
    sweeper: JoinHandle<()>,
}

impl NodeRuntime {
    /// Build every service, bind the listener and start serving.
    pub async fn start(config: NodeConfig) -> Result<Self> {
        let container = ServiceContainer::new(config).context("Invalid FSB_PUBLIC_KEY")?;

        let listeners = register_logging_listeners(&container.event_bus);
        info!(listeners = listeners.len(), "Logging listeners registered");

        let sweeper = container
            .verifier
            .spawn_sweeper(container.config.sweep_interval);

        let server = WebhookServer::bind(&container.config.gateway, container.webhook_state())
            .await
            .context("Failed to start webhook server")?
            .spawn();

        info!(
            addr = %server.local_addr(),
            route = %container.config.gateway.route,
            "Webhook receiver ready"
        );

        if let Some(token) = container.config.api_token.as_deref() {
            check_api(token).await;
        }

        Ok(Self {
            container,
            server,
            sweeper,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.server.local_addr()
    }

    pub fn container(&self) -> &ServiceContainer {
        &self.container
    }

    /// Stop serving, drain in-flight requests and stop the sweeper.
    pub async fn shutdown(self) -> Result<()> {
        info!("Initiating graceful shutdown...");

        let result = self.server.shutdown().await;
        self.sweeper.abort();

        result.context("Webhook server did not shut down cleanly")?;
        info!("Shutdown complete");
        Ok(())
    }
}

/// Confirm the API token works. Failures are logged, not fatal.
async fn check_api(token: &str) {
    let client = match RestApiClient::new(token, RestClientConfig::default()) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Could not build REST API client");
            return;
        }
    };

    match client.get_ping().await {
        Ok(response) => {
            let limit = response.rate_limit();
            info!(
                status = %response.status,
                rate_limit_remaining = ?limit.remaining,
                "REST API reachable"
            );
        }
        Err(e) => warn!(error = %e, "REST API ping failed"),
    }
}
