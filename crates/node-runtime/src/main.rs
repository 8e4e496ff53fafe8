//! # FreeStuff Webhook Node
//!
//! Receives signed FreeStuff webhooks and logs the decoded events.
//!
//! ```text
//! FSB_PUBLIC_KEY=MCowBQYDK2VwAyEA... FSB_PORT=3000 RUST_LOG=debug fsb-node
//! ```
//!
//! See `container::config` for every variable.

use anyhow::{Context, Result};
use node_runtime::container::NodeConfig;
use node_runtime::NodeRuntime;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!(
        version = fsb_03_webhook_gateway::VERSION,
        compatibility_date = fsb_03_webhook_gateway::COMPATIBILITY_DATE,
        "Starting FreeStuff webhook node"
    );

    let config = NodeConfig::from_env().context("Failed to load configuration")?;
    let runtime = NodeRuntime::start(config).await?;

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    runtime.shutdown().await
}
