//! # Service Container
//!
//! Builds the long-lived services once and hands out shared references.
//! Nothing here is global: the runtime owns the container and the container
//! owns the verifier and the bus.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NodeConfig};
pub use subsystems::ServiceContainer;
