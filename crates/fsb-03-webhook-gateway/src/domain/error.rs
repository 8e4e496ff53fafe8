//! Gateway error types.
//!
//! Request-level failures are HTTP responses, not errors; these cover
//! building and running the server.

use crate::domain::config::ConfigError;
use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Gateway-level errors
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Server socket bind error
    #[error("server bind error on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    /// The server stopped with an I/O error
    #[error("server error: {0}")]
    Serve(#[source] io::Error),

    /// The server task panicked or was cancelled
    #[error("server task failed: {0}")]
    Task(String),
}
