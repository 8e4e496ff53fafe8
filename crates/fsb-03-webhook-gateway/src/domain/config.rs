//! Gateway configuration with validation.

use crate::COMPATIBILITY_DATE;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

/// Webhook endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Bind address
    pub host: IpAddr,
    /// Port (default: 3000)
    pub port: u16,
    /// Path the webhook is mounted on
    pub route: String,
    /// Expected `x-compatibility-date`
    pub compatibility_date: String,
    /// Maximum accepted body size in bytes
    pub max_body_size: usize,
    /// How long in-flight requests may take to finish after shutdown
    #[serde(with = "humantime_serde")]
    pub shutdown_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 3000,
            route: "/".to_string(),
            compatibility_date: COMPATIBILITY_DATE.to_string(),
            max_body_size: 100 * 1024,
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

impl GatewayConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_route(&self.route)?;

        if self.compatibility_date.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "compatibility_date cannot be empty".into(),
            ));
        }

        if self.max_body_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_size cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Get server bind address
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// A webhook route must be an absolute path.
pub fn validate_route(route: &str) -> Result<(), ConfigError> {
    if route.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigError::InvalidRoute(route.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Route does not start with `/`
    #[error("invalid route {0:?}: must start with '/'")]
    InvalidRoute(String),
    /// Invalid limit value
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
