//! # Node Configuration
//!
//! Everything the node needs, read from `FSB_*` environment variables.
//!
//! | Variable                    | Default   |
//! |-----------------------------|-----------|
//! | `FSB_PUBLIC_KEY`            | required  |
//! | `FSB_HOST`                  | `0.0.0.0` |
//! | `FSB_PORT`                  | `3000`    |
//! | `FSB_ROUTE`                 | `/`       |
//! | `FSB_MAX_MESSAGE_AGE_SECS`  | `300`     |
//! | `FSB_SKIP_DUPLICATE_CHECK`  | `false`   |
//! | `FSB_SKIP_TIMESTAMP_CHECK`  | `false`   |
//! | `FSB_REPLAY_TRACKING`       | `strict`  |
//! | `FSB_API_TOKEN`             | unset     |

use fsb_01_signature_verification::{ReplayTracking, VerifierOptions};
use fsb_03_webhook_gateway::GatewayConfig;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub verifier: VerifierOptions,
    pub gateway: GatewayConfig,
    /// Enables the REST API health check at startup.
    pub api_token: Option<String>,
    /// How often expired replay-cache entries are swept.
    pub sweep_interval: Duration,
}

impl NodeConfig {
    /// Configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &'static str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let public_key = var("FSB_PUBLIC_KEY").ok_or(ConfigError::Missing("FSB_PUBLIC_KEY"))?;

        let mut verifier = VerifierOptions::new(public_key);
        if let Some(secs) = parse::<u64>("FSB_MAX_MESSAGE_AGE_SECS", var("FSB_MAX_MESSAGE_AGE_SECS"))? {
            verifier = verifier.with_max_message_age(Duration::from_secs(secs));
        }
        if let Some(skip) = parse_flag("FSB_SKIP_DUPLICATE_CHECK", var("FSB_SKIP_DUPLICATE_CHECK"))? {
            verifier = verifier.with_skip_duplicate_check(skip);
        }
        if let Some(skip) = parse_flag("FSB_SKIP_TIMESTAMP_CHECK", var("FSB_SKIP_TIMESTAMP_CHECK"))? {
            verifier = verifier.with_skip_timestamp_check(skip);
        }
        if let Some(mode) = parse::<ReplayTracking>("FSB_REPLAY_TRACKING", var("FSB_REPLAY_TRACKING"))? {
            verifier = verifier.with_replay_tracking(mode);
        }

        let mut gateway = GatewayConfig::default();
        if let Some(host) = parse("FSB_HOST", var("FSB_HOST"))? {
            gateway.host = host;
        }
        if let Some(port) = parse("FSB_PORT", var("FSB_PORT"))? {
            gateway.port = port;
        }
        if let Some(route) = var("FSB_ROUTE") {
            gateway.route = route;
        }
        gateway.validate()?;

        Ok(Self {
            verifier,
            gateway,
            api_token: var("FSB_API_TOKEN"),
            sweep_interval: Duration::from_secs(60),
        })
    }
}

fn parse<T: FromStr>(name: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    value
        .map(|value| {
            value
                .parse()
                .map_err(|_| ConfigError::Invalid { name, value })
        })
        .transpose()
}

fn parse_flag(name: &'static str, value: Option<String>) -> Result<Option<bool>, ConfigError> {
    value
        .map(|value| match value.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" => Ok(false),
            _ => Err(ConfigError::Invalid { name, value }),
        })
        .transpose()
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },

    #[error(transparent)]
    Gateway(#[from] fsb_03_webhook_gateway::ConfigError),
}
