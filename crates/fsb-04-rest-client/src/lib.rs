//! # FreeStuff REST Client (FSB-04)
//!
//! A thin async client for the FreeStuff v2 API. Every call carries the
//! bearer token, the library `User-Agent` and the compatibility date the
//! webhook side also announces.
//!
//! ```ignore
//! use fsb_04_rest_client::{RestApiClient, RestClientConfig};
//!
//! let client = RestApiClient::new(token, RestClientConfig::default())?;
//! let pong = client.get_ping().await?;
//! if let Some(limit) = pong.rate_limit().remaining {
//!     tracing::debug!(remaining = limit, "Rate limit");
//! }
//! ```
//!
//! No retries: a failed call is returned to the caller as a [`RestError`].

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod client;
pub mod domain;

pub use client::RestApiClient;
pub use domain::config::{RestClientConfig, DEFAULT_BASE_URL};
pub use domain::entities::{ApiResponse, Problem, RateLimit};
pub use domain::errors::RestError;
