//! # Event Parsing (FSB-02)
//!
//! Turns the JSON body of a verified delivery into an [`FsbEvent`].
//!
//! ## Decoding Rules
//!
//! - `timestamp` is an epoch offset, decoded with the same helper the
//!   verifier uses for the `webhook-timestamp` header.
//! - The three known event types decode `data` into their typed entity.
//!   Flag integers become `Bitfield`s, `until` becomes an optional time.
//! - Any other type becomes `FsbEvent::Unknown`, with `data` untouched.
//!
//! [`FsbEvent`]: shared_types::FsbEvent

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod parser;

pub use domain::errors::EventParseError;
pub use parser::{parse_event, supported_event_type};
