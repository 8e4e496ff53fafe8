//! # Integration Tests
//!
//! Cross-crate flows: signed HTTP delivery → verifier → parser → bus.

pub mod webhook_flow;
