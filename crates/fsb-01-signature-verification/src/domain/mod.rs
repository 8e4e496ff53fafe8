//! # Domain Layer
//!
//! Verification logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod config;
pub mod entities;
pub mod errors;
pub mod replay_cache;
pub mod signed_content;
