//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that the webhook endpoint uses
//! - **Outbound (Driven)**: the clock verification reads

pub mod inbound;
pub mod outbound;
