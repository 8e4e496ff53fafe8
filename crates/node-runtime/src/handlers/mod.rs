//! # Event Handlers
//!
//! Listeners the node registers on the event bus.

pub mod event_logging;

pub use event_logging::register_logging_listeners;
