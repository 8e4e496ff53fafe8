//! # Attack Simulations
//!
//! What an attacker who can observe or forge deliveries might try, and the
//! rejection each attempt must produce.

pub mod forgery;
pub mod replay;
