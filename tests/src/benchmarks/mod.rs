//! # Webhook Benchmarks
//!
//! Criterion benchmarks per crate, collected by `benches/webhook_benchmarks.rs`.

pub mod fsb_01_verification;
pub mod fsb_02_parsing;
pub mod shared_bus_dispatch;
