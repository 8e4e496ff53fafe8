//! # FreeStuff Webhooks Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Partner-side signing helpers
//! ├── benchmarks/       # Criterion benchmarks per crate
//! ├── exploits/         # Replay and forgery attempts
//! └── integration/      # Cross-crate webhook flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p fsb-tests
//!
//! # By category
//! cargo test -p fsb-tests integration::
//! cargo test -p fsb-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p fsb-tests
//! ```

pub mod benchmarks;
pub mod exploits;
pub mod fixtures;
pub mod integration;
