//! # FreeStuff Webhook Benchmarks
//!
//! | Crate | Operation | Target |
//! |-------|-----------|--------|
//! | fsb-01 | Verify one delivery | < 100µs |
//! | fsb-02 | Parse product_updated | < 20µs |
//! | shared-bus | Emit to 8 listeners | < 5µs |

use criterion::{criterion_group, criterion_main};
use fsb_tests::benchmarks::{fsb_01_verification, fsb_02_parsing, shared_bus_dispatch};

criterion_group!(
    benches,
    fsb_01_verification::bench_verify_single,
    fsb_01_verification::bench_body_sizes,
    fsb_02_parsing::bench_parse_events,
    shared_bus_dispatch::bench_emit,
);
criterion_main!(benches);
