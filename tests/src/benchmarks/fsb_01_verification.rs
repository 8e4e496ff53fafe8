//! # FSB-01 Verification Benchmarks
//!
//! - Single delivery, fresh id each iteration
//! - Body size scaling (signature cost grows with content)
//! - Replay cache under a large live id set

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use fsb_01_signature_verification::{SignedMessageVerifier, VerifierOptions};

use crate::fixtures::{ping_body, Partner};

fn verifier(partner: &Partner, skip_duplicate_check: bool) -> SignedMessageVerifier {
    let options = VerifierOptions::new(partner.verifying_key())
        .with_skip_duplicate_check(skip_duplicate_check);
    match SignedMessageVerifier::new(options) {
        Ok(verifier) => verifier,
        Err(e) => panic!("benchmark key rejected: {e}"),
    }
}

pub fn bench_verify_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("fsb-01/verify");
    group.measurement_time(Duration::from_secs(5));

    let partner = Partner::new(90);
    let body = ping_body(true);

    // Pre-signed once; the duplicate check is off so it can be reused.
    let reusable = partner.sign("bench", Utc::now(), body.as_bytes());
    let verifier_no_replay = verifier(&partner, true);
    group.bench_function("signature_only", |b| {
        b.iter(|| black_box(verifier_no_replay.verify(reusable.clone()).is_valid()))
    });

    let strict = verifier(&partner, false);
    let counter = AtomicU64::new(0);
    group.bench_function("strict_fresh_id", |b| {
        b.iter_batched(
            || {
                let id = counter.fetch_add(1, Ordering::Relaxed);
                partner.sign(&format!("bench-{id}"), Utc::now(), body.as_bytes())
            },
            |input| black_box(strict.verify(input).is_valid()),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

pub fn bench_body_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("fsb-01/body_size");
    let partner = Partner::new(91);
    let verifier = verifier(&partner, true);

    for size in [256usize, 4 * 1024, 64 * 1024] {
        let body = format!(
            r#"{{"type":"fsb:event:ping","timestamp":1,"data":{{"manual":true,"pad":"{}"}}}}"#,
            "x".repeat(size)
        );
        let input = partner.sign("size", Utc::now(), body.as_bytes());

        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| black_box(verifier.verify(input.clone()).is_valid()))
        });
    }

    group.finish();
}
