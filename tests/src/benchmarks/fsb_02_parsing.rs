//! # FSB-02 Parsing Benchmarks

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use fsb_02_event_parsing::parse_event;
use serde_json::Value;

use crate::fixtures::{announcement_body, ping_body, product_updated_body};

fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or(Value::Null)
}

pub fn bench_parse_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("fsb-02/parse");

    let ping = json(&ping_body(true));
    group.bench_function("ping", |b| {
        b.iter(|| black_box(parse_event(ping.clone()).is_ok()))
    });

    let product = json(&product_updated_body(1, 0b11111));
    group.bench_function("product_updated", |b| {
        b.iter(|| black_box(parse_event(product.clone()).is_ok()))
    });

    for count in [1u64, 10, 100] {
        let ids: Vec<u64> = (0..count).collect();
        let announcement = json(&announcement_body(&ids));
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(
            BenchmarkId::new("announcement_created", count),
            &announcement,
            |b, value| b.iter(|| black_box(parse_event(value.clone()).is_ok())),
        );
    }

    group.finish();
}
