//! # Event Bus Dispatch Benchmarks

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use shared_bus::InMemoryEventBus;
use shared_types::{EventType, FsbEvent, PingEvent};

pub fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-bus/emit");
    let event = FsbEvent::Ping {
        timestamp: Utc::now(),
        data: PingEvent { manual: true },
    };

    for listeners in [1usize, 8, 64] {
        let bus = InMemoryEventBus::new();
        let hits = Arc::new(AtomicU64::new(0));
        for _ in 0..listeners {
            let hits = Arc::clone(&hits);
            bus.on(EventType::Ping, move |_| {
                hits.fetch_add(1, Ordering::Relaxed);
            });
        }

        group.throughput(Throughput::Elements(listeners as u64));
        group.bench_with_input(BenchmarkId::from_parameter(listeners), &bus, |b, bus| {
            b.iter(|| black_box(bus.emit(&event)))
        });
    }

    group.finish();
}
