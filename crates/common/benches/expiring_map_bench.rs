//! Expiring map benchmarks
//!
//! Covers put, get, purge and keys snapshots at a few map sizes.
//!
//! Run with: `cargo bench --bench expiring_map_bench -p lapse-common`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lapse_common::{ExpiringMap, ExpiringMapConfig, MockClock};

type BenchMap = ExpiringMap<u64, String, MockClock>;

fn populated(size: u64, clock: &MockClock) -> BenchMap {
    let mut map = BenchMap::with_clock(ExpiringMapConfig::default(), clock.clone())
        .unwrap_or_else(|_| unreachable!("default config is valid"));
    for i in 0..size {
        map.put(i, format!("value_{i}"), 1_000 + i64::try_from(i).unwrap_or(0));
    }
    map
}

// ============================================================================
// Basic Operations Benchmarks
// ============================================================================

fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("expiring_map_put");

    for size in [100_u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("overwrite", size), &size, |b, &size| {
            let clock = MockClock::new();
            let mut map = populated(size, &clock);
            let mut counter = 0u64;
            b.iter(|| {
                map.put(black_box(counter % size), black_box(String::from("v")), 60_000);
                counter = counter.wrapping_add(1);
            });
        });
    }

    group.finish();
}

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("expiring_map_get_hit");

    for size in [100_u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let clock = MockClock::new();
            let map = populated(size, &clock);
            let mut counter = 0u64;
            b.iter(|| {
                let _ = black_box(map.try_get(&black_box(counter % size)));
                counter = counter.wrapping_add(1);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Expiration Benchmarks
// ============================================================================

fn bench_purge(c: &mut Criterion) {
    let mut group = c.benchmark_group("expiring_map_purge");

    for size in [100_u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("all_expired", size), &size, |b, &size| {
            b.iter_batched(
                || {
                    let clock = MockClock::new();
                    let map = populated(size, &clock);
                    clock.set_millis(i64::MAX / 2);
                    map
                },
                |mut map| black_box(map.size()),
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("expiring_map_keys");

    for size in [100_u64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let clock = MockClock::new();
            let map = populated(size, &clock);
            b.iter(|| black_box(map.keys()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_put, bench_get_hit, bench_purge, bench_keys);
criterion_main!(benches);
