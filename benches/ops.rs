//! Micro-operation benchmarks for all cache policies.
//!
//! Run with: `cargo bench --bench ops`
//!
//! Measures `write` and `read` latency at capacity 1000 for every policy
//! under identical key streams.

use std::hint::black_box;
use std::time::Instant;

use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use evictkit::builder::{Cache, CacheBuilder, CachePolicy};
use evictkit::traits::CoreCache;

const CAPACITY: usize = 1_000;
const OPS: u64 = 10_000;
const UNIVERSE: u64 = 10_000;

/// XorShift64 key stream, identical for every policy.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_key(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x % (UNIVERSE + 1)
    }
}

fn warmed(policy: CachePolicy) -> Cache<u64, u64> {
    let mut cache = CacheBuilder::new(CAPACITY).build(policy);
    for i in 0..CAPACITY as u64 {
        cache.write(i, i);
    }
    cache
}

// ============================================================================
// Write (ns/op)
// ============================================================================

fn bench_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("write");
    group.throughput(Throughput::Elements(OPS));

    for policy in CachePolicy::ALL {
        group.bench_function(policy.name(), |b| {
            b.iter_batched(
                || warmed(policy),
                |mut cache| {
                    let mut keys = XorShift64::new(7);
                    for _ in 0..OPS {
                        let key = keys.next_key();
                        cache.write(black_box(key), key);
                    }
                    cache
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

// ============================================================================
// Read (ns/op)
// ============================================================================

fn bench_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    group.throughput(Throughput::Elements(OPS));

    for policy in CachePolicy::ALL {
        group.bench_function(policy.name(), |b| {
            b.iter_custom(|iters| {
                let mut cache = warmed(policy);
                let mut keys = XorShift64::new(11);
                let start = Instant::now();
                for _ in 0..iters {
                    for _ in 0..OPS {
                        black_box(cache.read(&keys.next_key()));
                    }
                }
                start.elapsed()
            })
        });
    }
    group.finish();
}

// ============================================================================
// Read-through (miss → write)
// ============================================================================

fn bench_read_through(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_through");
    group.throughput(Throughput::Elements(OPS));

    for policy in CachePolicy::ALL {
        group.bench_function(policy.name(), |b| {
            b.iter_custom(|iters| {
                let mut cache = warmed(policy);
                let mut keys = XorShift64::new(13);
                let start = Instant::now();
                for _ in 0..iters {
                    for _ in 0..OPS {
                        let key = keys.next_key();
                        if cache.read(&key).is_none() {
                            cache.write(key, key);
                        }
                    }
                }
                start.elapsed()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_write, bench_read, bench_read_through);
criterion_main!(benches);
