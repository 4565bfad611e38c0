//! Micro-operation benchmarks for the three eviction policies.
//!
//! Run with: `cargo bench --bench policies`
//!
//! Measures per-operation latency for get and set under identical
//! conditions, plus an interleaved set/get trace over a keyspace twice the
//! cache's capacity (the workload the original hit-ratio benchmarks used).

use std::hint::black_box;
use std::time::Instant;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use freqkit::policy::gdsf::GdsfCache;
use freqkit::policy::lfu::LfuCache;
use freqkit::policy::lfuda::LfudaCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CAPACITY: f64 = 8192.0;
const OPS: u64 = 100_000;

// ============================================================================
// Get Hit Latency (ns/op)
// ============================================================================

macro_rules! bench_get_hit {
    ($group:expr, $name:literal, $cache:ty) => {
        $group.bench_function($name, |b| {
            b.iter_custom(|iters| {
                let mut cache: $cache = <$cache>::new(CAPACITY);
                for i in 0..4096u64 {
                    cache.set(i, 1u64);
                }
                let start = Instant::now();
                for _ in 0..iters {
                    for i in 0..OPS {
                        let key = i % 4096;
                        black_box(cache.get(&key));
                    }
                }
                start.elapsed()
            })
        });
    };
}

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit_ns");
    group.throughput(Throughput::Elements(OPS));

    bench_get_hit!(group, "lfu", LfuCache<u64, u64>);
    bench_get_hit!(group, "lfuda", LfudaCache<u64, u64>);
    bench_get_hit!(group, "gdsf", GdsfCache<u64, u64>);

    group.finish();
}

// ============================================================================
// Set Churn Latency (ns/op, keyspace 2x capacity, constant eviction)
// ============================================================================

macro_rules! bench_set_churn {
    ($group:expr, $name:literal, $cache:ty) => {
        $group.bench_function($name, |b| {
            b.iter_custom(|iters| {
                let mut cache: $cache = <$cache>::new(CAPACITY);
                let mut rng = StdRng::seed_from_u64(42);
                let trace: Vec<u64> = (0..OPS).map(|_| rng.gen_range(0..16_384)).collect();
                let start = Instant::now();
                for _ in 0..iters {
                    for &key in &trace {
                        black_box(cache.set(key, 1u64));
                    }
                }
                start.elapsed()
            })
        });
    };
}

fn bench_set_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_churn_ns");
    group.throughput(Throughput::Elements(OPS));

    bench_set_churn!(group, "lfu", LfuCache<u64, u64>);
    bench_set_churn!(group, "lfuda", LfudaCache<u64, u64>);
    bench_set_churn!(group, "gdsf", GdsfCache<u64, u64>);

    group.finish();
}

// ============================================================================
// Interleaved Trace (set on even steps, get on every step)
// ============================================================================

macro_rules! bench_trace {
    ($group:expr, $name:literal, $cache:ty) => {
        $group.bench_function($name, |b| {
            b.iter_custom(|iters| {
                let mut cache: $cache = <$cache>::new(CAPACITY);
                let mut rng = StdRng::seed_from_u64(7);
                let trace: Vec<u64> = (0..OPS).map(|_| rng.gen_range(0..32_768)).collect();
                let start = Instant::now();
                for _ in 0..iters {
                    for (step, &key) in trace.iter().enumerate() {
                        if step % 2 == 0 {
                            cache.set(key, 1u64);
                        }
                        black_box(cache.get(&key));
                    }
                }
                start.elapsed()
            })
        });
    };
}

fn bench_trace(c: &mut Criterion) {
    let mut group = c.benchmark_group("interleaved_trace_ns");
    group.throughput(Throughput::Elements(OPS));

    bench_trace!(group, "lfu", LfuCache<u64, u64>);
    bench_trace!(group, "lfuda", LfudaCache<u64, u64>);
    bench_trace!(group, "gdsf", GdsfCache<u64, u64>);

    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_set_churn, bench_trace);
criterion_main!(benches);
