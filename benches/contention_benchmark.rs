use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dual_atomic::{AtomicBase, Counter, RacyCounter, Workload};
use std::sync::Mutex;

const ITERATIONS: usize = 16 * 1024;

/// Lock-based baseline for the same workload.
struct MutexCounter(Mutex<i64>);

impl Counter for MutexCounter {
    type Value = i64;

    fn increment(&self) {
        *self.0.lock().unwrap() += 1;
    }

    fn decrement(&self) {
        *self.0.lock().unwrap() -= 1;
    }

    fn value(&self) -> i64 {
        *self.0.lock().unwrap()
    }
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_counter");
    group.throughput(Throughput::Elements(2 * ITERATIONS as u64));

    for contexts in [1usize, 2, 4, 8] {
        let workload = Workload::new(ITERATIONS, contexts);

        group.bench_with_input(BenchmarkId::new("atomic_base_i64", contexts), &workload, |b, w| {
            let counter = AtomicBase::<i64>::default();
            b.iter(|| w.run(&counter))
        });

        group.bench_with_input(BenchmarkId::new("atomic_base_u32", contexts), &workload, |b, w| {
            let counter = AtomicBase::<u32>::default();
            b.iter(|| w.run(&counter))
        });

        group.bench_with_input(BenchmarkId::new("std_mutex", contexts), &workload, |b, w| {
            let counter = MutexCounter(Mutex::new(0));
            b.iter(|| w.run(&counter))
        });

        group.bench_with_input(BenchmarkId::new("racy", contexts), &workload, |b, w| {
            let counter = RacyCounter::new(0);
            b.iter(|| w.run(&counter))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_contention);
criterion_main!(benches);
