//! Measure range-lock contention with many concurrent record writers.
//!
//!   $ cargo bench --bench contention_benchmark
//!
//! `same_index` funnels every writer through one exclusive region;
//! `distinct_index` gives each writer its own slot, so only the
//! per-call open/lock/close overhead remains.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main, measurement::WallTime};
use rand::{Rng, rng};
use slotfile::{Record, RecordStore, StoreConfig};
use std::thread;
use tempfile::tempdir;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

const THREADS: [usize; 3] = [1, 4, 8];
const WRITES_PER_THREAD: usize = 200;

// ---------------------------------------------------------------------------
// Benchmark
// ---------------------------------------------------------------------------

fn random_record() -> Record {
    let mut rng = rng();
    // random payload so every write actually changes the slot
    let value: String = (0..31).map(|_| rng.random_range('a'..='z')).collect();
    Record::from_strs("bench", &value)
}

fn run_writers(store: &RecordStore, threads: usize, same_index: bool) {
    thread::scope(|s| {
        for t in 0..threads {
            s.spawn(move || {
                let record = random_record();
                let index = if same_index { 0 } else { t as u64 };
                for _ in 0..WRITES_PER_THREAD {
                    store.write_record(index, &record).unwrap();
                }
            });
        }
    });
}

fn contention_bench(c: &mut Criterion<WallTime>) {
    let mut group = c.benchmark_group("writers_vs_range_lock");
    group.sample_size(10);

    for &threads in &THREADS {
        for (label, same_index) in [("same_index", true), ("distinct_index", false)] {
            group.bench_with_input(
                BenchmarkId::new(label, format!("{threads}_threads")),
                &threads,
                |b, &threads| {
                    // ----- one fresh store per benchmark -----
                    let dir = tempdir().unwrap();
                    let store = RecordStore::open(StoreConfig::new(dir.path().join("bench.bin")));

                    b.iter(|| run_writers(&store, threads, same_index));
                },
            );
        }
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(benches, contention_bench);
criterion_main!(benches);
