//! Criterion micro-benchmarks for exclusive owner construction, transfer and
//! indexed access.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use crab_bench::{payload_array, Payload, ARRAY_LEN};
use crab_own::ExclusiveOwner;
use crab_range::range_to;

/// Benchmark: allocate and free a single payload.
fn bench_make_drop(c: &mut Criterion) {
    c.bench_function("exclusive_make_drop", |b| {
        b.iter(|| {
            let owner = ExclusiveOwner::make(Payload::seeded(black_box(7)));
            black_box(owner.words[0]);
        });
    });
}

/// Benchmark: hand the allocation to manual management and take it back.
fn bench_unwrap_rewrap(c: &mut Criterion) {
    let mut owner = Some(ExclusiveOwner::make(Payload::seeded(3)));
    c.bench_function("exclusive_unwrap_rewrap", |b| {
        b.iter(|| {
            let raw = ExclusiveOwner::unwrap(owner.take().unwrap());
            // SAFETY: `raw` was produced by `unwrap` just above.
            owner = Some(unsafe { ExclusiveOwner::<Payload>::wrap_unchecked(black_box(raw)) });
        });
    });
}

/// Benchmark: checked indexed reads over a 4096-element array.
fn bench_array_index(c: &mut Criterion) {
    let array = payload_array(ARRAY_LEN);
    c.bench_function("exclusive_array_index_4k", |b| {
        b.iter(|| {
            let mut acc = 0u64;
            for i in range_to(array.len()) {
                acc = acc.wrapping_add(array[i].words[0]);
            }
            black_box(acc);
        });
    });
}

/// Benchmark: allocate a default-filled array.
fn bench_make_array(c: &mut Criterion) {
    c.bench_function("exclusive_make_array_4k", |b| {
        b.iter(|| {
            let array = ExclusiveOwner::<[Payload]>::make_array(black_box(ARRAY_LEN));
            black_box(array.len());
        });
    });
}

criterion_group!(
    benches,
    bench_make_drop,
    bench_unwrap_rewrap,
    bench_array_index,
    bench_make_array
);
criterion_main!(benches);
