// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use mho_array::GrowableArray;
use mho_dbg::DebugAllocator;

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench alloc
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if is_fast_mode() {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

// =============================================================================
// Vec vs GrowableArray
// =============================================================================

fn bench_push_individual(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_individual");
    configure_group(&mut group);

    for size in [100u32, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(u64::from(size)));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.push(i);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("GrowableArray", size), &size, |b, &s| {
            b.iter(|| {
                let mut arr = GrowableArray::new();
                for i in 0..s {
                    arr.push(i).expect("Failed to push");
                }
                black_box(arr)
            });
        });
    }

    group.finish();
}

fn bench_push_no_alloc(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_no_alloc");
    configure_group(&mut group);

    for size in [100u32, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(u64::from(size)));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            let mut vec = Vec::with_capacity(s as usize);
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i);
                }
                black_box(&vec);
            });
        });

        group.bench_with_input(BenchmarkId::new("GrowableArray", size), &size, |b, &s| {
            let mut arr = GrowableArray::with_capacity(s).expect("Failed to allocate");
            b.iter(|| {
                arr.clear();
                for i in 0..s {
                    arr.push(i).expect("Failed to push");
                }
                black_box(&arr);
            });
        });
    }

    group.finish();
}

fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_front");
    configure_group(&mut group);

    for size in [100u32, 1_000, 10_000] {
        group.throughput(Throughput::Elements(u64::from(size)));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.insert(0, i);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("GrowableArray", size), &size, |b, &s| {
            b.iter(|| {
                let mut arr = GrowableArray::new();
                for i in 0..s {
                    arr.insert(0, i).expect("Failed to insert");
                }
                black_box(arr)
            });
        });
    }

    group.finish();
}

fn bench_extend_from_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("extend_from_slice");
    configure_group(&mut group);

    for size in [100u32, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(u64::from(size)));
        let source: Vec<u32> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("Vec", size), &source, |b, src| {
            b.iter(|| {
                let mut vec = Vec::new();
                vec.extend_from_slice(src);
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("GrowableArray", size), &source, |b, src| {
            b.iter(|| {
                let mut arr = GrowableArray::new();
                arr.extend_from_slice(src).expect("Failed to extend");
                black_box(arr)
            });
        });
    }

    group.finish();
}

fn bench_clear(c: &mut Criterion) {
    let mut group = c.benchmark_group("clear");
    configure_group(&mut group);

    for size in [100u32, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(u64::from(size)));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s).collect::<Vec<u32>>(),
                |mut vec| {
                    vec.clear();
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("GrowableArray", size), &size, |b, &s| {
            b.iter_batched(
                || {
                    let mut arr = GrowableArray::with_capacity(s).expect("Failed to allocate");
                    for i in 0..s {
                        arr.push(i).expect("Failed to push");
                    }
                    arr
                },
                |mut arr| {
                    arr.clear();
                    black_box(arr)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// System vs DebugAllocator
// =============================================================================

fn bench_debug_allocator_overhead(c: &mut Criterion) {
    let mut group = c.benchmark_group("debug_allocator_overhead");
    configure_group(&mut group);

    for size in [100u32, 1_000, 10_000] {
        group.throughput(Throughput::Elements(u64::from(size)));

        group.bench_with_input(BenchmarkId::new("System", size), &size, |b, &s| {
            b.iter(|| {
                let mut arr = GrowableArray::new();
                for i in 0..s {
                    arr.push(i).expect("Failed to push");
                }
                black_box(arr)
            });
        });

        group.bench_with_input(BenchmarkId::new("DebugAllocator", size), &size, |b, &s| {
            b.iter_batched(
                DebugAllocator::new,
                |dbg| {
                    {
                        let mut arr = GrowableArray::new_in(&dbg);
                        for i in 0..s {
                            arr.push(i).expect("Failed to push");
                        }
                        black_box(&arr);
                    }
                    black_box(dbg.report())
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    array_benches,
    bench_push_no_alloc,
    bench_push_individual,
    bench_insert_front,
    bench_extend_from_slice,
    bench_clear
);

criterion_group!(dbg_benches, bench_debug_allocator_overhead);

criterion_main!(array_benches, dbg_benches);
