// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use bastion_alloc::{SecretString, SecretVec};

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

const SIZES: [usize; 4] = [100, 1_000, 10_000, 100_000];

// =============================================================================
// Vec vs SecretVec
// =============================================================================

fn bench_vec_push_growing(c: &mut Criterion) {
    let mut group = c.benchmark_group("vec_push_growing");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.push(i as u8);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("SecretVec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = SecretVec::new();
                for i in 0..s {
                    vec.push(i as u8).expect("push");
                }
                black_box(vec)
            });
        });
    }

    group.finish();
}

fn bench_vec_push_no_alloc(c: &mut Criterion) {
    let mut group = c.benchmark_group("vec_push_no_alloc");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            let mut vec = Vec::<u8>::with_capacity(s);
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i as u8);
                }
                black_box(&vec);
            });
        });

        group.bench_with_input(BenchmarkId::new("SecretVec", size), &size, |b, &s| {
            let mut vec = SecretVec::<u8>::with_capacity(s).expect("allocation");
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i as u8).expect("push");
                }
                black_box(&vec);
            });
        });
    }

    group.finish();
}

fn bench_vec_extend_from_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("vec_extend_from_slice");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Bytes(size as u64));
        let source: Vec<u8> = (0..size).map(|i| i as u8).collect();

        group.bench_with_input(BenchmarkId::new("Vec", size), &source, |b, src| {
            b.iter(|| {
                let mut vec = Vec::new();
                vec.extend_from_slice(src);
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("SecretVec", size), &source, |b, src| {
            b.iter(|| {
                let mut vec = SecretVec::new();
                vec.extend_from_slice(src).expect("extend");
                black_box(vec)
            });
        });
    }

    group.finish();
}

fn bench_vec_drain_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("vec_drain_slice");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(
            BenchmarkId::new("SecretVec::extend_from_mut_slice", size),
            &size,
            |b, &s| {
                b.iter_batched(
                    || {
                        let source: Vec<u8> = (0..s).map(|i| i as u8).collect();
                        (SecretVec::new(), source)
                    },
                    |(mut vec, mut source)| {
                        vec.extend_from_mut_slice(&mut source).expect("extend");
                        black_box(vec)
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_vec_self_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("vec_self_append");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s).map(|i| i as u8).collect::<Vec<u8>>(),
                |mut vec| {
                    vec.extend_from_within(..);
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("SecretVec", size), &size, |b, &s| {
            b.iter_batched(
                || SecretVec::from_iter_exact((0..s).map(|i| i as u8)).expect("allocation"),
                |mut vec| {
                    vec.extend_from_within(..).expect("extend");
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// String vs SecretString
// =============================================================================

fn bench_string_push_str(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_push_str");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Bytes(size as u64));
        let chunk = "0123456789abcdef";
        let rounds = size / chunk.len();

        group.bench_with_input(BenchmarkId::new("String", size), &rounds, |b, &n| {
            b.iter(|| {
                let mut s = String::new();
                for _ in 0..n {
                    s.push_str(chunk);
                }
                black_box(s)
            });
        });

        group.bench_with_input(BenchmarkId::new("SecretString", size), &rounds, |b, &n| {
            b.iter(|| {
                let mut s = SecretString::new();
                for _ in 0..n {
                    s.push_str(chunk).expect("push_str");
                }
                black_box(s)
            });
        });
    }

    group.finish();
}

fn bench_string_push_char(c: &mut Criterion) {
    let mut group = c.benchmark_group("string_push_char");
    configure_group(&mut group);

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("String", size), &size, |b, &n| {
            b.iter(|| {
                let mut s = String::new();
                for _ in 0..n {
                    s.push('x');
                }
                black_box(s)
            });
        });

        group.bench_with_input(BenchmarkId::new("SecretString", size), &size, |b, &n| {
            b.iter(|| {
                let mut s = SecretString::new();
                for _ in 0..n {
                    s.push('x').expect("push");
                }
                black_box(s)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_vec_push_growing,
    bench_vec_push_no_alloc,
    bench_vec_extend_from_slice,
    bench_vec_drain_slice,
    bench_vec_self_append,
    bench_string_push_str,
    bench_string_push_char,
);
criterion_main!(benches);
