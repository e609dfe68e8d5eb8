// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use bastion_alloc::{SecretArray, SecretVec};
use bastion_view::ViewExt;

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if std::env::var("FAST_BENCH").is_ok_and(|v| v == "1") {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

fn bench_runtime_ranges(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_runtime_ranges");
    configure_group(&mut group);

    let data = SecretVec::from_iter_exact(0..4096u32).expect("allocation");

    group.bench_function(BenchmarkId::new("slice_index", 4096), |b| {
        b.iter(|| black_box(&data.as_slice()[black_box(128)..black_box(1024)]).len());
    });

    group.bench_function(BenchmarkId::new("item_range", 4096), |b| {
        b.iter(|| {
            data.item_range(black_box(128), black_box(1024))
                .map(|v| v.len())
                .unwrap_or(0)
        });
    });

    group.bench_function(BenchmarkId::new("byte_range_nested", 4096), |b| {
        b.iter(|| {
            data.item_range(black_box(128), black_box(1024))
                .and_then(|v| v.byte_range(black_box(4), black_box(64)))
                .map(|v| v.parts().size_bytes())
                .unwrap_or(0)
        });
    });

    group.finish();
}

fn bench_static_ranges(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_static_ranges");
    configure_group(&mut group);

    let block = SecretArray::<u8, 64>::new();

    group.bench_function("static_byte_range", |b| {
        b.iter(|| black_box(&block).static_byte_range::<16, 48>().len());
    });

    group.finish();
}

criterion_group!(benches, bench_runtime_ranges, bench_static_ranges);
criterion_main!(benches);
