//! Benchmarks for selection bookkeeping.
//!
//! Run with: cargo bench -p weft-grid

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use weft_core::collection::CollectionChange;
use weft_grid::{CellRegion, MultipleCopiesCollection, SelectedCells};

/// A checkerboard of `n`×`n` single cells: the worst case for compression.
fn checkerboard(n: usize) -> SelectedCells {
    let mut selection = SelectedCells::new();
    for column in 0..n {
        for row in 0..n {
            if (column + row) % 2 == 0 {
                selection.add(column, row);
            }
        }
    }
    selection
}

fn bench_add_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/add_cells");

    for n in [8, 16, 32] {
        group.bench_with_input(BenchmarkId::new("row_major", n), &n, |b, &n| {
            b.iter(|| {
                let mut selection = SelectedCells::new();
                for row in 0..n {
                    for column in 0..n {
                        selection.add(column, row);
                    }
                }
                black_box(selection.regions().len())
            })
        });
    }

    group.finish();
}

fn bench_deferred_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/deferred");

    for n in [8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || checkerboard(n),
                |mut selection| {
                    selection.begin_update();
                    selection.add_region(CellRegion::new(0, 0, n, n));
                    selection.remove_region(CellRegion::new(1, 1, n - 2, n - 2));
                    black_box(selection.end_update())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_row_shift(c: &mut Criterion) {
    c.bench_function("selection/row_insert", |b| {
        b.iter_batched(
            || checkerboard(16),
            |mut selection| black_box(selection.on_rows_changed(&CollectionChange::added(8, ()))),
            BatchSize::SmallInput,
        )
    });
}

fn bench_mirror_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("mirror/sync_to_count");

    for n in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || MultipleCopiesCollection::new(0u32, 0),
                |mut copies| {
                    copies.sync_to_count(n);
                    black_box(copies.len())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_add_block,
    bench_deferred_update,
    bench_row_shift,
    bench_mirror_sync
);
criterion_main!(benches);
