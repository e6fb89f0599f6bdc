//! Query benchmarks across physical layouts.
//!
//! Mirrors the harness workloads:
//! - Narrow and wide full column sums (layout barely matters / column wins)
//! - Selective predicated column sum (index on column 2 wins)
//! - Selective predicated update (index on column 0 wins)

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use memstore_core::config::{LoaderConfig, TableConfig};
use memstore_core::loader::RandomizedLoader;
use memstore_core::table::{Layout, Table};
use std::hint::black_box;
use std::time::Duration;

const ROWS: usize = 200_000;

/// Loads one table per layout, indexing `index_column` on the indexed one.
fn load_tables(num_cols: usize, index_column: usize) -> Vec<Box<dyn Table>> {
    let loader = RandomizedLoader::new(LoaderConfig {
        num_rows: ROWS,
        num_cols,
        ..LoaderConfig::default()
    })
    .unwrap();

    [
        Layout::Row,
        Layout::Column,
        Layout::IndexedRow {
            index_column: Some(index_column),
        },
    ]
    .iter()
    .map(|layout| {
        let mut table = layout.build(&TableConfig::default());
        table.load(&loader).unwrap();
        table
    })
    .collect()
}

fn benchmark_column_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_sum");

    for num_cols in [3, 20] {
        for table in load_tables(num_cols, 0) {
            group.bench_with_input(
                BenchmarkId::new(table.layout().to_string(), num_cols),
                &table,
                |b, table| b.iter(|| black_box(table.column_sum())),
            );
        }
    }

    group.finish();
}

fn benchmark_predicated_column_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicated_column_sum");

    for table in load_tables(4, 2) {
        group.bench_function(table.layout().to_string(), |b| {
            b.iter(|| black_box(table.predicated_column_sum(black_box(500), black_box(10))))
        });
    }

    group.finish();
}

fn benchmark_predicated_all_columns_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicated_all_columns_sum");

    for table in load_tables(20, 0) {
        group.bench_function(table.layout().to_string(), |b| {
            b.iter(|| black_box(table.predicated_all_columns_sum(black_box(1000))))
        });
    }

    group.finish();
}

fn benchmark_predicated_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("predicated_update");

    for mut table in load_tables(4, 0) {
        let name = table.layout().to_string();
        group.bench_function(name, |b| {
            b.iter(|| black_box(table.predicated_update(black_box(10))))
        });
    }

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .sample_size(20)
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(3));
    targets = benchmark_column_sum,
        benchmark_predicated_column_sum,
        benchmark_predicated_all_columns_sum,
        benchmark_predicated_update
);

criterion_main!(benches);
