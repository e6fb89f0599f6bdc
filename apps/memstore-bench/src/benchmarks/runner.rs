use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use memstore_core::config::{seed, LoaderConfig, TableConfig};
use memstore_core::loader::RandomizedLoader;
use memstore_core::table::{Layout, Table};
use serde::Serialize;

use super::{Query, Workload};
use crate::cli::RunOptions;

/// Timing and result of one layout.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutResult {
    pub layout: String,
    pub result: i64,
    pub best: Duration,
    pub mean: Duration,
}

/// Outcome of one workload across all layouts.
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadReport {
    pub workload: &'static str,
    pub loader: LoaderConfig,
    pub index_column: usize,
    pub iterations: usize,
    pub results: Vec<LayoutResult>,
}

impl WorkloadReport {
    /// Prints a human-readable summary.
    pub fn print(&self) {
        println!(
            "{} ({} rows x {} columns, seed {}, index column {})",
            self.workload,
            self.loader.num_rows,
            self.loader.num_cols,
            self.loader.seed,
            self.index_column
        );
        println!("{}", "-".repeat(60));
        for r in &self.results {
            println!(
                "  {:<12} result={:<16} best={:>12?} mean={:>12?}",
                r.layout, r.result, r.best, r.mean
            );
        }
    }
}

/// Runs `query` once against `table`.
fn execute(table: &mut dyn Table, query: Query) -> i64 {
    match query {
        Query::ColumnSum => table.column_sum(),
        Query::PredicatedColumnSum {
            threshold1,
            threshold2,
        } => table.predicated_column_sum(threshold1, threshold2),
        Query::PredicatedUpdate { threshold } => {
            // counts are bounded by the row count, which fits in i64
            table.predicated_update(threshold) as i64
        }
    }
}

/// Fails unless every table holds the same values in column `col`.
fn check_column_agreement(tables: &[Box<dyn Table>], col: usize) -> Result<()> {
    let Some((reference, rest)) = tables.split_first() else {
        return Ok(());
    };
    for table in rest {
        if table.num_rows() != reference.num_rows() {
            bail!(
                "{} has {} rows, {} has {}",
                reference.layout(),
                reference.num_rows(),
                table.layout(),
                table.num_rows()
            );
        }
        for row in 0..reference.num_rows() {
            let expected = reference.get_int_field(row, col);
            let got = table.get_int_field(row, col);
            if got != expected {
                tracing::error!(
                    "column {} row {}: {} holds {}, {} holds {}",
                    col,
                    row,
                    reference.layout(),
                    expected,
                    table.layout(),
                    got
                );
                bail!(
                    "{} and {} disagree at row {} column {}: {} vs {}",
                    reference.layout(),
                    table.layout(),
                    row,
                    col,
                    expected,
                    got
                );
            }
        }
    }
    Ok(())
}

/// Loads every layout untimed, then times the workload's query on each.
///
/// Fails if any layout disagrees with the row layout's result.
pub fn run_workload(workload: &Workload, options: &RunOptions) -> Result<WorkloadReport> {
    let seed = seed(options.seed_id)
        .with_context(|| format!("seed id {} out of range (0-4)", options.seed_id))?;
    if options.iterations == 0 {
        bail!("iterations must be greater than 0");
    }
    let divisor = u32::try_from(options.iterations)
        .with_context(|| format!("iterations {} exceeds {}", options.iterations, u32::MAX))?;

    let loader_config = LoaderConfig {
        seed,
        num_rows: options.rows.unwrap_or(workload.num_rows),
        num_cols: workload.num_cols,
        ..LoaderConfig::default()
    };
    let loader = RandomizedLoader::new(loader_config.clone())
        .with_context(|| format!("failed to prepare workload '{}'", workload.name))?;

    let layouts = [
        Layout::Row,
        Layout::Column,
        Layout::IndexedRow {
            index_column: Some(workload.index_column),
        },
    ];

    let load_start = Instant::now();
    let mut tables = Vec::with_capacity(layouts.len());
    for layout in layouts {
        let mut table = layout.build(&TableConfig::default());
        table
            .load(&loader)
            .with_context(|| format!("failed to load {layout} table"))?;
        tables.push(table);
    }
    tracing::info!(
        "Prepared '{}' in {:?}",
        workload.name,
        load_start.elapsed()
    );

    let mut results = Vec::with_capacity(tables.len());
    for table in tables.iter_mut() {
        let mut result = None;
        let mut best = Duration::MAX;
        let mut total = Duration::ZERO;
        for _ in 0..options.iterations {
            let start = Instant::now();
            let value = std::hint::black_box(execute(table.as_mut(), workload.query));
            let elapsed = start.elapsed();

            best = best.min(elapsed);
            total += elapsed;
            match result {
                None => result = Some(value),
                Some(previous) if previous != value => bail!(
                    "{} table returned {} then {} for '{}'",
                    table.layout(),
                    previous,
                    value,
                    workload.name
                ),
                Some(_) => {}
            }
        }

        let layout = table.layout().to_string();
        tracing::debug!("{} {}: best {:?}", workload.name, layout, best);
        results.push(LayoutResult {
            layout,
            // iterations > 0, so the loop ran at least once
            result: result.unwrap_or_default(),
            best,
            mean: total / divisor,
        });
    }

    let expected = results[0].result;
    if let Some(mismatch) = results.iter().find(|r| r.result != expected) {
        tracing::error!(
            "'{}' mismatch: {} returned {}, {} returned {}",
            workload.name,
            results[0].layout,
            expected,
            mismatch.layout,
            mismatch.result
        );
        bail!(
            "layouts disagree on '{}': {} vs {}",
            workload.name,
            expected,
            mismatch.result
        );
    }

    if let Query::PredicatedUpdate { .. } = workload.query {
        // every layout ran the update the same number of times
        check_column_agreement(&tables, 3)
            .with_context(|| format!("post-update state differs on '{}'", workload.name))?;
    }

    Ok(WorkloadReport {
        workload: workload.name,
        loader: loader_config,
        index_column: workload.index_column,
        iterations: options.iterations,
        results,
    })
}
