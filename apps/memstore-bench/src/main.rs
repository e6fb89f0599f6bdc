//! Benchmark harness for the in-memory table layouts.
//!
//! Times the reference workloads against row-major, column-major and
//! indexed row-major tables and asserts that every layout agrees:
//! - Narrow column sum: similar cost on every layout
//! - Wide column sum: column layout reads contiguous memory
//! - Predicated column sum: index on column 2 skips most rows
//! - Predicated update: index on column 0 skips most rows

mod benchmarks;
mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.options.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let workloads = benchmarks::for_command(cli.command);
    let mut reports = Vec::with_capacity(workloads.len());
    for workload in &workloads {
        tracing::info!("Running workload '{}'", workload.name);
        let report = benchmarks::runner::run_workload(workload, &cli.options)?;
        if !cli.options.json {
            report.print();
            println!();
        }
        reports.push(report);
    }

    if cli.options.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        println!("All {} workload(s) returned identical results.", reports.len());
    }

    Ok(())
}
