use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub options: RunOptions,
}

/// Options shared by every workload.
#[derive(Args, Debug, Clone)]
pub struct RunOptions {
    /// Number of generated rows (default: the workload's own size)
    #[arg(short, long, global = true)]
    pub rows: Option<usize>,

    /// Index into the fixed seed table (0-4)
    #[arg(short, long, global = true, default_value_t = 0)]
    pub seed_id: usize,

    /// Timed repetitions per layout
    #[arg(short, long, global = true, default_value_t = 5)]
    pub iterations: usize,

    /// Print a JSON report instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum Commands {
    /// Full column sum over a narrow table (3 columns)
    ColumnSumNarrow,

    /// Full column sum over a wide table (20 columns)
    ColumnSumWide,

    /// Highly selective two-predicate column sum (index on column 2)
    PredicatedColumnSum,

    /// Highly selective predicated update (index on column 0)
    PredicatedUpdate,

    /// Run all workloads
    All,
}
