//! Benchmark workloads.
//!
//! Each workload loads the same generated rows into a row, a column and an
//! indexed table (untimed), then times one query per layout and checks that
//! every layout returned the same value.

pub mod runner;

use crate::cli::Commands;

/// Query timed by a workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    ColumnSum,
    PredicatedColumnSum { threshold1: i32, threshold2: i32 },
    PredicatedUpdate { threshold: i32 },
}

/// A reference workload: table shape, indexed column and query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workload {
    pub name: &'static str,
    pub num_rows: usize,
    pub num_cols: usize,
    pub index_column: usize,
    pub query: Query,
}

/// Full column scans on a narrow table: every layout reads most of the data.
pub const COLUMN_SUM_NARROW: Workload = Workload {
    name: "column-sum-narrow",
    num_rows: 1_000_000,
    num_cols: 3,
    index_column: 0,
    query: Query::ColumnSum,
};

/// Full column scans on a wide table: the column layout reads contiguous memory.
pub const COLUMN_SUM_WIDE: Workload = Workload {
    name: "column-sum-wide",
    num_rows: 1_000_000,
    num_cols: 20,
    index_column: 0,
    query: Query::ColumnSum,
};

/// Highly selective predicate on an indexed column.
pub const PREDICATED_COLUMN_SUM: Workload = Workload {
    name: "predicated-column-sum",
    num_rows: 1_000_000,
    num_cols: 4,
    index_column: 2,
    query: Query::PredicatedColumnSum {
        threshold1: 500,
        threshold2: 10,
    },
};

/// Highly selective update. The update neither filters on nor reads the
/// column it writes, so the returned count is stable across repetitions.
pub const PREDICATED_UPDATE: Workload = Workload {
    name: "predicated-update",
    num_rows: 1_000_000,
    num_cols: 4,
    index_column: 0,
    query: Query::PredicatedUpdate { threshold: 10 },
};

pub const ALL: [Workload; 4] = [
    COLUMN_SUM_NARROW,
    COLUMN_SUM_WIDE,
    PREDICATED_COLUMN_SUM,
    PREDICATED_UPDATE,
];

/// Workloads selected by a CLI command.
pub fn for_command(command: Commands) -> Vec<Workload> {
    match command {
        Commands::ColumnSumNarrow => vec![COLUMN_SUM_NARROW],
        Commands::ColumnSumWide => vec![COLUMN_SUM_WIDE],
        Commands::PredicatedColumnSum => vec![PREDICATED_COLUMN_SUM],
        Commands::PredicatedUpdate => vec![PREDICATED_UPDATE],
        Commands::All => ALL.to_vec(),
    }
}
