//! Storage engine error types.

use thiserror::Error;

/// Errors raised while configuring or loading a table.
///
/// Out-of-range field access is not represented here: it is a caller
/// contract violation and panics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Row buffer does not hold exactly `num_cols` fields
    #[error("Row {row} has {got} bytes, expected {expected} bytes")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// Index column outside the loaded column range
    #[error("Index column {column} out of range for table with {num_cols} columns")]
    InvalidIndexColumn { column: usize, num_cols: usize },

    /// `load` called on an already loaded table
    #[error("Table already loaded")]
    AlreadyLoaded,

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
