//! Table capability and its three physical layouts.

mod column_table;
mod indexed_row_table;
mod row_table;

use std::fmt;
use std::str::FromStr;

use crate::config::TableConfig;
use crate::error::StoreError;
use crate::field::FIELD_LEN;
use crate::loader::DataLoader;

pub use column_table::ColumnTable;
pub use indexed_row_table::IndexedRowTable;
pub use row_table::RowTable;

/// Fixed-width `i32` table with a fixed query surface.
///
/// Row ids are dense in `[0, num_rows)`, column ids dense in `[0, num_cols)`.
/// Sums accumulate in `i64`; `predicated_update` adds with 32-bit wrapping.
///
/// # Panics
/// Point access outside the loaded bounds, and queries that reference a
/// column the table does not have (columns 0-3), panic.
pub trait Table {
    /// Copies every row of `loader` into the table. Allowed exactly once.
    fn load(&mut self, loader: &dyn DataLoader) -> Result<(), StoreError>;

    /// Reads the field at (`row`, `col`).
    fn get_int_field(&self, row: usize, col: usize) -> i32;

    /// Overwrites the field at (`row`, `col`).
    fn put_int_field(&mut self, row: usize, col: usize, value: i32);

    /// `SELECT SUM(col0) FROM table`
    fn column_sum(&self) -> i64;

    /// `SELECT SUM(col0) FROM table WHERE col1 > threshold1 AND col2 < threshold2`
    fn predicated_column_sum(&self, threshold1: i32, threshold2: i32) -> i64;

    /// `SELECT SUM(col0) + ... + SUM(colN) FROM table WHERE col0 > threshold`
    fn predicated_all_columns_sum(&self, threshold: i32) -> i64;

    /// `UPDATE table SET col3 = col3 + col2 WHERE col0 < threshold`
    ///
    /// Returns the number of rows updated.
    fn predicated_update(&mut self, threshold: i32) -> usize;

    /// Number of loaded rows (0 before load).
    fn num_rows(&self) -> usize;

    /// Number of loaded columns (0 before load).
    fn num_cols(&self) -> usize;

    /// Physical layout of this table.
    fn layout(&self) -> Layout;
}

/// Physical table layout, parsed from `row`, `column`, `indexed` or `indexed:N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    Row,
    Column,
    IndexedRow { index_column: Option<usize> },
}

impl Layout {
    /// Constructs an unloaded table with this layout.
    pub fn build(&self, config: &TableConfig) -> Box<dyn Table> {
        match *self {
            Layout::Row => Box::new(RowTable::new()),
            Layout::Column => Box::new(ColumnTable::new()),
            Layout::IndexedRow { index_column } => {
                Box::new(IndexedRowTable::with_config(index_column, *config))
            }
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Row => write!(f, "row"),
            Layout::Column => write!(f, "column"),
            Layout::IndexedRow { index_column: None } => write!(f, "indexed"),
            Layout::IndexedRow {
                index_column: Some(col),
            } => write!(f, "indexed:{col}"),
        }
    }
}

impl FromStr for Layout {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "row" => Ok(Layout::Row),
            "column" => Ok(Layout::Column),
            "indexed" => Ok(Layout::IndexedRow { index_column: None }),
            other => other
                .strip_prefix("indexed:")
                .and_then(|col| col.parse().ok())
                .map(|col| Layout::IndexedRow {
                    index_column: Some(col),
                })
                .ok_or_else(|| StoreError::InvalidConfig(format!("unknown layout '{other}'"))),
        }
    }
}

/// Shape of a validated row source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LoadShape {
    pub num_rows: usize,
    pub num_cols: usize,
}

impl LoadShape {
    /// Total buffer length in bytes.
    pub fn byte_len(&self) -> usize {
        self.num_rows * self.num_cols * FIELD_LEN
    }
}

/// Checks every row buffer against the loader's declared column count
/// before anything is copied, so a failed load leaves the table untouched.
pub(crate) fn validate_rows(loader: &dyn DataLoader) -> Result<LoadShape, StoreError> {
    let num_cols = loader.num_cols();
    if num_cols == 0 {
        return Err(StoreError::InvalidConfig(
            "loader reports 0 columns".to_string(),
        ));
    }

    let rows = loader.rows();
    let row_len = num_cols * FIELD_LEN;
    rows.len()
        .checked_mul(row_len)
        .ok_or_else(|| {
            StoreError::InvalidConfig(format!(
                "{} x {} table overflows the address space",
                rows.len(),
                num_cols
            ))
        })?;

    if let Some((row, buf)) = rows.iter().enumerate().find(|(_, buf)| buf.len() != row_len) {
        tracing::warn!(
            "Rejecting load: row {} has {} bytes, expected {}",
            row,
            buf.len(),
            row_len
        );
        return Err(StoreError::ColumnCountMismatch {
            row,
            expected: row_len,
            got: buf.len(),
        });
    }

    Ok(LoadShape {
        num_rows: rows.len(),
        num_cols,
    })
}
