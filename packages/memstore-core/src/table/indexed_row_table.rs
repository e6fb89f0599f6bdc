//! Row-major table with a secondary index on one column.
//!
//! Storage is identical to [`super::RowTable`]. The index maps each value of
//! the index column to the row ids holding it, and predicates on that column
//! are answered by an ordered range traversal instead of a full scan.

use std::collections::HashSet;

use crate::config::{IndexMaintenance, TableConfig};
use crate::error::StoreError;
use crate::index::ValueIndex;
use crate::loader::DataLoader;

use super::row_table::RowStorage;
use super::{Layout, Table};

/// Row-major table with a [`ValueIndex`] on `index_column`.
#[derive(Debug, Default)]
pub struct IndexedRowTable {
    storage: RowStorage,
    index: ValueIndex,
    index_column: Option<usize>,
    config: TableConfig,
}

impl IndexedRowTable {
    /// Creates an unloaded table indexing `index_column` (`None` for no index).
    pub fn new(index_column: Option<usize>) -> Self {
        Self::with_config(index_column, TableConfig::default())
    }

    /// Creates an unloaded table with an explicit index maintenance policy.
    pub fn with_config(index_column: Option<usize>, config: TableConfig) -> Self {
        Self {
            index_column,
            config,
            ..Self::default()
        }
    }

    /// The indexed column, fixed at construction.
    pub fn index_column(&self) -> Option<usize> {
        self.index_column
    }

    /// Read-only view of the index.
    pub fn index(&self) -> &ValueIndex {
        &self.index
    }

    #[inline]
    fn indexed_on(&self, col: usize) -> bool {
        self.index_column == Some(col)
    }

    /// Calls `f` once per row reached through `buckets` whose current
    /// index-column value still equals the bucket key.
    ///
    /// Under [`IndexMaintenance::Exact`] every entry is current and unique, so
    /// rows are passed through unchecked. Under `AppendOnly` stale and repeated
    /// entries are filtered out here. A row only matches the key of its current
    /// value, so repeats can only occur within one bucket and are tracked per
    /// bucket; the cost stays proportional to the entries traversed.
    fn for_each_indexed_row<'a>(
        &self,
        buckets: impl Iterator<Item = (i32, &'a [usize])>,
        mut f: impl FnMut(usize),
    ) {
        let Some(col) = self.index_column else {
            return;
        };
        match self.config.index_maintenance {
            IndexMaintenance::Exact => {
                for (_, rows) in buckets {
                    rows.iter().for_each(|&row| f(row));
                }
            }
            IndexMaintenance::AppendOnly => {
                let mut seen = HashSet::new();
                for (key, rows) in buckets {
                    seen.clear();
                    for &row in rows {
                        if self.storage.get(row, col) == key && seen.insert(row) {
                            f(row);
                        }
                    }
                }
            }
        }
    }
}

impl Table for IndexedRowTable {
    fn load(&mut self, loader: &dyn DataLoader) -> Result<(), StoreError> {
        if self.storage.is_loaded() {
            return Err(StoreError::AlreadyLoaded);
        }
        if let Some(col) = self.index_column {
            let num_cols = loader.num_cols();
            if col >= num_cols {
                tracing::warn!(
                    "Rejecting load: index column {} but rows have {} columns",
                    col,
                    num_cols
                );
                return Err(StoreError::InvalidIndexColumn {
                    column: col,
                    num_cols,
                });
            }
        }

        let shape = self.storage.load(loader)?;
        if let Some(col) = self.index_column {
            for row in 0..shape.num_rows {
                self.index.insert(self.storage.get(row, col), row);
            }
        }

        tracing::debug!(
            "Loaded {} rows x {} columns into indexed table (index column {:?}, {} distinct values)",
            shape.num_rows,
            shape.num_cols,
            self.index_column,
            self.index.distinct_values()
        );
        Ok(())
    }

    fn get_int_field(&self, row: usize, col: usize) -> i32 {
        self.storage.get(row, col)
    }

    fn put_int_field(&mut self, row: usize, col: usize, value: i32) {
        if !self.indexed_on(col) {
            self.storage.put(row, col, value);
            return;
        }

        let old = self.storage.get(row, col);
        self.storage.put(row, col, value);
        match self.config.index_maintenance {
            IndexMaintenance::Exact => {
                if old != value {
                    self.index.remove(old, row);
                    self.index.insert(value, row);
                }
            }
            IndexMaintenance::AppendOnly => self.index.insert(value, row),
        }
    }

    fn column_sum(&self) -> i64 {
        self.storage.column_sum()
    }

    fn predicated_column_sum(&self, threshold1: i32, threshold2: i32) -> i64 {
        let mut sum = 0i64;
        if self.indexed_on(1) {
            tracing::debug!("predicated_column_sum: index range col1 > {}", threshold1);
            self.for_each_indexed_row(self.index.greater_than(threshold1), |row| {
                if self.storage.get(row, 2) < threshold2 {
                    sum += i64::from(self.storage.get(row, 0));
                }
            });
        } else if self.indexed_on(2) {
            tracing::debug!("predicated_column_sum: index range col2 < {}", threshold2);
            self.for_each_indexed_row(self.index.less_than(threshold2), |row| {
                if self.storage.get(row, 1) > threshold1 {
                    sum += i64::from(self.storage.get(row, 0));
                }
            });
        } else {
            sum = self.storage.predicated_column_sum(threshold1, threshold2);
        }
        sum
    }

    fn predicated_all_columns_sum(&self, threshold: i32) -> i64 {
        if !self.indexed_on(0) {
            return self.storage.predicated_all_columns_sum(threshold);
        }

        tracing::debug!("predicated_all_columns_sum: index range col0 > {}", threshold);
        let num_cols = self.storage.num_cols();
        let mut sum = 0i64;
        self.for_each_indexed_row(self.index.greater_than(threshold), |row| {
            for col in 0..num_cols {
                sum += i64::from(self.storage.get(row, col));
            }
        });
        sum
    }

    fn predicated_update(&mut self, threshold: i32) -> usize {
        if self.indexed_on(0) {
            tracing::debug!("predicated_update: index range col0 < {}", threshold);
            let mut targets = Vec::new();
            self.for_each_indexed_row(self.index.less_than(threshold), |row| targets.push(row));
            for &row in &targets {
                self.storage.update_row_at(row);
            }
            return targets.len();
        }

        if self.indexed_on(3) {
            // col3 is the write target; go through put_int_field to keep the index current
            let mut updated = 0;
            for row in 0..self.storage.num_rows() {
                if self.storage.get(row, 0) < threshold {
                    let value = self
                        .storage
                        .get(row, 2)
                        .wrapping_add(self.storage.get(row, 3));
                    self.put_int_field(row, 3, value);
                    updated += 1;
                }
            }
            return updated;
        }

        self.storage.predicated_update(threshold)
    }

    fn num_rows(&self) -> usize {
        self.storage.num_rows()
    }

    fn num_cols(&self) -> usize {
        self.storage.num_cols()
    }

    fn layout(&self) -> Layout {
        Layout::IndexedRow {
            index_column: self.index_column,
        }
    }
}
