//! Column-major table.
//!
//! Data is laid out as `col 0 | col 1 | ... | col m`, so field (r, c) lives
//! at field offset `c * num_rows + r`. Queries touch one contiguous column
//! region at a time.

use crate::error::StoreError;
use crate::field::{field_offset, ints, read_int, write_int};
use crate::loader::DataLoader;

use super::{validate_rows, Layout, Table};

/// Column-major table.
#[derive(Debug, Default)]
pub struct ColumnTable {
    num_rows: usize,
    num_cols: usize,
    bytes: Vec<u8>,
    loaded: bool,
}

impl ColumnTable {
    /// Creates an unloaded table.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.num_rows,
            "row {row} out of range for table with {} rows",
            self.num_rows
        );
        assert!(
            col < self.num_cols,
            "column {col} out of range for table with {} columns",
            self.num_cols
        );
        field_offset(col * self.num_rows + row)
    }

    /// Contiguous byte region holding column `col`.
    fn column(&self, col: usize) -> &[u8] {
        assert!(
            col < self.num_cols || self.num_rows == 0,
            "column {col} out of range for table with {} columns",
            self.num_cols
        );
        let start = field_offset(col * self.num_rows);
        &self.bytes[start..start + field_offset(self.num_rows)]
    }

    /// Row ids whose column-0 value satisfies `predicate`.
    fn select_on_first_column(&self, predicate: impl Fn(i32) -> bool) -> Vec<usize> {
        ints(self.column(0))
            .enumerate()
            .filter(|&(_, value)| predicate(value))
            .map(|(row, _)| row)
            .collect()
    }
}

impl Table for ColumnTable {
    fn load(&mut self, loader: &dyn DataLoader) -> Result<(), StoreError> {
        if self.loaded {
            return Err(StoreError::AlreadyLoaded);
        }
        let shape = validate_rows(loader)?;

        self.num_rows = shape.num_rows;
        self.num_cols = shape.num_cols;
        self.bytes = vec![0u8; shape.byte_len()];
        for (row_id, row) in loader.rows().iter().enumerate() {
            for (col_id, value) in ints(row).enumerate() {
                let offset = field_offset(col_id * self.num_rows + row_id);
                write_int(&mut self.bytes, offset, value);
            }
        }
        self.loaded = true;

        tracing::debug!(
            "Loaded {} rows x {} columns into column table",
            shape.num_rows,
            shape.num_cols
        );
        Ok(())
    }

    fn get_int_field(&self, row: usize, col: usize) -> i32 {
        read_int(&self.bytes, self.offset(row, col))
    }

    fn put_int_field(&mut self, row: usize, col: usize, value: i32) {
        let offset = self.offset(row, col);
        write_int(&mut self.bytes, offset, value);
    }

    fn column_sum(&self) -> i64 {
        ints(self.column(0)).map(i64::from).sum()
    }

    fn predicated_column_sum(&self, threshold1: i32, threshold2: i32) -> i64 {
        let col0 = ints(self.column(0));
        let col1 = ints(self.column(1));
        let col2 = ints(self.column(2));

        col0.zip(col1)
            .zip(col2)
            .filter(|&((_, v1), v2)| v1 > threshold1 && v2 < threshold2)
            .map(|((v0, _), _)| i64::from(v0))
            .sum()
    }

    fn predicated_all_columns_sum(&self, threshold: i32) -> i64 {
        let selected = self.select_on_first_column(|value| value > threshold);
        let mut sum = 0i64;
        for col in 0..self.num_cols {
            let column = self.column(col);
            for &row in &selected {
                sum += i64::from(read_int(column, field_offset(row)));
            }
        }
        sum
    }

    fn predicated_update(&mut self, threshold: i32) -> usize {
        let selected = self.select_on_first_column(|value| value < threshold);
        for &row in &selected {
            let value = self
                .get_int_field(row, 2)
                .wrapping_add(self.get_int_field(row, 3));
            self.put_int_field(row, 3, value);
        }
        selected.len()
    }

    fn num_rows(&self) -> usize {
        self.num_rows
    }

    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn layout(&self) -> Layout {
        Layout::Column
    }
}
