//! Row-major table.
//!
//! Data is laid out as `row 0 | row 1 | ... | row n`, so field (r, c) lives
//! at field offset `r * num_cols + c`.

use crate::error::StoreError;
use crate::field::{field_offset, ints, read_int, write_int, FIELD_LEN};
use crate::loader::DataLoader;

use super::{validate_rows, Layout, LoadShape, Table};

/// Flat row-major buffer shared by the plain and indexed row tables.
#[derive(Debug, Default)]
pub(crate) struct RowStorage {
    num_rows: usize,
    num_cols: usize,
    bytes: Vec<u8>,
    loaded: bool,
}

impl RowStorage {
    /// Validates `loader` and copies its rows. The buffer is allocated once.
    pub fn load(&mut self, loader: &dyn DataLoader) -> Result<LoadShape, StoreError> {
        if self.loaded {
            return Err(StoreError::AlreadyLoaded);
        }
        let shape = validate_rows(loader)?;

        let mut bytes = Vec::with_capacity(shape.byte_len());
        for row in loader.rows() {
            bytes.extend_from_slice(row);
        }

        self.num_rows = shape.num_rows;
        self.num_cols = shape.num_cols;
        self.bytes = bytes;
        self.loaded = true;
        Ok(shape)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Byte offset of field (`row`, `col`).
    ///
    /// # Panics
    /// If `row` or `col` is out of range.
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
        field_offset(row * self.num_cols + col)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i32 {
        read_int(&self.bytes, self.offset(row, col))
    }

    #[inline]
    pub fn put(&mut self, row: usize, col: usize, value: i32) {
        let offset = self.offset(row, col);
        write_int(&mut self.bytes, offset, value);
    }

    #[inline]
    fn row_len(&self) -> usize {
        // chunks_exact rejects 0; an unloaded buffer is empty anyway
        (self.num_cols * FIELD_LEN).max(1)
    }

    fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.bytes.chunks_exact(self.row_len())
    }

    pub fn column_sum(&self) -> i64 {
        self.rows()
            .map(|row| i64::from(read_int(row, field_offset(0))))
            .sum()
    }

    pub fn predicated_column_sum(&self, threshold1: i32, threshold2: i32) -> i64 {
        let mut sum = 0i64;
        for row in self.rows() {
            if read_int(row, field_offset(1)) > threshold1
                && read_int(row, field_offset(2)) < threshold2
            {
                sum += i64::from(read_int(row, field_offset(0)));
            }
        }
        sum
    }

    pub fn predicated_all_columns_sum(&self, threshold: i32) -> i64 {
        let mut sum = 0i64;
        for row in self.rows() {
            if read_int(row, field_offset(0)) > threshold {
                sum += ints(row).map(i64::from).sum::<i64>();
            }
        }
        sum
    }

    pub fn predicated_update(&mut self, threshold: i32) -> usize {
        let row_len = self.row_len();
        let mut updated = 0;
        for row in self.bytes.chunks_exact_mut(row_len) {
            if read_int(row, field_offset(0)) < threshold {
                update_row(row);
                updated += 1;
            }
        }
        updated
    }

    /// Applies the `col3 += col2` update to a single row.
    pub fn update_row_at(&mut self, row: usize) {
        let start = self.offset(row, 0);
        let end = start + self.num_cols * FIELD_LEN;
        update_row(&mut self.bytes[start..end]);
    }
}

/// `col3 := col2 + col3` on one row buffer, 32-bit wrapping.
#[inline]
fn update_row(row: &mut [u8]) {
    let value = read_int(row, field_offset(2)).wrapping_add(read_int(row, field_offset(3)));
    write_int(row, field_offset(3), value);
}

/// Row-major table without auxiliary structures.
#[derive(Debug, Default)]
pub struct RowTable {
    storage: RowStorage,
}

impl RowTable {
    /// Creates an unloaded table.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Table for RowTable {
    fn load(&mut self, loader: &dyn DataLoader) -> Result<(), StoreError> {
        let shape = self.storage.load(loader)?;
        tracing::debug!(
            "Loaded {} rows x {} columns into row table",
            shape.num_rows,
            shape.num_cols
        );
        Ok(())
    }

    fn get_int_field(&self, row: usize, col: usize) -> i32 {
        self.storage.get(row, col)
    }

    fn put_int_field(&mut self, row: usize, col: usize, value: i32) {
        self.storage.put(row, col, value);
    }

    fn column_sum(&self) -> i64 {
        self.storage.column_sum()
    }

    fn predicated_column_sum(&self, threshold1: i32, threshold2: i32) -> i64 {
        self.storage.predicated_column_sum(threshold1, threshold2)
    }

    fn predicated_all_columns_sum(&self, threshold: i32) -> i64 {
        self.storage.predicated_all_columns_sum(threshold)
    }

    fn predicated_update(&mut self, threshold: i32) -> usize {
        self.storage.predicated_update(threshold)
    }

    fn num_rows(&self) -> usize {
        self.storage.num_rows()
    }

    fn num_cols(&self) -> usize {
        self.storage.num_cols()
    }

    fn layout(&self) -> Layout {
        Layout::Row
    }
}
