//! Ordered secondary index from a column value to the rows holding it.

use std::collections::BTreeMap;
use std::ops::Bound;

/// Ordered map from an indexed value to the row ids holding it.
///
/// Buckets keep row ids in insertion order. Empty buckets are dropped.
#[derive(Debug, Clone, Default)]
pub struct ValueIndex {
    entries: BTreeMap<i32, Vec<usize>>,
    len: usize,
}

impl ValueIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `row` to the bucket for `value`, creating the bucket if absent.
    pub fn insert(&mut self, value: i32, row: usize) {
        self.entries.entry(value).or_default().push(row);
        self.len += 1;
    }

    /// Removes the first occurrence of `row` from the bucket for `value`.
    ///
    /// Returns `false` if the row was not indexed under `value`.
    pub fn remove(&mut self, value: i32, row: usize) -> bool {
        let Some(rows) = self.entries.get_mut(&value) else {
            return false;
        };
        let Some(pos) = rows.iter().position(|&r| r == row) else {
            return false;
        };
        rows.remove(pos);
        if rows.is_empty() {
            self.entries.remove(&value);
        }
        self.len -= 1;
        true
    }

    /// Row ids indexed under exactly `value`.
    pub fn rows_for(&self, value: i32) -> &[usize] {
        self.entries.get(&value).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Buckets with keys strictly greater than `threshold`, in ascending key order.
    pub fn greater_than(&self, threshold: i32) -> impl Iterator<Item = (i32, &[usize])> + '_ {
        self.entries
            .range((Bound::Excluded(threshold), Bound::Unbounded))
            .map(|(&key, rows)| (key, rows.as_slice()))
    }

    /// Buckets with keys strictly less than `threshold`, in ascending key order.
    pub fn less_than(&self, threshold: i32) -> impl Iterator<Item = (i32, &[usize])> + '_ {
        self.entries
            .range(..threshold)
            .map(|(&key, rows)| (key, rows.as_slice()))
    }

    /// Number of distinct indexed values.
    pub fn distinct_values(&self) -> usize {
        self.entries.len()
    }

    /// Total number of row id entries, stale ones included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
