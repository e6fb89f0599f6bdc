//! Loader and table configuration.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Fixed seed table used by the benchmark harness.
pub const SEEDS: [u64; 5] = [0, 1, 2, 3, 4];

/// Returns the seed at `seed_id`, if any.
pub fn seed(seed_id: usize) -> Option<u64> {
    SEEDS.get(seed_id).copied()
}

/// Configuration for [`crate::loader::RandomizedLoader`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// RNG seed; equal configs produce equal rows
    pub seed: u64,
    /// Number of rows to generate
    pub num_rows: usize,
    /// Number of `i32` fields per row
    pub num_cols: usize,
    /// Exclusive upper bound of generated values (lower bound is 0)
    pub max_value: i32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            seed: SEEDS[0],
            num_rows: 1_000_000,
            num_cols: 4,
            max_value: 1024,
        }
    }
}

impl LoaderConfig {
    /// Rejects configurations that cannot produce a well-formed table.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.num_cols == 0 {
            return Err(StoreError::InvalidConfig(
                "num_cols must be greater than 0".to_string(),
            ));
        }
        if self.max_value <= 0 {
            return Err(StoreError::InvalidConfig(format!(
                "max_value must be positive, got {}",
                self.max_value
            )));
        }
        self.num_rows
            .checked_mul(self.num_cols)
            .and_then(|fields| fields.checked_mul(crate::field::FIELD_LEN))
            .ok_or_else(|| {
                StoreError::InvalidConfig(format!(
                    "{} x {} table overflows the address space",
                    self.num_rows, self.num_cols
                ))
            })?;
        Ok(())
    }
}

/// How writes to the index column maintain the value index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexMaintenance {
    /// Move the row id from its old value's bucket to the new one
    #[default]
    Exact,
    /// Append to the new value's bucket and leave the old entry in place
    AppendOnly,
}

/// Per-table configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Index maintenance policy for indexed tables
    pub index_maintenance: IndexMaintenance,
}
