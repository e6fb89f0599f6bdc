//! Row sources consumed by [`crate::table::Table::load`].
//!
//! A loader reports its column count and hands out an ordered, replayable
//! sequence of row buffers, each holding `num_cols` fields in column order.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::LoaderConfig;
use crate::error::StoreError;
use crate::field::encode_row;

/// Source of fixed-width rows.
pub trait DataLoader {
    /// Number of fields every row is expected to hold.
    fn num_cols(&self) -> usize;

    /// Row buffers in row id order.
    fn rows(&self) -> &[Vec<u8>];
}

/// Loader over rows already held in memory.
#[derive(Debug, Clone)]
pub struct VecLoader {
    num_cols: usize,
    rows: Vec<Vec<u8>>,
}

impl VecLoader {
    /// Builds a loader from decoded rows.
    ///
    /// `num_cols` is taken as declared and not checked against the rows, so a
    /// malformed row surfaces as a load error on the consuming table.
    pub fn new(num_cols: usize, rows: &[Vec<i32>]) -> Self {
        Self {
            num_cols,
            rows: rows.iter().map(|row| encode_row(row)).collect(),
        }
    }

    /// Builds a loader from rows that all share the first row's width.
    pub fn from_rows(rows: &[Vec<i32>]) -> Self {
        let num_cols = rows.first().map_or(0, Vec::len);
        Self::new(num_cols, rows)
    }
}

impl DataLoader for VecLoader {
    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }
}

/// Deterministic pseudo-random row generator.
#[derive(Debug, Clone)]
pub struct RandomizedLoader {
    config: LoaderConfig,
    rows: Vec<Vec<u8>>,
}

impl RandomizedLoader {
    /// Generates all rows up front from `config`.
    pub fn new(config: LoaderConfig) -> Result<Self, StoreError> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut values = vec![0i32; config.num_cols];
        let mut rows = Vec::with_capacity(config.num_rows);
        for _ in 0..config.num_rows {
            for value in values.iter_mut() {
                *value = rng.gen_range(0..config.max_value);
            }
            rows.push(encode_row(&values));
        }

        tracing::debug!(
            "Generated {} rows x {} columns (seed {})",
            config.num_rows,
            config.num_cols,
            config.seed
        );

        Ok(Self { config, rows })
    }

    /// Returns the configuration the rows were generated from.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

impl DataLoader for RandomizedLoader {
    fn num_cols(&self) -> usize {
        self.config.num_cols
    }

    fn rows(&self) -> &[Vec<u8>] {
        &self.rows
    }
}
