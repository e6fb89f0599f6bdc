//! Minimal in-memory tabular storage engine.
//!
//! Stores a fixed-width table of `i32` fields in one of three physical
//! layouts (row-major, column-major, row-major with a secondary index) and
//! exposes the same query surface over each.

pub mod config;
pub mod error;
pub mod field;
pub mod index;
pub mod loader;
pub mod table;

pub use config::{IndexMaintenance, LoaderConfig, TableConfig};
pub use error::StoreError;
pub use loader::{DataLoader, RandomizedLoader, VecLoader};
pub use table::{ColumnTable, IndexedRowTable, Layout, RowTable, Table};
