//! Shared fixtures for integration tests.

use memstore_core::config::{IndexMaintenance, LoaderConfig, TableConfig};
use memstore_core::loader::{DataLoader, RandomizedLoader};
use memstore_core::table::{Layout, Table};

/// Every layout, including each possible index column of a 4-column table.
pub fn layouts(num_cols: usize) -> Vec<Layout> {
    let mut layouts = vec![
        Layout::Row,
        Layout::Column,
        Layout::IndexedRow { index_column: None },
    ];
    layouts.extend((0..num_cols).map(|col| Layout::IndexedRow {
        index_column: Some(col),
    }));
    layouts
}

pub fn configs() -> [TableConfig; 2] {
    [
        TableConfig::default(),
        TableConfig {
            index_maintenance: IndexMaintenance::AppendOnly,
        },
    ]
}

pub fn random_loader(seed: u64, num_rows: usize, num_cols: usize, max_value: i32) -> RandomizedLoader {
    RandomizedLoader::new(LoaderConfig {
        seed,
        num_rows,
        num_cols,
        max_value,
    })
    .expect("valid loader config")
}

/// Builds and loads one table per layout and maintenance policy.
pub fn load_all(loader: &dyn DataLoader) -> Vec<Box<dyn Table>> {
    let mut tables = Vec::new();
    for config in configs() {
        for layout in layouts(loader.num_cols()) {
            let mut table = layout.build(&config);
            table.load(loader).expect("load");
            tables.push(table);
        }
    }
    tables
}

/// Reads column `col` of every row.
pub fn column_values(table: &dyn Table, col: usize) -> Vec<i32> {
    (0..table.num_rows())
        .map(|row| table.get_int_field(row, col))
        .collect()
}
