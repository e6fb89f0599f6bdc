//! Reference benchmark workloads at reduced scale.

use ntest::timeout;

use memstore_core::config::{seed, IndexMaintenance, LoaderConfig, TableConfig};
use memstore_core::table::{ColumnTable, IndexedRowTable, RowTable, Table};

use super::helpers::random_loader;

const ROWS: usize = 20_000;

fn load_trio(num_cols: usize, index_column: usize) -> (RowTable, ColumnTable, IndexedRowTable) {
    let loader = random_loader(seed(0).unwrap(), ROWS, num_cols, 1024);
    let mut rt = RowTable::new();
    let mut ct = ColumnTable::new();
    let mut it = IndexedRowTable::new(Some(index_column));
    rt.load(&loader).unwrap();
    ct.load(&loader).unwrap();
    it.load(&loader).unwrap();
    (rt, ct, it)
}

#[timeout(5000)]
#[test]
fn test_column_sum_narrow() {
    let (rt, ct, it) = load_trio(3, 0);
    let expected = rt.column_sum();
    assert!(expected > 0);
    assert_eq!(ct.column_sum(), expected);
    assert_eq!(it.column_sum(), expected);
}

#[timeout(5000)]
#[test]
fn test_column_sum_wide() {
    let (rt, ct, it) = load_trio(20, 0);
    let expected = rt.column_sum();
    assert_eq!(ct.column_sum(), expected);
    assert_eq!(it.column_sum(), expected);
    assert_eq!(
        ct.predicated_all_columns_sum(1000),
        rt.predicated_all_columns_sum(1000)
    );
    assert_eq!(
        it.predicated_all_columns_sum(1000),
        rt.predicated_all_columns_sum(1000)
    );
}

#[timeout(5000)]
#[test]
fn test_predicated_column_sum() {
    let (rt, ct, it) = load_trio(4, 2);
    let expected = rt.predicated_column_sum(500, 10);
    assert!(expected > 0, "selective predicate should still match some rows");
    assert_eq!(ct.predicated_column_sum(500, 10), expected);
    assert_eq!(it.predicated_column_sum(500, 10), expected);
}

#[timeout(5000)]
#[test]
fn test_predicated_update() {
    let (mut rt, mut ct, mut it) = load_trio(4, 0);
    let expected = rt.predicated_update(10);
    assert!(expected > 0);
    assert_eq!(ct.predicated_update(10), expected);
    assert_eq!(it.predicated_update(10), expected);

    for row in (0..ROWS).step_by(97) {
        let value = rt.get_int_field(row, 3);
        assert_eq!(ct.get_int_field(row, 3), value, "row {row}");
        assert_eq!(it.get_int_field(row, 3), value, "row {row}");
    }
}

#[timeout(1000)]
#[test]
fn test_configs_serialize() {
    let loader = LoaderConfig::default();
    let json = serde_json::to_string(&loader).unwrap();
    let parsed: LoaderConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, loader);

    let table: TableConfig =
        serde_json::from_str(r#"{"index_maintenance":"append-only"}"#).unwrap();
    assert_eq!(table.index_maintenance, IndexMaintenance::AppendOnly);
}
