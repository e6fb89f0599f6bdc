//! Every layout and index configuration must agree on every query.

use ntest::timeout;

use memstore_core::field::decode_row;
use memstore_core::loader::DataLoader;

use super::helpers::{column_values, load_all, random_loader};

#[timeout(5000)]
#[test]
fn test_read_queries_agree() {
    for seed in 0..3 {
        let loader = random_loader(seed, 2_000, 4, 64);
        let tables = load_all(&loader);
        let reference = &tables[0];

        for t in [-1, 0, 10, 31, 63, 64] {
            let expected_all = reference.predicated_all_columns_sum(t);
            for t2 in [-1, 0, 5, 32, 64] {
                let expected = reference.predicated_column_sum(t, t2);
                for table in &tables[1..] {
                    assert_eq!(
                        table.predicated_column_sum(t, t2),
                        expected,
                        "{} seed={seed} t1={t} t2={t2}",
                        table.layout()
                    );
                }
            }
            for table in &tables[1..] {
                assert_eq!(table.column_sum(), reference.column_sum());
                assert_eq!(
                    table.predicated_all_columns_sum(t),
                    expected_all,
                    "{} seed={seed} t={t}",
                    table.layout()
                );
            }
        }
    }
}

#[timeout(5000)]
#[test]
fn test_update_touches_same_rows() {
    let loader = random_loader(1, 1_000, 4, 32);
    let expected_count = loader
        .rows()
        .iter()
        .filter(|row| decode_row(row)[0] < 8)
        .count();

    let mut tables = load_all(&loader);
    for table in tables.iter_mut() {
        assert_eq!(table.predicated_update(8), expected_count, "{}", table.layout());
    }

    let expected_col3 = column_values(tables[0].as_ref(), 3);
    for table in &tables[1..] {
        assert_eq!(column_values(table.as_ref(), 3), expected_col3, "{}", table.layout());
    }
}

#[timeout(5000)]
#[test]
fn test_update_reproducible_on_fresh_load() {
    let loader = random_loader(2, 1_000, 4, 32);
    let mut first = load_all(&loader);
    let mut second = load_all(&loader);

    for (a, b) in first.iter_mut().zip(second.iter_mut()) {
        assert_eq!(a.predicated_update(10), b.predicated_update(10));
        assert_eq!(column_values(a.as_ref(), 3), column_values(b.as_ref(), 3));
    }
}

#[timeout(5000)]
#[test]
fn test_agreement_survives_index_column_writes() {
    let loader = random_loader(3, 500, 4, 16);
    let mut tables = load_all(&loader);

    // rewrite every index column candidate on a stride of rows, some several times
    for table in tables.iter_mut() {
        for row in (0..table.num_rows()).step_by(7) {
            for col in 0..3 {
                let value = table.get_int_field(row, col);
                table.put_int_field(row, col, (value + 5) % 16);
                table.put_int_field(row, col, (value * 3) % 16);
            }
        }
    }

    let reference = &tables[0];
    for table in &tables[1..] {
        for (t1, t2) in [(3, 12), (8, 8), (0, 16), (15, 1)] {
            assert_eq!(
                table.predicated_column_sum(t1, t2),
                reference.predicated_column_sum(t1, t2),
                "{} t1={t1} t2={t2}",
                table.layout()
            );
        }
        assert_eq!(
            table.predicated_all_columns_sum(6),
            reference.predicated_all_columns_sum(6),
            "{}",
            table.layout()
        );
    }

    for table in tables.iter_mut() {
        let expected = column_values(table.as_ref(), 0)
            .into_iter()
            .filter(|&v| v < 9)
            .count();
        assert_eq!(table.predicated_update(9), expected, "{}", table.layout());
    }
}
