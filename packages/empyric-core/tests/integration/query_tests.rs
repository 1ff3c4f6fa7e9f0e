//! Queries evaluated through the store.

use ntest::timeout;

use empyric_core::{ColumnData, QueryError, StoreError};

use super::helpers::{oxides, TestStore};

fn silica(table: &empyric_core::Table) -> Vec<i64> {
    match &table.column("SiO2").unwrap().data {
        ColumnData::Int64(v) => v.clone(),
        other => panic!("unexpected data {:?}", other),
    }
}

#[timeout(5000)]
#[test]
fn test_query_matches_row_by_row_filter() {
    let t = TestStore::new();
    t.store.save(&oxides(), "geochem", "samples").unwrap();

    let result = t
        .store
        .query("geochem", "samples", "SiO2 > 50 and MgO < 10")
        .unwrap();
    assert_eq!(silica(&result), vec![55, 60, 72]);
    assert_eq!(result.column_names(), vec!["SiO2", "MgO", "CaO"]);

    let expected: Vec<Vec<_>> = oxides()
        .rows()
        .filter(|row| row[0].as_f64() > 50.0 && row[1].as_f64() < 10.0)
        .collect();
    let actual: Vec<Vec<_>> = result.rows().collect();
    assert_eq!(actual, expected);
}

#[timeout(5000)]
#[test]
fn test_query_combinators() {
    let t = TestStore::new();
    t.store.save(&oxides(), "g", "d").unwrap();

    let q = |p: &str| silica(&t.store.query("g", "d", p).unwrap());
    assert_eq!(q("SiO2 < 50 or CaO <= 2"), vec![48, 72]);
    assert_eq!(q("not (SiO2 >= 55)"), vec![50, 48]);
    assert_eq!(q("48 < SiO2 < 72"), vec![50, 55, 60]);
    assert_eq!(q("MgO == 6 | MgO == 12"), vec![55, 48]);
    assert_eq!(q("SiO2 > 1000"), Vec::<i64>::new());
}

#[timeout(5000)]
#[test]
fn test_query_unknown_column_returns_no_rows() {
    let t = TestStore::new();
    t.store.save(&oxides(), "g", "d").unwrap();

    let err = t.store.query("g", "d", "Al2O3 > 10").unwrap_err();
    assert_eq!(
        err,
        StoreError::Query(QueryError::UnknownColumn {
            column: "Al2O3".into()
        })
    );
    assert_eq!(err.to_string(), "Unknown column 'Al2O3'");
}

#[timeout(5000)]
#[test]
fn test_query_type_mismatch() {
    let t = TestStore::new();
    t.store.save(&oxides(), "g", "d").unwrap();
    assert!(matches!(
        t.store.query("g", "d", "SiO2 == 'high'"),
        Err(StoreError::Query(QueryError::TypeMismatch { .. }))
    ));
}

#[timeout(5000)]
#[test]
fn test_query_missing_dataset() {
    let t = TestStore::new();
    t.store.save(&oxides(), "g", "d").unwrap();
    assert_eq!(
        t.store.query("g", "other", "SiO2 > 1").unwrap_err(),
        StoreError::not_found("g/other")
    );
}
