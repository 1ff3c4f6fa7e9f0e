//! Store round trips and replace semantics.

use ntest::timeout;

use empyric_core::container::{AccessMode, Container, ContainerSource, GroupPath};
use empyric_core::{Column, ColumnData, DType, DatasetStore, MemorySource, Table};

use super::helpers::{oxides, TestStore};

#[timeout(5000)]
#[test]
fn test_round_trip_through_file() {
    let t = TestStore::new();
    t.store.save(&oxides(), "geochem", "samples").unwrap();

    let loaded = t.reopen().load("geochem", "samples").unwrap();
    assert_eq!(loaded, oxides());
    assert_eq!(loaded.column_names(), vec!["SiO2", "MgO", "CaO"]);
}

#[timeout(5000)]
#[test]
fn test_replace_keeps_only_latest() {
    let t = TestStore::new();
    let first = Table::new(vec![Column::int("a", vec![1, 2, 3])]).unwrap();
    let second = Table::new(vec![
        Column::float("b", vec![0.5]),
        Column::float("c", vec![1.5]),
    ])
    .unwrap();

    t.store.save(&first, "g", "d").unwrap();
    t.store.save(&second, "g", "d").unwrap();

    assert_eq!(t.store.load("g", "d").unwrap(), second);
    let datasets: Vec<String> = t
        .store
        .entries()
        .unwrap()
        .into_iter()
        .filter(|e| e.is_dataset())
        .map(|e| e.path)
        .collect();
    assert_eq!(datasets, vec!["g/d"]);
}

#[timeout(5000)]
#[test]
fn test_schema_fidelity_with_unusual_names() {
    let t = TestStore::new();
    let names = ["Fe2O3 (wt%)", "δ18O", "", "a,b", "SiO2"];
    let table = Table::new(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Column::int(*name, vec![i as i64, -(i as i64)]))
            .collect(),
    )
    .unwrap();

    t.store.save(&table, "isotopes", "run_1").unwrap();
    let loaded = t.reopen().load("isotopes", "run_1").unwrap();
    assert_eq!(loaded.column_names(), names.to_vec());
    assert_eq!(loaded, table);
}

#[timeout(5000)]
#[test]
fn test_mixed_types_come_back_as_float() {
    let t = TestStore::new();
    let table = Table::new(vec![
        Column::int("SiO2", vec![50, 55]),
        Column::float("MgO", vec![4.25, 6.5]),
    ])
    .unwrap();
    t.store.save(&table, "g", "mixed").unwrap();

    let loaded = t.store.load("g", "mixed").unwrap();
    assert_eq!(loaded.common_dtype(), DType::Float64);
    assert_eq!(
        loaded.column("SiO2").unwrap().data,
        ColumnData::Float64(vec![50.0, 55.0])
    );
    assert_eq!(
        loaded.column("MgO").unwrap().data,
        ColumnData::Float64(vec![4.25, 6.5])
    );
}

#[timeout(5000)]
#[test]
fn test_special_floats_round_trip() {
    let t = TestStore::new();
    let table = Table::new(vec![Column::float(
        "x",
        vec![f64::NAN, f64::INFINITY, -0.0, f64::MIN_POSITIVE],
    )])
    .unwrap();
    t.store.save(&table, "g", "floats").unwrap();

    let loaded = t.store.load("g", "floats").unwrap();
    match &loaded.column("x").unwrap().data {
        ColumnData::Float64(v) => {
            assert!(v[0].is_nan());
            assert_eq!(v[1], f64::INFINITY);
            assert!(v[2] == 0.0 && v[2].is_sign_negative());
            assert_eq!(v[3], f64::MIN_POSITIVE);
        }
        other => panic!("unexpected data {:?}", other),
    }
}

#[timeout(5000)]
#[test]
fn test_zero_row_table_round_trip() {
    let t = TestStore::new();
    let table = Table::new(vec![Column::int("a", vec![]), Column::int("b", vec![])]).unwrap();
    t.store.save(&table, "g", "empty").unwrap();
    assert_eq!(t.store.load("g", "empty").unwrap(), table);
}

#[timeout(5000)]
#[test]
fn test_ensure_group_is_idempotent() {
    let t = TestStore::new();
    t.store.save(&oxides(), "a/b", "first").unwrap();

    let source = t.store.source();
    let path = GroupPath::parse("a/b").unwrap();
    let mut container = source.acquire(AccessMode::ReadWrite).unwrap();
    container.ensure_group(&path).unwrap();
    container.ensure_group(&path).unwrap();
    container.close().unwrap();

    t.store.save(&oxides(), "a/b", "second").unwrap();
    assert_eq!(t.store.load("a/b", "first").unwrap(), oxides());
    assert_eq!(t.store.load("a/b", "second").unwrap(), oxides());
    let groups = t
        .store
        .entries()
        .unwrap()
        .into_iter()
        .filter(|e| !e.is_dataset())
        .count();
    assert_eq!(groups, 2);
}

#[timeout(5000)]
#[test]
fn test_multiple_stores_are_independent() {
    let a = TestStore::new();
    let b = TestStore::new();
    let memory = DatasetStore::with_source(MemorySource::new());

    a.store.save(&oxides(), "g", "d").unwrap();
    b.store.save(&oxides().head(1), "g", "d").unwrap();
    memory.save(&oxides().head(2), "g", "d").unwrap();

    assert_eq!(a.store.load("g", "d").unwrap().num_rows(), 5);
    assert_eq!(b.store.load("g", "d").unwrap().num_rows(), 1);
    assert_eq!(memory.load("g", "d").unwrap().num_rows(), 2);
}

#[timeout(5000)]
#[test]
fn test_datasets_in_many_groups() {
    let t = TestStore::new();
    for year in 2020..2024 {
        let table = oxides().head((year - 2019) as usize);
        t.store
            .save(&table, &format!("surveys/{}", year), "samples")
            .unwrap();
    }

    let store = t.reopen();
    for year in 2020..2024 {
        let loaded = store.load(&format!("surveys/{}", year), "samples").unwrap();
        assert_eq!(loaded.num_rows(), (year - 2019) as usize);
    }
    assert_eq!(store.find_by_name("samples").unwrap().len(), 4);
}
