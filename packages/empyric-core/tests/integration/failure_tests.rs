//! Failure modes: missing files and paths, corruption, bad input.

use std::fs;

use ntest::timeout;

use empyric_core::{Column, StoreError, Table};

use super::helpers::{oxides, reopen, TestStore};

#[timeout(5000)]
#[test]
fn test_load_from_missing_file() {
    let t = TestStore::new();
    assert!(matches!(
        t.store.load("g", "d"),
        Err(StoreError::NotFound { .. })
    ));
    assert!(!t.path().exists());
}

#[timeout(5000)]
#[test]
fn test_missing_group_and_dataset() {
    let t = TestStore::new();
    t.store.save(&oxides(), "geochem", "samples").unwrap();
    assert_eq!(
        t.store.load("other", "samples").unwrap_err(),
        StoreError::not_found("other")
    );
    assert_eq!(
        t.store.load("geochem", "absent").unwrap_err(),
        StoreError::not_found("geochem/absent")
    );
    assert_eq!(
        t.store.load("geochem/samples", "x").unwrap_err(),
        StoreError::not_found("geochem/samples")
    );
}

#[timeout(5000)]
#[test]
fn test_corrupted_body_detected() {
    let t = TestStore::new();
    t.store.save(&oxides(), "g", "d").unwrap();

    let mut bytes = fs::read(t.path()).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    fs::write(t.path(), &bytes).unwrap();

    assert!(matches!(
        reopen(&t.path()).load("g", "d"),
        Err(StoreError::Corrupted(_))
    ));
}

#[timeout(5000)]
#[test]
fn test_foreign_file_rejected() {
    let t = TestStore::new();
    fs::write(t.path(), b"not a container file at all, just some text").unwrap();

    assert!(matches!(t.store.load("g", "d"), Err(StoreError::Corrupted(_))));
    // A write must not clobber a file it cannot read
    assert!(matches!(
        t.store.save(&oxides(), "g", "d"),
        Err(StoreError::Corrupted(_))
    ));
    assert_eq!(
        fs::read(t.path()).unwrap(),
        b"not a container file at all, just some text"
    );
}

#[timeout(5000)]
#[test]
fn test_truncated_file_rejected() {
    let t = TestStore::new();
    t.store.save(&oxides(), "g", "d").unwrap();
    let bytes = fs::read(t.path()).unwrap();
    fs::write(t.path(), &bytes[..10]).unwrap();

    assert!(matches!(t.store.load("g", "d"), Err(StoreError::Corrupted(_))));
}

#[timeout(5000)]
#[test]
fn test_empty_table_rejected_without_writing() {
    let t = TestStore::new();
    assert!(matches!(
        t.store.save(&Table::empty(), "g", "d"),
        Err(StoreError::Schema(_))
    ));
    assert!(!t.path().exists());
}

#[timeout(5000)]
#[test]
fn test_group_dataset_name_collision() {
    let t = TestStore::new();
    t.store.save(&oxides(), "g", "d").unwrap();

    let table = Table::new(vec![Column::int("x", vec![1])]).unwrap();
    assert!(matches!(
        t.store.save(&table, "g/d", "inner"),
        Err(StoreError::Io(_))
    ));
    assert!(matches!(t.store.save(&table, "", "g"), Err(StoreError::Io(_))));
    assert_eq!(t.store.load("g", "d").unwrap(), oxides());
}
