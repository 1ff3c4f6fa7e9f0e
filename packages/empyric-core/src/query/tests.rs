use ntest::timeout;

use super::*;
use crate::table::{Column, ColumnData, Table};

fn geochem() -> Table {
    Table::new(vec![
        Column::int("SiO2", vec![50, 55, 60, 45]),
        Column::int("MgO", vec![4, 6, 8, 12]),
        Column::float("Fe2O3 (wt%)", vec![1.5, 2.0, 0.5, 3.25]),
    ])
    .unwrap()
}

fn silica(table: &Table) -> Vec<i64> {
    match &table.column("SiO2").unwrap().data {
        ColumnData::Int64(v) => v.clone(),
        other => panic!("unexpected column data {:?}", other),
    }
}

#[timeout(1000)]
#[test]
fn test_filter_greater_than() {
    let table = Table::new(vec![
        Column::int("SiO2", vec![50, 55, 60]),
        Column::int("MgO", vec![4, 6, 8]),
    ])
    .unwrap();
    let result = filter(&table, "SiO2 > 50").unwrap();
    let expected = Table::new(vec![
        Column::int("SiO2", vec![55, 60]),
        Column::int("MgO", vec![6, 8]),
    ])
    .unwrap();
    assert_eq!(result, expected);
}

#[timeout(1000)]
#[test]
fn test_filter_preserves_order_and_columns() {
    let result = filter(&geochem(), "MgO >= 6").unwrap();
    assert_eq!(result.num_columns(), 3);
    assert_eq!(silica(&result), vec![55, 60, 45]);
}

#[timeout(1000)]
#[test]
fn test_filter_nothing_matches() {
    let result = filter(&geochem(), "SiO2 > 100").unwrap();
    assert!(result.is_empty());
    assert_eq!(result.column_names(), vec!["SiO2", "MgO", "Fe2O3 (wt%)"]);
}

#[timeout(1000)]
#[test]
fn test_boolean_combinators() {
    let table = geochem();
    assert_eq!(silica(&filter(&table, "SiO2 > 50 and MgO < 8").unwrap()), vec![55]);
    assert_eq!(silica(&filter(&table, "SiO2 < 50 | MgO == 4").unwrap()), vec![50, 45]);
    assert_eq!(silica(&filter(&table, "not SiO2 == 55").unwrap()), vec![50, 60, 45]);
    assert_eq!(silica(&filter(&table, "~(SiO2 > 50) & MgO > 4").unwrap()), vec![45]);
}

#[timeout(1000)]
#[test]
fn test_not_binds_tighter_than_and() {
    let table = geochem();
    let a = filter(&table, "not SiO2 > 50 and MgO > 4").unwrap();
    let b = filter(&table, "(not SiO2 > 50) and MgO > 4").unwrap();
    assert_eq!(a, b);
}

#[timeout(1000)]
#[test]
fn test_chained_comparison() {
    let result = filter(&geochem(), "50 <= SiO2 < 60").unwrap();
    assert_eq!(silica(&result), vec![50, 55]);
}

#[timeout(1000)]
#[test]
fn test_backtick_column_and_mixed_types() {
    let result = filter(&geochem(), "`Fe2O3 (wt%)` >= 2").unwrap();
    assert_eq!(silica(&result), vec![55, 45]);

    // int column against a float literal
    let result = filter(&geochem(), "SiO2 > 54.5").unwrap();
    assert_eq!(silica(&result), vec![55, 60]);
}

#[timeout(1000)]
#[test]
fn test_column_against_column_and_negation() {
    let table = geochem();
    assert_eq!(silica(&filter(&table, "MgO > -SiO2").unwrap()), vec![50, 55, 60, 45]);
    assert_eq!(silica(&filter(&table, "-MgO < -7").unwrap()), vec![60, 45]);
}

#[timeout(1000)]
#[test]
fn test_constant_predicates() {
    let table = geochem();
    assert_eq!(filter(&table, "1 < 2").unwrap().num_rows(), 4);
    assert_eq!(filter(&table, "'a' > 'b'").unwrap().num_rows(), 0);
}

#[timeout(1000)]
#[test]
fn test_nan_rows_fail_ordered_comparisons() {
    let table = Table::new(vec![Column::float("x", vec![1.0, f64::NAN, 3.0])]).unwrap();
    assert_eq!(filter(&table, "x > 0").unwrap().num_rows(), 2);
    assert_eq!(filter(&table, "not x > 0").unwrap().num_rows(), 1);
    assert_eq!(filter(&table, "x != 1").unwrap().num_rows(), 2);
}

#[timeout(1000)]
#[test]
fn test_unknown_column() {
    let err = filter(&geochem(), "Al2O3 > 10").unwrap_err();
    assert_eq!(
        err,
        QueryError::UnknownColumn {
            column: "Al2O3".into()
        }
    );
    assert_eq!(err.to_string(), "Unknown column 'Al2O3'");
}

#[timeout(1000)]
#[test]
fn test_type_mismatches() {
    let table = geochem();
    for predicate in [
        "SiO2 == 'basalt'",
        "'basalt' != MgO",
        "SiO2",
        "SiO2 > 50 and 3",
        "(SiO2 > 50) > 1",
        "not 'x'",
        "-'x' < 1",
    ] {
        assert!(
            matches!(filter(&table, predicate), Err(QueryError::TypeMismatch { .. })),
            "predicate {:?}",
            predicate
        );
    }
}

#[timeout(1000)]
#[test]
fn test_type_mismatch_message() {
    let err = filter(&geochem(), "SiO2 == 'basalt'").unwrap_err();
    assert_eq!(
        err,
        QueryError::TypeMismatch {
            expected: "string".into(),
            got: "column 'SiO2'".into()
        }
    );
}

#[timeout(1000)]
#[test]
fn test_parse_errors_surface() {
    let table = geochem();
    for predicate in ["", "SiO2 >", "SiO2 > 50 and", "(SiO2 > 50", "SiO2 = 50", "SiO2 > 1 2"] {
        assert!(
            matches!(filter(&table, predicate), Err(QueryError::Parse { .. })),
            "predicate {:?}",
            predicate
        );
    }
}

#[timeout(1000)]
#[test]
fn test_zero_row_table() {
    let table = Table::new(vec![Column::int("SiO2", vec![])]).unwrap();
    let result = filter(&table, "SiO2 > 0").unwrap();
    assert!(result.is_empty());
    assert_eq!(result.column_names(), vec!["SiO2"]);

    // binding still checks names on an empty table
    assert!(matches!(
        filter(&table, "MgO > 0"),
        Err(QueryError::UnknownColumn { .. })
    ));
}

fn assert_too_deep(predicate: &str) {
    match filter(&geochem(), predicate) {
        Err(QueryError::Parse { message, .. }) => {
            assert!(message.contains("nested too deeply"), "{}", message)
        }
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[timeout(5000)]
#[test]
fn test_deep_nesting_is_a_parse_error() {
    let depth = 10_000;
    assert_too_deep(&format!("{}SiO2 > 50{}", "(".repeat(depth), ")".repeat(depth)));
    assert_too_deep(&format!("{}SiO2 > 50", "not ".repeat(depth)));
    assert_too_deep(&format!("{}SiO2 > 50", "~".repeat(depth)));
    assert_too_deep(&format!("SiO2 > {}50", "-".repeat(depth)));
    assert_too_deep(&vec!["SiO2 > 50"; depth].join(" and "));
    assert_too_deep(&vec!["MgO"; depth].join(" < "));
}

#[timeout(5000)]
#[test]
fn test_moderate_nesting_still_evaluates() {
    let predicate = format!("{}SiO2 > 50{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(silica(&filter(&geochem(), &predicate).unwrap()), vec![55, 60]);

    let predicate = format!("{}SiO2 > 50", "not ".repeat(40));
    assert_eq!(silica(&filter(&geochem(), &predicate).unwrap()), vec![55, 60]);

    let predicate = format!("SiO2 > {}50", "-".repeat(40));
    assert_eq!(silica(&filter(&geochem(), &predicate).unwrap()), vec![55, 60]);

    let predicate = vec!["MgO > 1"; 60].join(" and ");
    assert_eq!(filter(&geochem(), &predicate).unwrap().num_rows(), 4);
}
