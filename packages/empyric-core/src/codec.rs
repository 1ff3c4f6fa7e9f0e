//! Table codec: converts tables to and from stored arrays.
//!
//! A table is stored as one row-major array of a single scalar type. The
//! type is the widest across all columns: if any column is `Float64`, every
//! integer column widens to `Float64`. Column names travel in the
//! [`COLUMNS_ATTR`] attribute; the array itself is unnamed.

use std::collections::HashSet;

use crate::container::{ArrayData, AttrValue, Attributes, NumericArray};
use crate::error::StoreError;
use crate::table::{Column, ColumnData, Table};
use crate::types::DType;

/// Attribute key holding the ordered column names.
pub const COLUMNS_ATTR: &str = "columns";

/// Encodes a table as an array plus attributes.
///
/// # Arguments
/// * `table` - Table to encode
///
/// # Returns
/// `Result<(NumericArray, Attributes), StoreError>`; `Schema` if the table
/// has no columns or its columns differ in length.
pub fn encode(table: &Table) -> Result<(NumericArray, Attributes), StoreError> {
    let columns = table.columns();
    if columns.is_empty() {
        return Err(StoreError::Schema("cannot encode a table with no columns".into()));
    }
    let rows = table.num_rows();
    if let Some(ragged) = columns.iter().find(|c| c.len() != rows) {
        return Err(StoreError::Schema(format!(
            "column '{}' has {} rows, expected {}",
            ragged.name,
            ragged.len(),
            rows
        )));
    }

    let dtype = table.common_dtype();
    let cast: Vec<ColumnData> = columns.iter().map(|c| c.data.cast(dtype)).collect();
    let data = match dtype {
        DType::Int64 => ArrayData::Int64(interleave(&cast, rows, |c| match c {
            ColumnData::Int64(v) => Some(v.as_slice()),
            ColumnData::Float64(_) => None,
        })),
        DType::Float64 => ArrayData::Float64(interleave(&cast, rows, |c| match c {
            ColumnData::Float64(v) => Some(v.as_slice()),
            ColumnData::Int64(_) => None,
        })),
    };
    let array = NumericArray::new(rows, columns.len(), data)?;

    let mut attrs = Attributes::new();
    attrs.insert(
        COLUMNS_ATTR.to_string(),
        AttrValue::TextList(columns.iter().map(|c| c.name.clone()).collect()),
    );
    Ok((array, attrs))
}

/// Decodes an array plus attributes into a table.
///
/// # Returns
/// `Result<Table, StoreError>`; `Schema` if the `columns` attribute is
/// missing, is not a string list, has the wrong length, or repeats a name.
pub fn decode(array: &NumericArray, attrs: &Attributes) -> Result<Table, StoreError> {
    let names = attrs
        .get(COLUMNS_ATTR)
        .ok_or_else(|| StoreError::Schema(format!("missing '{}' attribute", COLUMNS_ATTR)))?
        .as_text_list()
        .ok_or_else(|| {
            StoreError::Schema(format!("'{}' attribute is not a string list", COLUMNS_ATTR))
        })?;

    if names.len() != array.cols() {
        return Err(StoreError::Schema(format!(
            "'{}' lists {} names but the array has {} columns",
            COLUMNS_ATTR,
            names.len(),
            array.cols()
        )));
    }
    let mut seen = HashSet::new();
    if let Some(duplicate) = names.iter().find(|n| !seen.insert(n.as_str())) {
        return Err(StoreError::Schema(format!(
            "duplicate column name '{}'",
            duplicate
        )));
    }

    let (rows, cols) = array.shape();
    let columns = names
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let data = match array.data() {
                ArrayData::Int64(v) => ColumnData::Int64(gather(v, rows, cols, col)),
                ArrayData::Float64(v) => ColumnData::Float64(gather(v, rows, cols, col)),
            };
            Column::new(name.clone(), data)
        })
        .collect();
    Table::new(columns)
}

/// Row-major interleave of equally long column slices.
fn interleave<T: Copy>(
    columns: &[ColumnData],
    rows: usize,
    slice: impl Fn(&ColumnData) -> Option<&[T]>,
) -> Vec<T> {
    let slices: Vec<&[T]> = columns.iter().filter_map(|c| slice(c)).collect();
    let mut out = Vec::with_capacity(rows * slices.len());
    for row in 0..rows {
        out.extend(slices.iter().map(|s| s[row]));
    }
    out
}

/// Extracts one column from row-major data.
fn gather<T: Copy>(data: &[T], rows: usize, cols: usize, col: usize) -> Vec<T> {
    (0..rows).map(|row| data[row * cols + col]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Value;

    fn int_table() -> Table {
        Table::new(vec![
            Column::int("SiO2", vec![50, 55]),
            Column::int("MgO", vec![4, 6]),
        ])
        .unwrap()
    }

    #[test]
    fn test_encode_row_major() {
        let (array, attrs) = encode(&int_table()).unwrap();
        assert_eq!(array.shape(), (2, 2));
        assert_eq!(array.data(), &ArrayData::Int64(vec![50, 4, 55, 6]));
        assert_eq!(
            attrs.get(COLUMNS_ATTR),
            Some(&AttrValue::TextList(vec!["SiO2".into(), "MgO".into()]))
        );
    }

    #[test]
    fn test_roundtrip_single_type() {
        let table = int_table();
        let (array, attrs) = encode(&table).unwrap();
        assert_eq!(decode(&array, &attrs).unwrap(), table);
    }

    #[test]
    fn test_mixed_types_widen_to_float() {
        let table = Table::new(vec![
            Column::int("SiO2", vec![50, 55]),
            Column::float("MgO", vec![4.5, 6.25]),
        ])
        .unwrap();
        let (array, attrs) = encode(&table).unwrap();
        assert_eq!(array.dtype(), DType::Float64);

        let decoded = decode(&array, &attrs).unwrap();
        assert_eq!(decoded.columns()[0].data, ColumnData::Float64(vec![50.0, 55.0]));
        assert_eq!(decoded.columns()[1].data, ColumnData::Float64(vec![4.5, 6.25]));
        assert_ne!(decoded, table);
    }

    #[test]
    fn test_zero_row_table_keeps_columns() {
        let table = Table::new(vec![Column::float("a", vec![]), Column::float("b", vec![])])
            .unwrap();
        let (array, attrs) = encode(&table).unwrap();
        assert_eq!(array.shape(), (0, 2));
        let decoded = decode(&array, &attrs).unwrap();
        assert_eq!(decoded.column_names(), vec!["a", "b"]);
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_encode_rejects_empty_table() {
        assert!(matches!(encode(&Table::empty()), Err(StoreError::Schema(_))));
    }

    #[test]
    fn test_decode_requires_columns_attr() {
        let (array, _) = encode(&int_table()).unwrap();
        let result = decode(&array, &Attributes::new());
        assert!(matches!(result, Err(StoreError::Schema(msg)) if msg.contains("missing")));
    }

    #[test]
    fn test_decode_rejects_wrong_column_count() {
        let (array, mut attrs) = encode(&int_table()).unwrap();
        attrs.insert(
            COLUMNS_ATTR.into(),
            AttrValue::TextList(vec!["only_one".into()]),
        );
        assert!(matches!(decode(&array, &attrs), Err(StoreError::Schema(_))));
    }

    #[test]
    fn test_decode_rejects_non_list_columns() {
        let (array, mut attrs) = encode(&int_table()).unwrap();
        attrs.insert(COLUMNS_ATTR.into(), AttrValue::from("SiO2,MgO"));
        assert!(matches!(decode(&array, &attrs), Err(StoreError::Schema(_))));
    }

    #[test]
    fn test_decode_rejects_duplicate_names() {
        let (array, mut attrs) = encode(&int_table()).unwrap();
        attrs.insert(
            COLUMNS_ATTR.into(),
            AttrValue::TextList(vec!["x".into(), "x".into()]),
        );
        assert!(matches!(
            decode(&array, &attrs),
            Err(StoreError::Schema(msg)) if msg.contains("duplicate")
        ));
    }

    #[test]
    fn test_large_integers_lose_precision_when_widened() {
        let big = (1i64 << 53) + 1;
        let table = Table::new(vec![
            Column::int("id", vec![big]),
            Column::float("w", vec![0.5]),
        ])
        .unwrap();
        let (array, attrs) = encode(&table).unwrap();
        let decoded = decode(&array, &attrs).unwrap();
        assert_eq!(decoded.value(0, 0), Some(Value::Float((1i64 << 53) as f64)));
    }
}
