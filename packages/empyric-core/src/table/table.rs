//! In-memory table of ordered, row-aligned columns.

use std::collections::HashSet;
use std::fmt;

use crate::error::StoreError;
use crate::types::{DType, Value};

use super::column::Column;

/// Ordered collection of named, equal-length columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Creates a table from columns.
    ///
    /// # Arguments
    /// * `columns` - Columns in display/storage order
    ///
    /// # Returns
    /// `Result<Table, StoreError>`; `Schema` if there are no columns, names
    /// repeat or lengths differ.
    pub fn new(columns: Vec<Column>) -> Result<Self, StoreError> {
        if columns.is_empty() {
            return Err(StoreError::Schema("a table needs at least one column".into()));
        }
        let mut seen_names = HashSet::new();
        for column in &columns {
            if !seen_names.insert(column.name.as_str()) {
                return Err(StoreError::Schema(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
        }

        let row_count = columns.first().map(Column::len).unwrap_or(0);
        if let Some(ragged) = columns.iter().find(|c| c.len() != row_count) {
            return Err(StoreError::Schema(format!(
                "column '{}' has {} rows, expected {}",
                ragged.name,
                ragged.len(),
                row_count
            )));
        }

        Ok(Self { columns, row_count })
    }

    /// Creates a table with no columns and no rows, e.g. as a placeholder.
    /// The codec refuses to store it.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            row_count: 0,
        }
    }

    /// Columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Consumes the table, returning its columns.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Position of the named column.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn num_rows(&self) -> usize {
        self.row_count
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Value at (`row`, `column`).
    pub fn value(&self, row: usize, column: usize) -> Option<Value> {
        self.columns.get(column).and_then(|c| c.data.get(row))
    }

    /// Values of one row, in column order.
    pub fn row(&self, row: usize) -> Option<Vec<Value>> {
        if row >= self.row_count {
            return None;
        }
        self.columns.iter().map(|c| c.data.get(row)).collect()
    }

    /// Iterates rows in order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.row_count).filter_map(move |i| self.row(i))
    }

    /// Widest element type across all columns; `Int64` for a table without columns.
    pub fn common_dtype(&self) -> DType {
        self.columns
            .iter()
            .map(Column::dtype)
            .fold(DType::Int64, DType::widen)
    }

    /// Builds a table from the given row indices, keeping every column.
    ///
    /// Indices must be in range; they are emitted in the order given.
    pub fn take_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), c.data.take(indices)))
            .collect();
        Table {
            columns,
            row_count: indices.len(),
        }
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Table {
        let indices: Vec<usize> = (0..n.min(self.row_count)).collect();
        self.take_rows(&indices)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}

/// Renders a right-aligned grid with a leading row-index column.
impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "Empty table ({} rows, 0 columns)", self.row_count);
        }

        let cells: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| {
                (0..self.row_count)
                    .filter_map(|i| c.data.get(i))
                    .map(|v| v.to_string())
                    .collect()
            })
            .collect();

        let index_width = self.row_count.saturating_sub(1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .zip(&cells)
            .map(|(c, col)| col.iter().map(String::len).fold(c.name.len(), usize::max))
            .collect();

        write!(f, "{:width$}", "", width = index_width)?;
        for (column, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", column.name, width = width)?;
        }
        for row in 0..self.row_count {
            writeln!(f)?;
            write!(f, "{:<width$}", row, width = index_width)?;
            for (col, width) in cells.iter().zip(&widths) {
                write!(f, "  {:>width$}", col[row], width = width)?;
            }
        }
        Ok(())
    }
}
