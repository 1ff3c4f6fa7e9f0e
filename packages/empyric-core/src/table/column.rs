//! Named, homogeneous table column.

use crate::types::{DType, Value};

/// Homogeneous column storage.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
}

impl ColumnData {
    /// Creates empty storage of the given type with reserved capacity.
    pub fn with_capacity(dtype: DType, capacity: usize) -> Self {
        match dtype {
            DType::Int64 => ColumnData::Int64(Vec::with_capacity(capacity)),
            DType::Float64 => ColumnData::Float64(Vec::with_capacity(capacity)),
        }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int64(v) => v.len(),
            ColumnData::Float64(v) => v.len(),
        }
    }

    /// Returns true if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element type.
    pub fn dtype(&self) -> DType {
        match self {
            ColumnData::Int64(_) => DType::Int64,
            ColumnData::Float64(_) => DType::Float64,
        }
    }

    /// Value at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            ColumnData::Int64(v) => v.get(index).copied().map(Value::Int),
            ColumnData::Float64(v) => v.get(index).copied().map(Value::Float),
        }
    }

    /// Appends a value, converting it to this column's type.
    ///
    /// Floats pushed into an integer column are truncated; callers coerce
    /// the column type first when that matters.
    pub fn push(&mut self, value: Value) {
        match (self, value) {
            (ColumnData::Int64(v), Value::Int(x)) => v.push(x),
            (ColumnData::Int64(v), Value::Float(x)) => v.push(x as i64),
            (ColumnData::Float64(v), x) => v.push(x.as_f64()),
        }
    }

    /// Converts the column to `dtype`, widening integers to floats.
    pub fn cast(&self, dtype: DType) -> ColumnData {
        match (self, dtype) {
            (ColumnData::Int64(v), DType::Float64) => {
                ColumnData::Float64(v.iter().map(|&x| x as f64).collect())
            }
            (ColumnData::Float64(v), DType::Int64) => {
                ColumnData::Int64(v.iter().map(|&x| x as i64).collect())
            }
            _ => self.clone(),
        }
    }

    /// Gathers the values at `indices`, in the order given.
    pub fn take(&self, indices: &[usize]) -> ColumnData {
        match self {
            ColumnData::Int64(v) => ColumnData::Int64(indices.iter().map(|&i| v[i]).collect()),
            ColumnData::Float64(v) => {
                ColumnData::Float64(indices.iter().map(|&i| v[i]).collect())
            }
        }
    }
}

/// Named table column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name, unique within a table
    pub name: String,
    /// Column values
    pub data: ColumnData,
}

impl Column {
    /// Creates a column from a name and storage.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Creates an integer column.
    pub fn int(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, ColumnData::Int64(values))
    }

    /// Creates a float column.
    pub fn float(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ColumnData::Float64(values))
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element type.
    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }
}
