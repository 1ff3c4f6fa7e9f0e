//! Rectangular numeric arrays stored in datasets.

use crate::error::StoreError;
use crate::types::{DType, Value};

/// Element storage of a numeric array, row-major.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
}

impl ArrayData {
    pub fn len(&self) -> usize {
        match self {
            ArrayData::Int64(v) => v.len(),
            ArrayData::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DType {
        match self {
            ArrayData::Int64(_) => DType::Int64,
            ArrayData::Float64(_) => DType::Float64,
        }
    }
}

/// Two-dimensional array with a single scalar type.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericArray {
    rows: usize,
    cols: usize,
    data: ArrayData,
}

impl NumericArray {
    /// Creates an array from row-major data.
    ///
    /// # Returns
    /// `Result<NumericArray, StoreError>`; `Schema` if `rows * cols`
    /// does not match the element count.
    pub fn new(rows: usize, cols: usize, data: ArrayData) -> Result<Self, StoreError> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            StoreError::Schema(format!("array shape {}x{} overflows", rows, cols))
        })?;
        if data.len() != expected {
            return Err(StoreError::Schema(format!(
                "array shape {}x{} needs {} elements, got {}",
                rows,
                cols,
                expected,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    /// Element at (`row`, `col`).
    pub fn get(&self, row: usize, col: usize) -> Option<Value> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let index = row * self.cols + col;
        match &self.data {
            ArrayData::Int64(v) => v.get(index).copied().map(Value::Int),
            ArrayData::Float64(v) => v.get(index).copied().map(Value::Float),
        }
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> NumericArray {
        let rows = n.min(self.rows);
        let end = rows * self.cols;
        let data = match &self.data {
            ArrayData::Int64(v) => ArrayData::Int64(v[..end].to_vec()),
            ArrayData::Float64(v) => ArrayData::Float64(v[..end].to_vec()),
        };
        NumericArray {
            rows,
            cols: self.cols,
            data,
        }
    }

    /// Little-endian element bytes.
    pub(crate) fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * self.dtype().element_size());
        match &self.data {
            ArrayData::Int64(v) => v.iter().for_each(|x| bytes.extend_from_slice(&x.to_le_bytes())),
            ArrayData::Float64(v) => v
                .iter()
                .for_each(|x| bytes.extend_from_slice(&x.to_bits().to_le_bytes())),
        }
        bytes
    }

    /// Rebuilds an array from little-endian element bytes.
    pub(crate) fn from_le_bytes(
        dtype: DType,
        rows: usize,
        cols: usize,
        bytes: &[u8],
    ) -> Result<Self, StoreError> {
        let element_size = dtype.element_size();
        if bytes.len() % element_size != 0 {
            return Err(StoreError::Corrupted(format!(
                "payload length {} is not a multiple of {}",
                bytes.len(),
                element_size
            )));
        }

        let words = bytes.chunks_exact(element_size).map(|chunk| {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            word
        });
        let data = match dtype {
            DType::Int64 => ArrayData::Int64(words.map(i64::from_le_bytes).collect()),
            DType::Float64 => ArrayData::Float64(
                words
                    .map(|w| f64::from_bits(u64::from_le_bytes(w)))
                    .collect(),
            ),
        };

        Self::new(rows, cols, data).map_err(|e| StoreError::Corrupted(e.to_string()))
    }
}
