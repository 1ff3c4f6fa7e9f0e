//! Scalar element types shared by tables and stored arrays.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Scalar element type of a stored array or table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// 64-bit signed integer
    Int64,
    /// 64-bit IEEE float
    Float64,
}

impl DType {
    /// Size of one element in bytes.
    pub const fn element_size(self) -> usize {
        8
    }

    /// Returns the type both `self` and `other` widen to.
    ///
    /// Integers widen to floating point; there is no narrowing.
    pub fn widen(self, other: DType) -> DType {
        match (self, other) {
            (DType::Int64, DType::Int64) => DType::Int64,
            _ => DType::Float64,
        }
    }

    /// Short type name used in listings.
    pub fn name(self) -> &'static str {
        match self {
            DType::Int64 => "int64",
            DType::Float64 => "float64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    /// Element type of this value.
    pub fn dtype(self) -> DType {
        match self {
            Value::Int(_) => DType::Int64,
            Value::Float(_) => DType::Float64,
        }
    }

    /// Value as a float, widening integers.
    pub fn as_f64(self) -> f64 {
        match self {
            Value::Int(v) => v as f64,
            Value::Float(v) => v,
        }
    }

    /// Arithmetic negation. `i64::MIN` negates to a float.
    pub fn negate(self) -> Value {
        match self {
            Value::Int(v) => v
                .checked_neg()
                .map(Value::Int)
                .unwrap_or(Value::Float(-(v as f64))),
            Value::Float(v) => Value::Float(-v),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            // Keep a fractional part so floats read back as floats.
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 => {
                if v.abs() < 1e16 {
                    write!(f, "{:.1}", v)
                } else {
                    // Exponent form, e.g. `1e16`
                    write!(f, "{:?}", v)
                }
            }
            Value::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}
