/// Error type for predicate parsing and evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueryError {
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Unknown column '{column}'")]
    UnknownColumn { column: String },

    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
}

impl QueryError {
    pub(crate) fn parse(position: usize, message: impl Into<String>) -> Self {
        QueryError::Parse {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        QueryError::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }
}
