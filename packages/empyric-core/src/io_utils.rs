//! I/O utilities for container file operations.

use std::io::ErrorKind;

use crate::error::StoreError;

/// Classifies I/O errors into specific StoreError variants.
pub fn classify_io_error(error: std::io::Error, context: &str) -> StoreError {
    match error.kind() {
        ErrorKind::StorageFull | ErrorKind::OutOfMemory => {
            StoreError::DiskFull(format!("{}: {}", context, error))
        }
        _ => StoreError::Io(format!("{}: {}", context, error)),
    }
}
