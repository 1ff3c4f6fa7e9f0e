//! Store configuration.

use std::path::PathBuf;

/// Default container file name used when no path is given.
pub const DEFAULT_CONTAINER_FILE: &str = "geochem_data.h5";

/// Dataset store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Container file backing the store
    pub path: PathBuf,
    /// zstd compression level for dataset payloads (1-22)
    pub compression_level: i32,
    /// Verify payload checksums when reading datasets
    pub verify_checksums: bool,
    /// fsync the container before the commit rename
    pub sync_on_commit: bool,
}

impl StoreConfig {
    /// Creates a configuration for the given container file with default settings.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONTAINER_FILE),
            compression_level: 3,
            verify_checksums: true,
            sync_on_commit: true,
        }
    }
}
