//! Shared fixtures.

use std::path::{Path, PathBuf};

use empyric_core::{Column, DatasetStore, FileSource, StoreConfig, Table};
use tempfile::TempDir;

/// Store over a fresh container file inside a temp directory.
pub struct TestStore {
    pub dir: TempDir,
    pub store: DatasetStore<FileSource>,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            sync_on_commit: false,
            ..StoreConfig::new(dir.path().join("geochem_data.h5"))
        };
        Self {
            store: DatasetStore::new(config),
            dir,
        }
    }

    pub fn path(&self) -> PathBuf {
        self.store.source().path().to_path_buf()
    }

    /// Another store over the same file.
    pub fn reopen(&self) -> DatasetStore<FileSource> {
        reopen(&self.path())
    }
}

pub fn reopen(path: &Path) -> DatasetStore<FileSource> {
    DatasetStore::new(StoreConfig::new(path))
}

/// Major-oxide sample table used across tests.
pub fn oxides() -> Table {
    Table::new(vec![
        Column::int("SiO2", vec![50, 55, 60, 48, 72]),
        Column::int("MgO", vec![4, 6, 8, 12, 1]),
        Column::int("CaO", vec![10, 9, 7, 11, 2]),
    ])
    .unwrap()
}
