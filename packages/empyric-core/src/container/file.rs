//! Single-file container backend.

use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::error::StoreError;

use super::array::NumericArray;
use super::format;
use super::image::ContainerImage;
use super::node::{Attributes, Group};
use super::path::GroupPath;
use super::{AccessMode, Container, ContainerSource};

/// Source of handles on one container file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    compression_level: i32,
    verify_checksums: bool,
    sync_on_commit: bool,
}

impl FileSource {
    /// Creates a source from store configuration.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            path: config.path.clone(),
            compression_level: config.compression_level,
            verify_checksums: config.verify_checksums,
            sync_on_commit: config.sync_on_commit,
        }
    }

    /// Container file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContainerSource for FileSource {
    type Handle = FileContainer;

    fn acquire(&self, mode: AccessMode) -> Result<FileContainer, StoreError> {
        FileContainer::open(self, mode)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Open handle on a container file.
///
/// The whole tree is read on open. Writes stage in memory and are committed
/// by [`Container::close`] with an atomic rename.
#[derive(Debug)]
pub struct FileContainer {
    path: PathBuf,
    image: ContainerImage,
    sync_on_commit: bool,
}

impl FileContainer {
    /// Opens an existing container file or creates an empty one.
    ///
    /// # Returns
    /// `Result<FileContainer, StoreError>`; `Io` on permission or path errors,
    /// `Corrupted` if the existing file fails validation.
    pub fn open_or_create(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::open(&FileSource::new(config), AccessMode::ReadWrite)
    }

    /// Opens an existing container file read-only.
    ///
    /// # Returns
    /// `Result<FileContainer, StoreError>`; `NotFound` if the file does not exist.
    pub fn open_read_only(config: &StoreConfig) -> Result<Self, StoreError> {
        Self::open(&FileSource::new(config), AccessMode::Read)
    }

    fn open(source: &FileSource, mode: AccessMode) -> Result<Self, StoreError> {
        let path = source.path.clone();
        let root = if path.exists() {
            format::read_container(&path)?
        } else {
            match mode {
                AccessMode::Read => {
                    return Err(StoreError::not_found(path.display().to_string()));
                }
                AccessMode::ReadWrite => {
                    let root = Group::new();
                    format::write_container(&path, &root, source.sync_on_commit)?;
                    tracing::info!(path = %path.display(), "container created");
                    root
                }
            }
        };

        tracing::debug!(path = %path.display(), ?mode, "container acquired");
        Ok(Self {
            path,
            image: ContainerImage::new(
                root,
                mode,
                source.compression_level,
                source.verify_checksums,
            ),
            sync_on_commit: source.sync_on_commit,
        })
    }

    /// Container file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Container for FileContainer {
    fn ensure_group(&mut self, group: &GroupPath) -> Result<(), StoreError> {
        self.image.ensure_group(group)
    }

    fn write_dataset(
        &mut self,
        group: &GroupPath,
        name: &str,
        array: &NumericArray,
        attrs: Attributes,
    ) -> Result<(), StoreError> {
        self.image.write_dataset(group, name, array, attrs)
    }

    fn read_dataset(
        &self,
        group: &GroupPath,
        name: &str,
    ) -> Result<(NumericArray, Attributes), StoreError> {
        self.image.read_dataset(group, name)
    }

    fn root(&self) -> &Group {
        self.image.root()
    }

    fn close(mut self) -> Result<(), StoreError> {
        if self.image.is_dirty() {
            format::write_container(&self.path, self.image.root(), self.sync_on_commit)?;
            self.image.mark_clean();
        }
        tracing::debug!(path = %self.path.display(), "container released");
        Ok(())
    }
}

impl Drop for FileContainer {
    fn drop(&mut self) {
        if self.image.is_dirty() {
            tracing::warn!(
                path = %self.path.display(),
                "container handle dropped with uncommitted changes"
            );
        }
    }
}
