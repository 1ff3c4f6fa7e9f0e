//! In-memory container backend.

use std::sync::{Arc, Mutex};

use crate::error::StoreError;

use super::array::NumericArray;
use super::image::ContainerImage;
use super::node::{Attributes, Group};
use super::path::GroupPath;
use super::{AccessMode, Container, ContainerSource};

/// Container kept in process memory.
///
/// Clones share the same tree. Handles work on a copy that replaces the
/// shared tree on close, so the commit behaviour matches [`super::FileSource`].
#[derive(Debug, Clone)]
pub struct MemorySource {
    root: Arc<Mutex<Group>>,
    compression_level: i32,
    verify_checksums: bool,
}

impl MemorySource {
    /// Creates an empty in-memory container.
    pub fn new() -> Self {
        Self {
            root: Arc::new(Mutex::new(Group::new())),
            compression_level: 3,
            verify_checksums: true,
        }
    }

    /// Copy of the current committed tree.
    pub fn snapshot(&self) -> Result<Group, StoreError> {
        let root = self.root.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(root.clone())
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerSource for MemorySource {
    type Handle = MemoryContainer;

    fn acquire(&self, mode: AccessMode) -> Result<MemoryContainer, StoreError> {
        let root = self.snapshot()?;
        Ok(MemoryContainer {
            shared: Arc::clone(&self.root),
            image: ContainerImage::new(root, mode, self.compression_level, self.verify_checksums),
        })
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

/// Open handle on an in-memory container.
#[derive(Debug)]
pub struct MemoryContainer {
    shared: Arc<Mutex<Group>>,
    image: ContainerImage,
}

impl Container for MemoryContainer {
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
            let mut shared = self.shared.lock().map_err(|_| StoreError::LockPoisoned)?;
            *shared = self.image.root().clone();
            drop(shared);
            self.image.mark_clean();
        }
        Ok(())
    }
}
