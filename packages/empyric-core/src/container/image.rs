//! Open container state shared by the file and memory backends.

use crate::error::StoreError;

use super::array::NumericArray;
use super::node::{Attributes, Group, StoredDataset};
use super::path::{validate_name, GroupPath};
use super::AccessMode;

/// Working copy of a container tree held by an open handle.
#[derive(Debug)]
pub(crate) struct ContainerImage {
    root: Group,
    mode: AccessMode,
    compression_level: i32,
    verify_checksums: bool,
    dirty: bool,
}

impl ContainerImage {
    pub(crate) fn new(
        root: Group,
        mode: AccessMode,
        compression_level: i32,
        verify_checksums: bool,
    ) -> Self {
        Self {
            root,
            mode,
            compression_level,
            verify_checksums,
            dirty: false,
        }
    }

    pub(crate) fn root(&self) -> &Group {
        &self.root
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn require_writable(&self) -> Result<(), StoreError> {
        match self.mode {
            AccessMode::ReadWrite => Ok(()),
            AccessMode::Read => Err(StoreError::Io("container is open read-only".into())),
        }
    }

    pub(crate) fn ensure_group(&mut self, group: &GroupPath) -> Result<(), StoreError> {
        self.require_writable()?;
        let (_, created) = self.root.ensure_group(group)?;
        if created {
            tracing::debug!(group = %group, "group created");
            self.dirty = true;
        }
        Ok(())
    }

    pub(crate) fn write_dataset(
        &mut self,
        group: &GroupPath,
        name: &str,
        array: &NumericArray,
        attrs: Attributes,
    ) -> Result<(), StoreError> {
        self.require_writable()?;
        validate_name(name)?;

        let stored = StoredDataset::compress(array, attrs, self.compression_level)?;
        let compressed = stored.compressed_len();
        let (target, _) = self.root.ensure_group(group)?;
        let replaced = target.insert_dataset(name, stored)?;
        self.dirty = true;

        if replaced.is_some() {
            tracing::info!(path = %group.child_path(name), "dataset replaced");
        }
        tracing::debug!(
            path = %group.child_path(name),
            rows = array.rows(),
            cols = array.cols(),
            dtype = %array.dtype(),
            compressed,
            "dataset written"
        );
        Ok(())
    }

    pub(crate) fn read_dataset(
        &self,
        group: &GroupPath,
        name: &str,
    ) -> Result<(NumericArray, Attributes), StoreError> {
        let stored = self.root.dataset(group, name)?;
        let array = stored.decompress(self.verify_checksums)?;
        Ok((array, stored.attrs().clone()))
    }
}
