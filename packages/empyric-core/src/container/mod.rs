//! Hierarchical container of compressed numeric datasets.
//!
//! A container is a tree of groups and datasets. Each dataset holds one
//! rectangular array of a single scalar type, compressed losslessly, plus
//! attributes. Access goes through two traits:
//! - [`ContainerSource`] acquires a handle for the duration of one operation
//! - [`Container`] is the capability set used by the store and codec
//!
//! [`FileSource`] keeps the tree in a single file; [`MemorySource`] keeps it
//! in process memory.

mod array;
mod file;
mod format;
mod image;
mod memory;
mod node;
mod path;


pub use array::{ArrayData, NumericArray};
pub use file::{FileContainer, FileSource};
pub use memory::{MemoryContainer, MemorySource};
pub use node::{AttrValue, Attributes, Group, Node, PayloadCodec, StoredDataset};
pub use path::{split_dataset_path, validate_name, GroupPath};

use crate::error::StoreError;

/// How a handle is acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Read-only; never creates the container
    Read,
    /// Read/write; creates an empty container if absent
    ReadWrite,
}

/// Open container handle.
///
/// Changes are staged on the handle and persisted by [`Container::close`].
/// Dropping a handle without closing it discards staged changes.
pub trait Container {
    /// Creates the group and its ancestors if absent. Idempotent.
    fn ensure_group(&mut self, group: &GroupPath) -> Result<(), StoreError>;

    /// Writes a dataset, replacing any dataset already at that path.
    fn write_dataset(
        &mut self,
        group: &GroupPath,
        name: &str,
        array: &NumericArray,
        attrs: Attributes,
    ) -> Result<(), StoreError>;

    /// Reads a dataset's array and attributes.
    fn read_dataset(
        &self,
        group: &GroupPath,
        name: &str,
    ) -> Result<(NumericArray, Attributes), StoreError>;

    /// Root group, for traversal.
    fn root(&self) -> &Group;

    /// Persists staged changes and releases the handle.
    fn close(self) -> Result<(), StoreError>
    where
        Self: Sized;
}

/// Produces container handles.
pub trait ContainerSource {
    type Handle: Container;

    /// Opens (or, for `ReadWrite`, creates) the container.
    fn acquire(&self, mode: AccessMode) -> Result<Self::Handle, StoreError>;

    /// Human-readable location, for logs and messages.
    fn describe(&self) -> String;
}
