//! Dataset store: saves, loads and queries tables inside a container.
//!
//! Every operation acquires a container handle from the store's
//! [`ContainerSource`], does its work, and closes the handle before
//! returning. A failed write operation drops its handle, so nothing it
//! staged reaches the container.

mod inspect;


pub use inspect::{NodeEntry, NodeKind};

use crate::codec::{self, COLUMNS_ATTR};
use crate::config::StoreConfig;
use crate::container::{
    validate_name, AccessMode, Attributes, Container, ContainerSource, FileSource, GroupPath,
};
use crate::error::StoreError;
use crate::query;
use crate::table::Table;

/// Table store over a container source.
#[derive(Debug, Clone)]
pub struct DatasetStore<S: ContainerSource = FileSource> {
    source: S,
}

impl DatasetStore<FileSource> {
    /// Creates a store backed by the container file named in `config`.
    ///
    /// The file is not touched until the first operation.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_source(FileSource::new(&config))
    }
}

impl<S: ContainerSource> DatasetStore<S> {
    /// Creates a store over any container source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Returns the underlying container source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Saves `table` as `group/dataset`, replacing any existing dataset.
    ///
    /// # Arguments
    /// * `table` - Table to store; must have at least one column
    /// * `group` - `/`-separated group path, created if absent
    /// * `dataset` - Dataset name within the group
    ///
    /// # Returns
    /// `Result<(), StoreError>`; `Schema` if the table cannot be encoded.
    pub fn save(&self, table: &Table, group: &str, dataset: &str) -> Result<(), StoreError> {
        self.save_with_attributes(table, group, dataset, Attributes::new())
    }

    /// Saves `table` with extra attributes attached to the dataset.
    ///
    /// The `columns` attribute belongs to the codec; supplying it is a
    /// `Schema` error.
    pub fn save_with_attributes(
        &self,
        table: &Table,
        group: &str,
        dataset: &str,
        attrs: Attributes,
    ) -> Result<(), StoreError> {
        let group_path = GroupPath::parse(group)?;
        validate_name(dataset)?;
        if attrs.contains_key(COLUMNS_ATTR) {
            return Err(StoreError::Schema(format!(
                "attribute '{}' is reserved for column names",
                COLUMNS_ATTR
            )));
        }

        let (array, mut stored_attrs) = codec::encode(table)?;
        stored_attrs.extend(attrs);

        self.with_container(AccessMode::ReadWrite, |container| {
            container.ensure_group(&group_path)?;
            container.write_dataset(&group_path, dataset, &array, stored_attrs)
        })?;

        tracing::info!(
            container = %self.source.describe(),
            path = %group_path.child_path(dataset),
            rows = table.num_rows(),
            columns = table.num_columns(),
            "table saved"
        );
        Ok(())
    }

    /// Loads the table stored at `group/dataset`.
    ///
    /// # Returns
    /// `Result<Table, StoreError>`; `NotFound` if the container, group or
    /// dataset does not exist.
    pub fn load(&self, group: &str, dataset: &str) -> Result<Table, StoreError> {
        let group_path = GroupPath::parse(group)?;
        validate_name(dataset)?;

        let (array, attrs) = self.with_container(AccessMode::Read, |container| {
            container.read_dataset(&group_path, dataset)
        })?;
        let table = codec::decode(&array, &attrs)?;

        tracing::debug!(
            path = %group_path.child_path(dataset),
            rows = table.num_rows(),
            "table loaded"
        );
        Ok(table)
    }

    /// Loads `group/dataset` and keeps the rows matching `predicate`.
    ///
    /// The predicate is parsed before the container is opened, so a syntax
    /// error is reported without any I/O.
    pub fn query(&self, group: &str, dataset: &str, predicate: &str) -> Result<Table, StoreError> {
        let expr = query::parse(predicate)?;
        let table = self.load(group, dataset)?;
        let result = query::evaluate(&table, &expr)?;

        tracing::debug!(
            path = %format!("{}/{}", group, dataset),
            predicate,
            matched = result.num_rows(),
            "query executed"
        );
        Ok(result)
    }

    /// Returns every attribute stored on `group/dataset`, including `columns`.
    pub fn attributes(&self, group: &str, dataset: &str) -> Result<Attributes, StoreError> {
        let group_path = GroupPath::parse(group)?;
        validate_name(dataset)?;

        self.with_container(AccessMode::Read, |container| {
            container
                .root()
                .dataset(&group_path, dataset)
                .map(|stored| stored.attrs().clone())
        })
    }

    /// Runs `op` on a freshly acquired handle and closes it on success.
    fn with_container<T>(
        &self,
        mode: AccessMode,
        op: impl FnOnce(&mut S::Handle) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut container = self.source.acquire(mode)?;
        let output = op(&mut container)?;
        container.close()?;
        Ok(output)
    }
}
