//! Read-only traversal of a store's container tree.

use serde::Serialize;

use crate::codec;
use crate::container::{
    split_dataset_path, AccessMode, Attributes, Container, ContainerSource, Group, Node,
};
use crate::error::StoreError;
use crate::table::Table;
use crate::types::DType;

use super::DatasetStore;

/// What a tree entry is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    Group,
    Dataset { rows: usize, cols: usize, dtype: DType },
}

/// One node of the container tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeEntry {
    /// Full `/`-separated path from the root
    pub path: String,
    /// Nesting depth; top-level nodes have depth 0
    pub depth: usize,
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(skip)]
    pub attrs: Attributes,
}

impl NodeEntry {
    /// Final path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn is_dataset(&self) -> bool {
        matches!(self.kind, NodeKind::Dataset { .. })
    }
}

impl<S: ContainerSource> DatasetStore<S> {
    /// Lists every group and dataset, depth first with children in name order.
    pub fn entries(&self) -> Result<Vec<NodeEntry>, StoreError> {
        let container = self.source.acquire(AccessMode::Read)?;
        let mut entries = Vec::new();
        walk(container.root(), "", 0, &mut entries);
        container.close()?;
        Ok(entries)
    }

    /// Paths of every dataset whose name equals `name`.
    pub fn find_by_name(&self, name: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|e| e.is_dataset() && e.name() == name)
            .map(|e| e.path)
            .collect())
    }

    /// Paths of every dataset whose attribute `key` renders as `value`.
    pub fn filter_by_attribute(&self, key: &str, value: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|e| e.is_dataset())
            .filter(|e| e.attrs.get(key).is_some_and(|v| v.to_string() == value))
            .map(|e| e.path)
            .collect())
    }

    /// First `rows` rows of the dataset at `dataset_path`, e.g. `geochem/samples`.
    pub fn preview(&self, dataset_path: &str, rows: usize) -> Result<Table, StoreError> {
        let (group, name) = split_dataset_path(dataset_path)?;
        let (array, attrs) = {
            let container = self.source.acquire(AccessMode::Read)?;
            let dataset = container.read_dataset(&group, &name)?;
            container.close()?;
            dataset
        };
        codec::decode(&array.head(rows), &attrs)
    }
}

fn walk(group: &Group, prefix: &str, depth: usize, out: &mut Vec<NodeEntry>) {
    for (name, node) in group.children() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", prefix, name)
        };
        match node {
            Node::Group(child) => {
                out.push(NodeEntry {
                    path: path.clone(),
                    depth,
                    kind: NodeKind::Group,
                    attrs: child.attrs().clone(),
                });
                walk(child, &path, depth + 1, out);
            }
            Node::Dataset(dataset) => {
                let (rows, cols) = dataset.shape();
                out.push(NodeEntry {
                    path,
                    depth,
                    kind: NodeKind::Dataset {
                        rows,
                        cols,
                        dtype: dataset.dtype(),
                    },
                    attrs: dataset.attrs().clone(),
                });
            }
        }
    }
}
