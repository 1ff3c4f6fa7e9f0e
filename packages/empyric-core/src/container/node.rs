//! Container tree nodes: groups, stored datasets and attributes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::types::DType;

use super::array::NumericArray;
use super::path::GroupPath;

/// Attribute map attached to groups and datasets, ordered by key.
pub type Attributes = BTreeMap<String, AttrValue>;

/// Attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Text(String),
    TextList(Vec<String>),
    Int(i64),
    Float(f64),
}

impl AttrValue {
    /// Returns the string list if this is a `TextList`.
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::TextList(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the string if this is a `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::TextList(items) => write!(f, "[{}]", items.join(", ")),
            AttrValue::Int(v) => write!(f, "{}", v),
            AttrValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(items: Vec<String>) -> Self {
        AttrValue::TextList(items)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

/// Payload compression codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadCodec {
    Zstd { level: i32 },
}

/// Dataset as kept in the container: compressed payload plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDataset {
    dtype: DType,
    shape: [u64; 2],
    codec: PayloadCodec,
    /// CRC32 of the uncompressed element bytes
    checksum: u32,
    payload: Vec<u8>,
    attrs: Attributes,
}

impl StoredDataset {
    /// Compresses an array into a stored dataset.
    pub fn compress(
        array: &NumericArray,
        attrs: Attributes,
        level: i32,
    ) -> Result<Self, StoreError> {
        let raw = array.to_le_bytes();
        let checksum = crc32fast::hash(&raw);
        let payload = zstd::encode_all(raw.as_slice(), level)
            .map_err(|e| StoreError::Serialization(format!("zstd compression failed: {}", e)))?;
        Ok(Self {
            dtype: array.dtype(),
            shape: [array.rows() as u64, array.cols() as u64],
            codec: PayloadCodec::Zstd { level },
            checksum,
            payload,
            attrs,
        })
    }

    /// Decompresses the payload back into an array.
    ///
    /// # Arguments
    /// * `verify` - Compare the payload checksum before decoding
    pub fn decompress(&self, verify: bool) -> Result<NumericArray, StoreError> {
        let raw = match self.codec {
            PayloadCodec::Zstd { .. } => zstd::decode_all(self.payload.as_slice())
                .map_err(|e| StoreError::Corrupted(format!("zstd decompression failed: {}", e)))?,
        };
        if verify {
            let computed = crc32fast::hash(&raw);
            if computed != self.checksum {
                return Err(StoreError::Corrupted(format!(
                    "dataset checksum mismatch: expected {:08x}, computed {:08x}",
                    self.checksum, computed
                )));
            }
        }
        let (rows, cols) = self.shape();
        NumericArray::from_le_bytes(self.dtype, rows, cols, &raw)
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.shape[0] as usize, self.shape[1] as usize)
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// Size of the compressed payload in bytes.
    pub fn compressed_len(&self) -> usize {
        self.payload.len()
    }
}

/// Container tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Group(Group),
    Dataset(StoredDataset),
}

impl Node {
    /// Node kind for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Group(_) => "group",
            Node::Dataset(_) => "dataset",
        }
    }
}

/// Named namespace holding child groups, datasets and attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    attrs: Attributes,
    children: BTreeMap<String, Node>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attributes {
        &mut self.attrs
    }

    /// Children in name order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Resolves a descendant group.
    pub fn group(&self, path: &GroupPath) -> Result<&Group, StoreError> {
        let mut current = self;
        for (depth, segment) in path.segments().iter().enumerate() {
            current = match current.children.get(segment) {
                Some(Node::Group(group)) => group,
                _ => return Err(StoreError::not_found(path.prefix(depth + 1))),
            };
        }
        Ok(current)
    }

    /// Resolves a dataset inside a descendant group.
    pub fn dataset(&self, path: &GroupPath, name: &str) -> Result<&StoredDataset, StoreError> {
        match self.group(path)?.children.get(name) {
            Some(Node::Dataset(dataset)) => Ok(dataset),
            _ => Err(StoreError::not_found(path.child_path(name))),
        }
    }

    /// Creates `path` and any missing ancestors.
    ///
    /// # Returns
    /// The group and whether anything was created. A segment that already
    /// names a dataset is a collision and fails with `Io`.
    pub(crate) fn ensure_group(
        &mut self,
        path: &GroupPath,
    ) -> Result<(&mut Group, bool), StoreError> {
        let mut current = self;
        let mut created = false;
        for (depth, segment) in path.segments().iter().enumerate() {
            if !current.children.contains_key(segment) {
                current
                    .children
                    .insert(segment.clone(), Node::Group(Group::new()));
                created = true;
            }
            current = match current.children.get_mut(segment) {
                Some(Node::Group(group)) => group,
                _ => {
                    return Err(StoreError::Io(format!(
                        "cannot create group '{}': name is taken by a dataset",
                        path.prefix(depth + 1)
                    )))
                }
            };
        }
        Ok((current, created))
    }

    /// Inserts a dataset, replacing any dataset of the same name.
    ///
    /// # Returns
    /// The replaced dataset, if any. A child group of that name is a
    /// collision and fails with `Io`.
    pub(crate) fn insert_dataset(
        &mut self,
        name: &str,
        dataset: StoredDataset,
    ) -> Result<Option<StoredDataset>, StoreError> {
        if let Some(Node::Group(_)) = self.children.get(name) {
            return Err(StoreError::Io(format!(
                "cannot write dataset '{}': name is taken by a group",
                name
            )));
        }
        match self.children.insert(name.to_string(), Node::Dataset(dataset)) {
            Some(Node::Dataset(previous)) => Ok(Some(previous)),
            _ => Ok(None),
        }
    }
}
