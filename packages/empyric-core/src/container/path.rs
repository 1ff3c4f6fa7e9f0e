//! Group path and node name parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

/// `/`-separated path to a group, relative to the container root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GroupPath {
    segments: Vec<String>,
}

impl GroupPath {
    /// The container root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses a group path.
    ///
    /// Leading and trailing slashes are ignored, so `""`, `"/"` and `"a/"`
    /// are accepted. Empty interior segments, `.` and `..` are rejected.
    pub fn parse(path: &str) -> Result<Self, StoreError> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let segments = trimmed
            .split('/')
            .map(|segment| validate_segment(segment, path).map(|()| segment.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path of a child named `name` under this group.
    pub fn child_path(&self, name: &str) -> String {
        if self.is_root() {
            name.to_string()
        } else {
            format!("{}/{}", self, name)
        }
    }

    /// Path made of the first `len` segments.
    pub(crate) fn prefix(&self, len: usize) -> String {
        self.segments[..len.min(self.segments.len())].join("/")
    }
}

impl fmt::Display for GroupPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str("/")
        } else {
            f.write_str(&self.segments.join("/"))
        }
    }
}

impl FromStr for GroupPath {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Validates a dataset name (a single path segment).
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    validate_segment(name, name)
}

/// Splits a full dataset path such as `geochem/basalts/samples` into
/// its group and dataset name.
pub fn split_dataset_path(path: &str) -> Result<(GroupPath, String), StoreError> {
    let trimmed = path.trim_matches('/');
    let (group, name) = match trimmed.rsplit_once('/') {
        Some((group, name)) => (group, name),
        None => ("", trimmed),
    };
    validate_name(name)?;
    Ok((GroupPath::parse(group)?, name.to_string()))
}

fn validate_segment(segment: &str, full_path: &str) -> Result<(), StoreError> {
    if segment.is_empty() {
        return Err(StoreError::InvalidPath(format!(
            "empty segment in '{}'",
            full_path
        )));
    }
    if segment == "." || segment == ".." {
        return Err(StoreError::InvalidPath(format!(
            "relative segment '{}' in '{}'",
            segment, full_path
        )));
    }
    if segment.contains('/') {
        return Err(StoreError::InvalidPath(format!(
            "name '{}' must not contain '/'",
            segment
        )));
    }
    Ok(())
}
