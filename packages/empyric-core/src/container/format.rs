//! On-disk container image: fixed header followed by the bincode tree.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::io_utils::classify_io_error;

use super::node::Group;

/// Magic number for container files: "EMPYRIC" in ASCII
const CONTAINER_MAGIC: [u8; 8] = *b"EMPYRIC\x00";
/// Current container format version
const CONTAINER_VERSION: u32 = 1;
/// Serialized header size: 8+4+4+4+8 bytes
pub(crate) const HEADER_LEN: usize = 28;

/// Header at the start of a container file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContainerHeader {
    magic: [u8; 8],
    version: u32,
    flags: u32,
    checksum: u32, // CRC32 of the body
    reserved: [u8; 8],
}

impl ContainerHeader {
    fn new(checksum: u32) -> Self {
        Self {
            magic: CONTAINER_MAGIC,
            version: CONTAINER_VERSION,
            flags: 0,
            checksum,
            reserved: [0; 8],
        }
    }

    /// Validates the header's magic and version.
    fn validate(&self) -> Result<(), StoreError> {
        if self.magic != CONTAINER_MAGIC {
            return Err(StoreError::Corrupted("invalid container magic".into()));
        }
        if self.version != CONTAINER_VERSION {
            return Err(StoreError::Corrupted(format!(
                "unsupported container version {}",
                self.version
            )));
        }
        Ok(())
    }
}

/// Serializes a container tree into file bytes.
pub(crate) fn encode_image(root: &Group) -> Result<Vec<u8>, StoreError> {
    let body = bincode::serialize(root)?;
    let header = ContainerHeader::new(crc32fast::hash(&body));
    let mut bytes = bincode::serialize(&header)?;
    debug_assert_eq!(bytes.len(), HEADER_LEN);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Parses file bytes into a container tree.
pub(crate) fn decode_image(bytes: &[u8]) -> Result<Group, StoreError> {
    if bytes.len() < HEADER_LEN {
        return Err(StoreError::Corrupted(format!(
            "file is {} bytes, shorter than the {}-byte header",
            bytes.len(),
            HEADER_LEN
        )));
    }
    let (header_bytes, body) = bytes.split_at(HEADER_LEN);
    let header: ContainerHeader = bincode::deserialize(header_bytes)?;
    header.validate()?;

    let computed = crc32fast::hash(body);
    if computed != header.checksum {
        return Err(StoreError::Corrupted("container checksum mismatch".into()));
    }
    bincode::deserialize(body).map_err(|e| StoreError::Corrupted(e.to_string()))
}

/// Reads a container file.
pub(crate) fn read_container(path: &Path) -> Result<Group, StoreError> {
    let bytes = fs::read(path).map_err(|e| {
        classify_io_error(e, &format!("Failed to read container {}", path.display()))
    })?;
    decode_image(&bytes)
}

/// Writes a container file atomically: temp file, optional fsync, rename.
pub(crate) fn write_container(path: &Path, root: &Group, sync: bool) -> Result<(), StoreError> {
    let bytes = encode_image(root)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| classify_io_error(e, "Failed to create container directory"))?;
    }

    let temp_path = temp_path_for(path);
    let mut file = File::create(&temp_path)
        .map_err(|e| classify_io_error(e, "Failed to create temp file"))?;
    file.write_all(&bytes)
        .map_err(|e| classify_io_error(e, "Failed to write container"))?;
    if sync {
        file.sync_all()
            .map_err(|e| classify_io_error(e, "Failed to sync container"))?;
    }
    drop(file);

    // Atomic rename
    fs::rename(&temp_path, path)
        .map_err(|e| classify_io_error(e, "Failed to rename container file"))?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "container committed");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
