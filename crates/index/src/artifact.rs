//! Persisted index artifacts.
//!
//! An index is a rebuildable artifact, stored separately from the record
//! log. Layout mirrors the log's framing:
//!
//! ```text
//! magic (4) | format version (2) | reserved (2)
//! payload len (4) | crc32 of payload (4) | payload (msgpack IvfIndex)
//! ```
//!
//! The artifact is written to a temporary file and renamed into place, so a
//! crash mid-save leaves the previous artifact intact.

use crate::ivf::IvfIndex;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use corpus_core::{Error, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::info;

/// Magic bytes identifying a corpusdb index artifact.
pub const ARTIFACT_MAGIC: [u8; 4] = *b"CVIA";

/// On-disk format version.
pub const ARTIFACT_FORMAT_VERSION: u16 = 1;

/// Write an index artifact to `path`, replacing any previous artifact.
pub fn save_artifact(index: &IvfIndex, path: &Path) -> Result<()> {
    let payload = rmp_serde::to_vec(index)?;

    let tmp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(&ARTIFACT_MAGIC)?;
        file.write_u16::<LittleEndian>(ARTIFACT_FORMAT_VERSION)?;
        file.write_u16::<LittleEndian>(0)?; // reserved
        file.write_u32::<LittleEndian>(payload.len() as u32)?;
        file.write_u32::<LittleEndian>(crc32fast::hash(&payload))?;
        file.write_all(&payload)?;
        file.sync_data()?;
    }
    std::fs::rename(&tmp_path, path)?;

    info!(
        path = %path.display(),
        num_partitions = index.num_partitions(),
        built_at = index.built_at(),
        "saved index artifact"
    );
    Ok(())
}

/// Load an index artifact from `path`.
///
/// # Errors
///
/// `Io` if the file cannot be read; `Corruption` if the magic, format
/// version, checksum, or payload fails validation.
pub fn load_artifact(path: &Path) -> Result<IvfIndex> {
    let mut file = File::open(path)?;

    let mut magic = [0u8; 4];
    file.read_exact(&mut magic)
        .map_err(|_| Error::Corruption("index artifact header is truncated".into()))?;
    if magic != ARTIFACT_MAGIC {
        return Err(Error::Corruption(format!(
            "bad index artifact magic: {:02x?}",
            magic
        )));
    }

    let version = file.read_u16::<LittleEndian>()?;
    if version != ARTIFACT_FORMAT_VERSION {
        return Err(Error::Corruption(format!(
            "unsupported index artifact format version {version}"
        )));
    }
    let _reserved = file.read_u16::<LittleEndian>()?;

    let len = file.read_u32::<LittleEndian>()? as usize;
    let crc = file.read_u32::<LittleEndian>()?;
    let mut payload = vec![0u8; len];
    file.read_exact(&mut payload)
        .map_err(|_| Error::Corruption("index artifact payload is truncated".into()))?;
    if crc32fast::hash(&payload) != crc {
        return Err(Error::Corruption("index artifact failed checksum".into()));
    }

    let index: IvfIndex = rmp_serde::from_slice(&payload)
        .map_err(|e| Error::Corruption(format!("index artifact payload: {e}")))?;
    info!(
        path = %path.display(),
        num_partitions = index.num_partitions(),
        built_at = index.built_at(),
        "loaded index artifact"
    );
    Ok(index)
}
