//! Append-only record log.
//!
//! On-disk layout:
//!
//! ```text
//! header:  magic (4) | format version (2) | metric (1) | reserved (1) | dimension (4)
//! frames:  payload len (4) | crc32 of payload (4) | payload (msgpack Vec<VectorRecord>)
//! ```
//!
//! One frame per committed writeset, so a batch is all-or-nothing across a
//! crash as well as across readers. Replay truncates a torn trailing frame;
//! a complete frame that fails its checksum is corruption, not a torn tail.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use corpus_core::{DistanceMetric, Error, Result, StoreConfig, VectorRecord};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Magic bytes identifying a corpusdb record log.
pub const LOG_MAGIC: [u8; 4] = *b"CVRL";

/// On-disk format version.
pub const LOG_FORMAT_VERSION: u16 = 1;

/// Header size in bytes.
pub const LOG_HEADER_SIZE: u64 = 12;

/// Upper bound on a single frame payload. A length field above this is
/// treated as corruption rather than an allocation request.
const MAX_FRAME_LEN: u32 = 256 * 1024 * 1024;

/// Append-only log of committed writesets.
pub struct RecordLog {
    file: File,
    path: PathBuf,
}

/// Result of opening a log: the handle, the replayed records, and the number
/// of committed frames (the store's write version after recovery).
pub struct LogReplay {
    /// Open log positioned at its end
    pub log: RecordLog,
    /// Records recovered from committed frames, in append order
    pub records: Vec<VectorRecord>,
    /// Number of committed frames
    pub frames: u64,
}

impl RecordLog {
    /// Create a log or open an existing one, replaying its contents.
    ///
    /// Creation is idempotent: opening an existing log whose header matches
    /// `config` replays it; a header with a different dimension or metric
    /// fails with `SchemaConflict`.
    pub fn open(path: &Path, config: StoreConfig) -> Result<LogReplay> {
        let exists = path.exists();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;

        if !exists || file.metadata()?.len() == 0 {
            write_header(&mut file, config)?;
            file.sync_data()?;
            info!(path = %path.display(), "created record log");
            return Ok(LogReplay {
                log: RecordLog {
                    file,
                    path: path.to_path_buf(),
                },
                records: Vec::new(),
                frames: 0,
            });
        }

        let existing = read_header(&mut file)?;
        if existing != config {
            return Err(Error::SchemaConflict {
                existing: existing.describe(),
                requested: config.describe(),
            });
        }

        let (records, frames, end) = replay(&mut file)?;
        let file_len = file.metadata()?.len();
        if end < file_len {
            warn!(
                path = %path.display(),
                kept = end,
                dropped = file_len - end,
                "truncating torn frame at log tail"
            );
            file.set_len(end)?;
            file.sync_data()?;
        }
        file.seek(SeekFrom::End(0))?;

        info!(
            path = %path.display(),
            records = records.len(),
            frames,
            "replayed record log"
        );

        Ok(LogReplay {
            log: RecordLog {
                file,
                path: path.to_path_buf(),
            },
            records,
            frames,
        })
    }

    /// Append one committed writeset as a single frame and sync it.
    ///
    /// Returns only after the frame is durable; the caller applies the
    /// records to the in-memory table afterwards.
    pub fn append(&mut self, records: &[VectorRecord]) -> Result<()> {
        let payload = rmp_serde::to_vec(records)?;
        let crc = crc32fast::hash(&payload);

        let mut frame = Vec::with_capacity(8 + payload.len());
        frame.write_u32::<LittleEndian>(payload.len() as u32)?;
        frame.write_u32::<LittleEndian>(crc)?;
        frame.extend_from_slice(&payload);

        self.file.write_all(&frame)?;
        self.file.sync_data()?;
        debug!(records = records.len(), bytes = frame.len(), "appended writeset frame");
        Ok(())
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_header(file: &mut File, config: StoreConfig) -> Result<()> {
    file.seek(SeekFrom::Start(0))?;
    file.write_all(&LOG_MAGIC)?;
    file.write_u16::<LittleEndian>(LOG_FORMAT_VERSION)?;
    file.write_u8(config.metric.to_byte())?;
    file.write_u8(0)?; // reserved
    file.write_u32::<LittleEndian>(config.dimension as u32)?;
    Ok(())
}

fn read_header(file: &mut File) -> Result<StoreConfig> {
    file.seek(SeekFrom::Start(0))?;

    let mut magic = [0u8; 4];
    file.read_exact(&mut magic)
        .map_err(|_| Error::Corruption("record log header is truncated".into()))?;
    if magic != LOG_MAGIC {
        return Err(Error::Corruption(format!(
            "bad record log magic: {:02x?}",
            magic
        )));
    }

    let version = file.read_u16::<LittleEndian>()?;
    if version != LOG_FORMAT_VERSION {
        return Err(Error::Corruption(format!(
            "unsupported record log format version {version}"
        )));
    }

    let metric_byte = file.read_u8()?;
    let metric = DistanceMetric::from_byte(metric_byte).ok_or_else(|| {
        Error::Corruption(format!("unknown distance metric byte {metric_byte}"))
    })?;
    let _reserved = file.read_u8()?;
    let dimension = file.read_u32::<LittleEndian>()? as usize;

    StoreConfig::new(dimension, metric)
        .map_err(|_| Error::Corruption("record log header has zero dimension".into()))
}

/// Replay all complete frames. Returns the recovered records, the frame
/// count, and the offset of the first incomplete byte (the valid end).
fn replay(file: &mut File) -> Result<(Vec<VectorRecord>, u64, u64)> {
    let file_len = file.metadata()?.len();
    let mut records = Vec::new();
    let mut frames = 0u64;
    let mut offset = LOG_HEADER_SIZE;
    file.seek(SeekFrom::Start(offset))?;

    loop {
        if offset + 8 > file_len {
            break; // torn or absent frame header
        }
        let len = file.read_u32::<LittleEndian>()?;
        let crc = file.read_u32::<LittleEndian>()?;
        if len > MAX_FRAME_LEN {
            return Err(Error::Corruption(format!(
                "frame at offset {offset} declares {len} bytes"
            )));
        }
        if offset + 8 + len as u64 > file_len {
            break; // torn payload
        }

        let mut payload = vec![0u8; len as usize];
        file.read_exact(&mut payload)?;
        if crc32fast::hash(&payload) != crc {
            return Err(Error::Corruption(format!(
                "frame at offset {offset} failed checksum"
            )));
        }

        let batch: Vec<VectorRecord> = rmp_serde::from_slice(&payload)
            .map_err(|e| Error::Corruption(format!("frame at offset {offset}: {e}")))?;
        records.extend(batch);
        frames += 1;
        offset += 8 + len as u64;
    }

    Ok((records, frames, offset))
}
