//! Interaction log: the append-only CSV record of every coached answer.
//!
//! CRITICAL: append-only. There is no update or delete; every append rewrites
//! the whole file so durable storage always mirrors the in-memory sequence.

use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::record::InterviewRecord;

/// Fixed column order of the log file.
pub const HEADER: [&str; 7] = [
    "timestamp",
    "role",
    "question",
    "answer",
    "feedback",
    "score",
    "category",
];

#[derive(Debug, Error)]
pub enum LogStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed log data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unexpected log header: expected '{expected}', found '{found}'")]
    Header { expected: String, found: String },

    #[error("Persistence disabled for this session: {reason}")]
    SessionOnly { reason: String },
}

/// Whether appends reach the durable file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Persistence {
    Durable,
    /// The file could not be loaded; it is left untouched and records stay in memory.
    SessionOnly { reason: String },
}

/// Session context: the ordered records plus the durable-storage handle.
#[derive(Debug)]
pub struct InteractionLog {
    path: PathBuf,
    records: Vec<InterviewRecord>,
    persistence: Persistence,
}

impl InteractionLog {
    /// Reads the log at `path`. A missing file yields an empty log; any malformed
    /// row fails the whole load rather than being skipped.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, LogStoreError> {
        let path = path.into();
        let records = read_records(&path)?;
        info!(
            "Loaded {} interview record(s) from {}",
            records.len(),
            path.display()
        );
        Ok(Self {
            path,
            records,
            persistence: Persistence::Durable,
        })
    }

    /// An empty in-memory log that never writes to `path`.
    pub fn session_only(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
            persistence: Persistence::SessionOnly {
                reason: reason.into(),
            },
        }
    }

    /// Adds `record` to the session, then rewrites the durable file.
    /// On error the record is still kept in memory.
    pub fn append(&mut self, record: InterviewRecord) -> Result<(), LogStoreError> {
        self.records.push(record);

        if let Persistence::SessionOnly { reason } = &self.persistence {
            return Err(LogStoreError::SessionOnly {
                reason: reason.clone(),
            });
        }

        let bytes = encode_records(&self.records)?;
        write_atomically(&self.path, &bytes).inspect_err(|e| {
            warn!("Failed to persist interview log: {e}");
        })
    }

    /// Serializes the in-memory session exactly as it is written to disk.
    pub fn export(&self) -> Result<Bytes, LogStoreError> {
        encode_records(&self.records).map(Bytes::from)
    }

    pub fn records(&self) -> &[InterviewRecord] {
        &self.records
    }

    /// The most recent `n` records, oldest first.
    pub fn tail(&self, n: usize) -> &[InterviewRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }
}

/// Reads every record from `path`; empty when the file does not exist.
pub fn read_records(path: &Path) -> Result<Vec<InterviewRecord>, LogStoreError> {
    match std::fs::read(path) {
        Ok(bytes) => decode_records(&bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(source) => Err(LogStoreError::Io {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Parses CSV bytes in the log schema. The header row is required.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<InterviewRecord>, LogStoreError> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.iter().ne(HEADER.iter().copied()) {
        return Err(LogStoreError::Header {
            expected: HEADER.join(","),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    reader
        .deserialize::<InterviewRecord>()
        .map(|row| row.map_err(LogStoreError::from))
        .collect()
}

/// Writes the header row (always, even for an empty log) followed by one row per record.
pub fn encode_records(records: &[InterviewRecord]) -> Result<Vec<u8>, LogStoreError> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| LogStoreError::from(csv::Error::from(e.into_error())))
}

/// Replaces `path` via a temp file in the same directory and a rename.
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), LogStoreError> {
    let io_err = |source: std::io::Error| LogStoreError::Io {
        path: path.display().to_string(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
