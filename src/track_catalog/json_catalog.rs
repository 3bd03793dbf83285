//! Track catalog kept as a single JSON document.
//!
//! Every append reads the whole document and writes it back. The rewrite goes
//! through a temporary file in the same directory followed by a rename, so a
//! crash mid-write leaves the previous document intact.

use super::{TrackCatalogStore, TrackRecord};
use anyhow::{Context, Result};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

pub struct JsonTrackCatalog {
    document_path: PathBuf,
    write_lock: Mutex<()>,
}

enum DocumentState {
    Missing,
    Loaded(Vec<TrackRecord>),
}

impl JsonTrackCatalog {
    pub fn new<P: Into<PathBuf>>(document_path: P) -> Self {
        JsonTrackCatalog {
            document_path: document_path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    fn read_document(&self) -> Result<DocumentState> {
        let content = match std::fs::read_to_string(&self.document_path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(DocumentState::Missing),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read track catalog {:?}", self.document_path)
                })
            }
        };
        let records = serde_json::from_str(&content).with_context(|| {
            format!("Malformed track catalog document {:?}", self.document_path)
        })?;
        Ok(DocumentState::Loaded(records))
    }

    fn write_document(&self, records: &[TrackRecord]) -> Result<()> {
        let dir = match self.document_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create catalog directory {:?}", dir))?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, records)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.document_path).with_context(|| {
            format!("Failed to replace track catalog {:?}", self.document_path)
        })?;
        Ok(())
    }
}

impl TrackCatalogStore for JsonTrackCatalog {
    /// Read failures are masked: a missing or malformed document lists as
    /// an empty catalog.
    fn list_tracks(&self) -> Result<Vec<TrackRecord>> {
        match self.read_document() {
            Ok(DocumentState::Loaded(records)) => Ok(records),
            Ok(DocumentState::Missing) => {
                warn!(
                    "Track catalog {:?} not found, listing no tracks",
                    self.document_path
                );
                Ok(Vec::new())
            }
            Err(err) => {
                warn!("{:#}, listing no tracks", err);
                Ok(Vec::new())
            }
        }
    }

    /// A missing document starts a new catalog; a malformed one is left
    /// untouched and the append fails.
    fn append_track(&self, record: TrackRecord) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut records = match self.read_document()? {
            DocumentState::Loaded(records) => records,
            DocumentState::Missing => Vec::new(),
        };
        debug!(
            "Appending {:?} to track catalog with {} records",
            record.path,
            records.len()
        );
        records.push(record);
        self.write_document(&records)
    }
}
