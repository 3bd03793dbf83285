//! Audio uploads: validation, file naming and cataloging.

mod file_naming;

pub use file_naming::{next_track_index, next_track_index_in_paths, track_file_name};

use crate::error::non_blank;
use crate::track_catalog::{TrackCatalogStore, TrackRecord};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Audio extensions accepted for upload, lowercase and without the dot.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["mp3", "wav"];

/// Name of the uploads directory inside the media directory.
pub const UPLOADS_DIR_NAME: &str = "uploads";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file part")]
    MissingFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("Invalid file type: {0:?}. Only MP3 and WAV files are allowed.")]
    InvalidFileType(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("File too large: {0} bytes (max: {1})")]
    FileTooLarge(u64, u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Catalog(#[from] anyhow::Error),
}

impl UploadError {
    /// True for errors caused by the submitted request rather than the server.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, UploadError::Io(_) | UploadError::Catalog(_))
    }
}

/// A file part as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

pub struct UploadHandler {
    media_dir: PathBuf,
    max_file_size: u64,
    catalog: Arc<dyn TrackCatalogStore>,
    allocation_lock: Mutex<()>,
}

impl UploadHandler {
    pub fn new(
        media_dir: impl Into<PathBuf>,
        max_file_size: u64,
        catalog: Arc<dyn TrackCatalogStore>,
    ) -> Self {
        UploadHandler {
            media_dir: media_dir.into(),
            max_file_size,
            catalog,
            allocation_lock: Mutex::new(()),
        }
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.media_dir.join(UPLOADS_DIR_NAME)
    }

    /// Creates the uploads directory if needed.
    pub async fn init(&self) -> Result<(), UploadError> {
        fs::create_dir_all(self.uploads_dir()).await?;
        Ok(())
    }

    /// Validates the upload, stores the file under a fresh `track<N>.<ext>`
    /// name and appends it to the catalog.
    pub async fn handle_upload(
        &self,
        file: Option<UploadedFile>,
        title: Option<&str>,
        artist: Option<&str>,
    ) -> Result<TrackRecord, UploadError> {
        let file = file.ok_or(UploadError::MissingFile)?;
        if file.filename.trim().is_empty() {
            return Err(UploadError::EmptyFilename);
        }
        let extension = accepted_extension(&file.filename)
            .ok_or_else(|| UploadError::InvalidFileType(file.filename.clone()))?;
        let title = non_blank(title).ok_or(UploadError::MissingField("title"))?;
        let artist = non_blank(artist).ok_or(UploadError::MissingField("artist"))?;

        let size = file.data.len() as u64;
        if size > self.max_file_size {
            return Err(UploadError::FileTooLarge(size, self.max_file_size));
        }

        // Held until the record is cataloged so no two uploads pick the same index
        let _guard = self.allocation_lock.lock().await;
        let file_name = self.store_file(&extension, &file.data).await?;
        let record = TrackRecord {
            title: title.to_string(),
            artist: artist.to_string(),
            path: format!("{}/{}", UPLOADS_DIR_NAME, file_name),
        };

        if let Err(err) = self.catalog.append_track(record.clone()) {
            warn!("Cataloging {} failed, removing the file", file_name);
            if let Err(rm_err) = fs::remove_file(self.uploads_dir().join(&file_name)).await {
                warn!("Failed to remove {}: {}", file_name, rm_err);
            }
            return Err(err.into());
        }

        info!(
            "Stored upload {:?} as {} ({} bytes)",
            file.filename, record.path, size
        );
        Ok(record)
    }

    /// Writes `data` to a file name that neither an existing file nor a
    /// catalog record uses and returns it. Callers hold `allocation_lock`.
    async fn store_file(&self, extension: &str, data: &[u8]) -> Result<String, UploadError> {
        let uploads_dir = self.uploads_dir();

        fs::create_dir_all(&uploads_dir).await?;
        let on_disk = next_track_index(&uploads_dir).await?;
        let tracks = self.catalog.list_tracks()?;
        let in_catalog = next_track_index_in_paths(tracks.iter().map(|t| t.path.as_str()));
        let mut index = on_disk.max(in_catalog);
        let (file_name, mut out) = loop {
            let file_name = track_file_name(index, extension);
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(uploads_dir.join(&file_name))
                .await
            {
                Ok(out) => break (file_name, out),
                Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                    debug!("{} already exists, trying the next index", file_name);
                    index = index.checked_add(1).ok_or_else(|| {
                        std::io::Error::new(ErrorKind::Other, "No free track index left")
                    })?;
                }
                Err(err) => return Err(err.into()),
            }
        };

        out.write_all(data).await?;
        out.flush().await?;
        Ok(file_name)
    }
}

/// Returns the lowercase extension of `filename` if it is accepted.
pub fn accepted_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .filter(|e| ACCEPTED_EXTENSIONS.contains(&e.as_str()))
}
