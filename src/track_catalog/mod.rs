mod json_catalog;
mod legacy_import;
mod schema;
mod sqlite_catalog;

pub use json_catalog::JsonTrackCatalog;
pub use legacy_import::import_legacy_catalog;
pub use schema::TRACKS_TABLE_V2;
pub use sqlite_catalog::SqliteTrackCatalog;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A cataloged audio file. `path` is relative to the media directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub title: String,
    pub artist: String,
    pub path: String,
}

pub trait TrackCatalogStore: Send + Sync {
    /// Returns the whole catalog in insertion order.
    fn list_tracks(&self) -> Result<Vec<TrackRecord>>;

    /// Appends one record at the end of the catalog.
    fn append_track(&self, record: TrackRecord) -> Result<()>;

    fn count_tracks(&self) -> Result<usize> {
        Ok(self.list_tracks()?.len())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CatalogBackend {
    #[default]
    Sqlite,
    Json,
}

impl std::fmt::Display for CatalogBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogBackend::Sqlite => write!(f, "sqlite"),
            CatalogBackend::Json => write!(f, "json"),
        }
    }
}
