//! Tunebox Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod error;
pub mod favorites;
pub mod library_schema;
pub mod server;
pub mod sqlite_persistence;
pub mod track_catalog;
pub mod upload;

// Re-export commonly used types for convenience
pub use error::ValidationError;
pub use favorites::{FavoriteEntry, FavoritesStore, SqliteFavoritesStore};
pub use server::{run_server, RequestsLoggingLevel};
pub use track_catalog::{
    CatalogBackend, JsonTrackCatalog, SqliteTrackCatalog, TrackCatalogStore, TrackRecord,
};
pub use upload::{UploadError, UploadHandler};
