mod schema;
mod sqlite_favorites_store;

pub use schema::FAVORITES_TABLE_V1;
pub use sqlite_favorites_store::SqliteFavoritesStore;

use anyhow::Result;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FavoriteEntry {
    pub id: i64,
    pub title: String,
    pub artist: String,
}

pub trait FavoritesStore: Send + Sync {
    /// Inserts a new favorite and returns it with its store-assigned id.
    /// Fails with a `ValidationError` if title or artist is blank.
    fn add_favorite(&self, title: &str, artist: &str) -> Result<FavoriteEntry>;

    /// Returns all favorites in storage order.
    fn list_favorites(&self) -> Result<Vec<FavoriteEntry>>;

    /// Returns the favorite with the given id, if any.
    fn get_favorite(&self, id: i64) -> Result<Option<FavoriteEntry>>;

    /// Deletes the favorite with the given id.
    /// Returns false, without error, if no such favorite exists.
    fn remove_favorite(&self, id: i64) -> Result<bool>;

    fn count_favorites(&self) -> Result<usize>;
}
