use super::{FavoriteEntry, FavoritesStore};
use crate::error::{non_blank, ValidationError};
use crate::library_schema::LIBRARY_VERSIONED_SCHEMAS;
use crate::sqlite_persistence::open_versioned_db;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

pub struct SqliteFavoritesStore {
    conn: Mutex<Connection>,
}

impl SqliteFavoritesStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = open_versioned_db(db_path, LIBRARY_VERSIONED_SCHEMAS)?;
        Ok(SqliteFavoritesStore {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<FavoriteEntry> {
        Ok(FavoriteEntry {
            id: row.get("id")?,
            title: row.get("title")?,
            artist: row.get("artist")?,
        })
    }
}

impl FavoritesStore for SqliteFavoritesStore {
    fn add_favorite(&self, title: &str, artist: &str) -> Result<FavoriteEntry> {
        let (title, artist) = match (non_blank(Some(title)), non_blank(Some(artist))) {
            (Some(title), Some(artist)) => (title, artist),
            _ => return Err(ValidationError::MissingTitleOrArtist.into()),
        };

        let conn = self.lock();
        conn.execute(
            "INSERT INTO favorites (title, artist) VALUES (?1, ?2)",
            params![title, artist],
        )
        .with_context(|| format!("Failed to add favorite {} - {}", title, artist))?;
        let id = conn.last_insert_rowid();
        debug!("Added favorite {}: {} - {}", id, title, artist);

        Ok(FavoriteEntry {
            id,
            title: title.to_string(),
            artist: artist.to_string(),
        })
    }

    fn list_favorites(&self) -> Result<Vec<FavoriteEntry>> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT id, title, artist FROM favorites ORDER BY id")?;
        let entries = stmt
            .query_map([], Self::row_to_entry)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list favorites")?;
        Ok(entries)
    }

    fn get_favorite(&self, id: i64) -> Result<Option<FavoriteEntry>> {
        let conn = self.lock();
        conn.query_row(
            "SELECT id, title, artist FROM favorites WHERE id = ?1",
            params![id],
            Self::row_to_entry,
        )
        .optional()
        .with_context(|| format!("Failed to read favorite {}", id))
    }

    fn remove_favorite(&self, id: i64) -> Result<bool> {
        let conn = self.lock();
        let deleted = conn
            .execute("DELETE FROM favorites WHERE id = ?1", params![id])
            .with_context(|| format!("Failed to remove favorite {}", id))?;
        debug!("Removed {} favorite(s) with id {}", deleted, id);
        Ok(deleted > 0)
    }

    fn count_favorites(&self) -> Result<usize> {
        let conn = self.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM favorites", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
