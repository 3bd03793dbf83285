use super::{TrackCatalogStore, TrackRecord};
use crate::library_schema::LIBRARY_VERSIONED_SCHEMAS;
use crate::sqlite_persistence::open_versioned_db;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Track catalog stored as rows of the library database. Appends are single
/// INSERTs, so concurrent uploads cannot drop each other's records.
pub struct SqliteTrackCatalog {
    conn: Mutex<Connection>,
}

impl SqliteTrackCatalog {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = open_versioned_db(db_path, LIBRARY_VERSIONED_SCHEMAS)?;
        Ok(SqliteTrackCatalog {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends all records in a single transaction.
    pub fn append_tracks(&self, records: &[TrackRecord]) -> Result<usize> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO tracks (title, artist, path) VALUES (?1, ?2, ?3)",
            )?;
            for record in records {
                inserted += stmt.execute(params![record.title, record.artist, record.path])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }
}

impl TrackCatalogStore for SqliteTrackCatalog {
    fn list_tracks(&self) -> Result<Vec<TrackRecord>> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT title, artist, path FROM tracks ORDER BY id")?;
        let tracks = stmt
            .query_map([], |row| {
                Ok(TrackRecord {
                    title: row.get(0)?,
                    artist: row.get(1)?,
                    path: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list tracks")?;
        Ok(tracks)
    }

    fn append_track(&self, record: TrackRecord) -> Result<()> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO tracks (title, artist, path) VALUES (?1, ?2, ?3)",
            params![record.title, record.artist, record.path],
        )
        .with_context(|| format!("Failed to append track {:?}", record.path))?;
        Ok(())
    }

    fn count_tracks(&self) -> Result<usize> {
        let conn = self.lock();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM tracks", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
