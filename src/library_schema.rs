//! SQLite schema of the library database.
//!
//! Version 1 only held the favorites table; version 2 adds the indexed track
//! catalog that replaces the flat JSON document.

use crate::favorites::FAVORITES_TABLE_V1;
use crate::sqlite_persistence::VersionedSchema;
use crate::track_catalog::TRACKS_TABLE_V2;

fn migrate_v1_to_v2(conn: &rusqlite::Connection) -> anyhow::Result<()> {
    TRACKS_TABLE_V2.create(conn)
}

pub const LIBRARY_VERSIONED_SCHEMAS: &[VersionedSchema] = &[
    VersionedSchema {
        version: 1,
        tables: &[FAVORITES_TABLE_V1],
        migration: None,
    },
    VersionedSchema {
        version: 2,
        tables: &[FAVORITES_TABLE_V1, TRACKS_TABLE_V2],
        migration: Some(migrate_v1_to_v2),
    },
];
