mod versioned_schema;

pub use versioned_schema::{
    Column, SqlType, Table, VersionedSchema, BASE_DB_VERSION, DEFAULT_TIMESTAMP,
};

use anyhow::{bail, Context, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use tracing::info;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens the database at `db_path`, creating it with the latest schema if it
/// does not exist, otherwise validating it and migrating it forward.
pub fn open_versioned_db<P: AsRef<Path>>(
    db_path: P,
    schemas: &'static [VersionedSchema],
) -> Result<Connection> {
    let path = db_path.as_ref();
    let latest = match schemas.last() {
        Some(schema) => schema,
        None => bail!("No schema versions defined"),
    };

    let is_new_db = !path.exists();
    let mut conn = Connection::open(path)
        .with_context(|| format!("Failed to open database at {:?}", path))?;
    conn.busy_timeout(BUSY_TIMEOUT)?;

    if is_new_db {
        info!("Creating new database at {:?}", path);
        latest.create(&conn)?;
        return Ok(conn);
    }

    let raw_version: i64 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .context("Failed to read database version")?;
    let db_version = raw_version - BASE_DB_VERSION as i64;

    // A sibling store may have just created the file without tables yet.
    if raw_version == 0 {
        let table_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table'",
            [],
            |row| row.get(0),
        )?;
        if table_count == 0 {
            info!("Initializing empty database at {:?}", path);
            latest.create(&conn)?;
            return Ok(conn);
        }
    }

    let schema_index = schemas
        .iter()
        .position(|s| s.version as i64 == db_version)
        .with_context(|| format!("Unknown database version {} at {:?}", db_version, path))?;
    schemas[schema_index].validate(&conn).with_context(|| {
        format!(
            "Database schema validation failed for version {}",
            db_version
        )
    })?;

    if schema_index + 1 < schemas.len() {
        info!(
            "Migrating database {:?} from version {} to {}",
            path, db_version, latest.version
        );
        migrate(&mut conn, &schemas[schema_index + 1..])?;
    }

    Ok(conn)
}

fn migrate(conn: &mut Connection, pending: &[VersionedSchema]) -> Result<()> {
    let tx = conn.transaction()?;
    let mut reached = None;
    for schema in pending {
        if let Some(migration_fn) = schema.migration {
            migration_fn(&tx).with_context(|| {
                format!("Failed to run migration to version {}", schema.version)
            })?;
        }
        reached = Some(schema.version);
    }
    if let Some(version) = reached {
        tx.execute(
            &format!("PRAGMA user_version = {}", BASE_DB_VERSION + version),
            [],
        )?;
    }
    tx.commit()?;
    Ok(())
}
