use super::{JsonTrackCatalog, SqliteTrackCatalog, TrackCatalogStore};
use anyhow::Result;
use tracing::info;

/// Copies the records of a legacy JSON catalog into an empty SQLite catalog.
///
/// Does nothing when the SQLite catalog already has tracks or the legacy
/// document is missing. Returns the number of imported records.
pub fn import_legacy_catalog(
    legacy: &JsonTrackCatalog,
    target: &SqliteTrackCatalog,
) -> Result<usize> {
    if !legacy.document_path().exists() {
        return Ok(0);
    }
    if target.count_tracks()? > 0 {
        info!(
            "Track catalog already populated, skipping import of {:?}",
            legacy.document_path()
        );
        return Ok(0);
    }

    let records = legacy.list_tracks()?;
    let imported = target.append_tracks(&records)?;
    info!(
        "Imported {} of {} tracks from legacy catalog {:?}",
        imported,
        records.len(),
        legacy.document_path()
    );
    Ok(imported)
}
