use std::path::Path;
use tokio::fs;

const TRACK_FILE_PREFIX: &str = "track";

pub fn track_file_name(index: u64, extension: &str) -> String {
    format!("{}{}.{}", TRACK_FILE_PREFIX, index, extension)
}

/// Parses the index out of a `track<N>.<ext>` file name.
fn parse_track_index(file_name: &str) -> Option<u64> {
    let rest = file_name.strip_prefix(TRACK_FILE_PREFIX)?;
    let digits = match rest.find('.') {
        Some(dot) => &rest[..dot],
        None => rest,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// One past the highest `track<N>` index present in `dir`, or 0.
///
/// Unlike the number of files in the directory this never goes backwards
/// when files are deleted.
pub async fn next_track_index(dir: &Path) -> std::io::Result<u64> {
    let mut next = 0;
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        if let Some(index) = entry.file_name().to_str().and_then(parse_track_index) {
            next = next.max(index.saturating_add(1));
        }
    }
    Ok(next)
}

/// One past the highest `track<N>` index referenced by `paths`, or 0.
///
/// Paths are catalog paths such as `uploads/track3.mp3`; only the last
/// component is looked at.
pub fn next_track_index_in_paths<'a>(paths: impl IntoIterator<Item = &'a str>) -> u64 {
    paths
        .into_iter()
        .filter_map(|path| parse_track_index(path.rsplit('/').next().unwrap_or(path)))
        .map(|index| index.saturating_add(1))
        .max()
        .unwrap_or(0)
}
