use thiserror::Error;

/// A required input was absent or blank.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Both track title and artist name are required!")]
    MissingTitleOrArtist,

    #[error("Track ID is required!")]
    MissingTrackId,
}

/// Returns the trimmed value, or `None` if it is absent or blank.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
