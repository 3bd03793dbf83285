//! Shared constants for end-to-end tests
//!
//! When test data changes, update only this file.

// ============================================================================
// Test Tracks
// ============================================================================

pub const TRACK_1_TITLE: &str = "Opening Track";
pub const TRACK_1_ARTIST: &str = "The Test Band";

pub const TRACK_2_TITLE: &str = "Smooth Jazz";
pub const TRACK_2_ARTIST: &str = "Jazz Ensemble";

/// Payload used for uploaded audio files. Content is never decoded.
pub const TEST_AUDIO_BYTES: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt fake audio payload";

// ============================================================================
// Server Settings
// ============================================================================

/// Upload limit configured on test servers
pub const TEST_MAX_UPLOAD_SIZE: u64 = 64 * 1024;

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

pub const REQUEST_TIMEOUT_SECS: u64 = 10;

pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
