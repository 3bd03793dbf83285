use super::RequestsLoggingLevel;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    /// Largest accepted request body for uploads, in bytes.
    pub max_upload_size: u64,
    pub uploads_dir: PathBuf,
    pub static_dir_path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 3001,
            max_upload_size: 50 * 1024 * 1024,
            uploads_dir: PathBuf::from("uploads"),
            static_dir_path: None,
        }
    }
}
