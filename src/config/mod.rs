mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use crate::track_catalog::CatalogBackend;
use crate::upload::UPLOADS_DIR_NAME;
use anyhow::{anyhow, bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_MAX_UPLOAD_SIZE_MB: u64 = 50;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub media_path: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub max_upload_size_mb: Option<u64>,
    pub static_dir_path: Option<String>,
    pub catalog_backend: CatalogBackend,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub media_path: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub max_upload_size_mb: u64,
    pub static_dir_path: Option<String>,
    pub catalog_backend: CatalogBackend,
    pub import_legacy_catalog: bool,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| anyhow!("db_dir must be specified via --db-dir or in config file"))?;

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let media_path = file
            .media_path
            .map(PathBuf::from)
            .or_else(|| cli.media_path.clone())
            .unwrap_or_else(|| db_dir.clone());

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let max_upload_size_mb = file
            .max_upload_size_mb
            .or(cli.max_upload_size_mb)
            .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_MB);
        if max_upload_size_mb == 0 {
            bail!("max_upload_size_mb must be greater than zero");
        }
        if megabytes_to_bytes(max_upload_size_mb).is_none() {
            bail!("max_upload_size_mb is too large: {}", max_upload_size_mb);
        }

        let static_dir_path = file
            .static_dir_path
            .or_else(|| cli.static_dir_path.clone());

        let catalog_backend = match file.catalog_backend {
            Some(value) => CatalogBackend::from_str(&value, true)
                .map_err(|_| anyhow!("Unknown catalog_backend {:?}", value))?,
            None => cli.catalog_backend,
        };

        Ok(Self {
            db_dir,
            media_path,
            port,
            logging_level,
            max_upload_size_mb,
            static_dir_path,
            catalog_backend,
            import_legacy_catalog: file.import_legacy_catalog.unwrap_or(true),
        })
    }

    pub fn library_db_path(&self) -> PathBuf {
        self.db_dir.join("library.db")
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.media_path.join(UPLOADS_DIR_NAME)
    }

    pub fn legacy_catalog_path(&self) -> PathBuf {
        self.media_path.join("tracks.json")
    }

    /// Checked in `resolve`, so this saturates only for hand-built configs.
    pub fn max_upload_size_bytes(&self) -> u64 {
        megabytes_to_bytes(self.max_upload_size_mb).unwrap_or(u64::MAX)
    }
}

fn megabytes_to_bytes(megabytes: u64) -> Option<u64> {
    megabytes.checked_mul(1024 * 1024)
}

/// Parses a logging level string into RequestsLoggingLevel.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
