use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Import modules from the library crate
use tunebox_server::config;
use tunebox_server::server::{run_server, RequestsLoggingLevel, ServerConfig};
use tunebox_server::track_catalog::{
    import_legacy_catalog, CatalogBackend, JsonTrackCatalog, SqliteTrackCatalog,
    TrackCatalogStore,
};
use tunebox_server::{SqliteFavoritesStore, UploadHandler};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

fn parse_dir(s: &str) -> Result<PathBuf, String> {
    let path = parse_path(s)?;
    if !path.exists() {
        return Err(format!("Directory does not exist: {}", s));
    }
    if !path.is_dir() {
        return Err(format!("Path is not a directory: {}", s));
    }
    Ok(path)
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory holding library.db. Can also be specified in config file.
    #[clap(long, value_parser = parse_dir)]
    pub db_dir: Option<PathBuf>,

    /// Directory for uploaded audio and the legacy tracks.json. Defaults to db_dir.
    #[clap(long, value_parser = parse_path)]
    pub media_path: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Largest accepted audio upload, in megabytes.
    #[clap(long)]
    pub max_upload_size_mb: Option<u64>,

    /// Directory of static assets served under /static.
    #[clap(long)]
    pub static_dir_path: Option<String>,

    /// Where the track catalog is stored.
    #[clap(long, value_enum, default_value_t = CatalogBackend::Sqlite)]
    pub catalog_backend: CatalogBackend,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            db_dir: args.db_dir.clone(),
            media_path: args.media_path.clone(),
            port: args.port,
            logging_level: args.logging_level.clone(),
            max_upload_size_mb: args.max_upload_size_mb,
            static_dir_path: args.static_dir_path.clone(),
            catalog_backend: args.catalog_backend,
        }
    }
}

fn open_track_catalog(app_config: &config::AppConfig) -> Result<Arc<dyn TrackCatalogStore>> {
    let legacy = JsonTrackCatalog::new(app_config.legacy_catalog_path());
    match app_config.catalog_backend {
        CatalogBackend::Json => {
            info!("Using JSON track catalog at {:?}", legacy.document_path());
            Ok(Arc::new(legacy))
        }
        CatalogBackend::Sqlite => {
            let catalog = SqliteTrackCatalog::new(app_config.library_db_path())?;
            if app_config.import_legacy_catalog {
                import_legacy_catalog(&legacy, &catalog)
                    .context("Failed to import legacy track catalog")?;
            }
            Ok(Arc::new(catalog))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  db_dir: {:?}", app_config.db_dir);
    info!("  media_path: {:?}", app_config.media_path);
    info!("  port: {}", app_config.port);
    info!("  catalog_backend: {}", app_config.catalog_backend);

    if !app_config.library_db_path().exists() {
        info!(
            "Creating new library database at {:?}",
            app_config.library_db_path()
        );
    }
    let favorites_store = Arc::new(SqliteFavoritesStore::new(app_config.library_db_path())?);
    let track_catalog = open_track_catalog(&app_config)?;

    let upload_handler = Arc::new(UploadHandler::new(
        &app_config.media_path,
        app_config.max_upload_size_bytes(),
        track_catalog.clone(),
    ));
    upload_handler
        .init()
        .await
        .with_context(|| format!("Failed to create {:?}", app_config.uploads_dir()))?;

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level.clone(),
        port: app_config.port,
        max_upload_size: app_config.max_upload_size_bytes(),
        uploads_dir: app_config.uploads_dir(),
        static_dir_path: app_config.static_dir_path.clone(),
    };

    info!("Ready to serve at port {}!", app_config.port);
    run_server(server_config, favorites_store, track_catalog, upload_handler).await
}
