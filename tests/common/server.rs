//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own database and media dir.

use super::constants::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tunebox_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use tunebox_server::track_catalog::{
    CatalogBackend, JsonTrackCatalog, SqliteTrackCatalog, TrackCatalogStore,
};
use tunebox_server::{FavoritesStore, SqliteFavoritesStore, UploadHandler};

/// Test server instance with isolated storage
///
/// When dropped, the server shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Favorites store for direct database access in tests
    pub favorites: Arc<dyn FavoritesStore>,

    /// Track catalog the server appends uploads to
    pub catalog: Arc<dyn TrackCatalogStore>,

    media_dir: PathBuf,

    // Private fields - keep resources alive until drop
    _temp_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server backed by the SQLite track catalog on a random port
    pub async fn spawn() -> Self {
        Self::spawn_with_backend(CatalogBackend::Sqlite).await
    }

    /// Spawns a server on a random port
    ///
    /// # Panics
    ///
    /// Panics if storage setup, port binding or startup fails.
    pub async fn spawn_with_backend(backend: CatalogBackend) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("library.db");
        let media_dir = temp_dir.path().join("media");
        std::fs::create_dir_all(&media_dir).expect("Failed to create media dir");

        let favorites: Arc<dyn FavoritesStore> =
            Arc::new(SqliteFavoritesStore::new(&db_path).expect("Failed to open favorites store"));
        let catalog: Arc<dyn TrackCatalogStore> = match backend {
            CatalogBackend::Sqlite => Arc::new(
                SqliteTrackCatalog::new(&db_path).expect("Failed to open track catalog"),
            ),
            CatalogBackend::Json => Arc::new(JsonTrackCatalog::new(media_dir.join("tracks.json"))),
        };

        let upload_handler = Arc::new(UploadHandler::new(
            &media_dir,
            TEST_MAX_UPLOAD_SIZE,
            catalog.clone(),
        ));
        upload_handler
            .init()
            .await
            .expect("Failed to create uploads dir");

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            requests_logging_level: RequestsLoggingLevel::None,
            port,
            max_upload_size: TEST_MAX_UPLOAD_SIZE,
            uploads_dir: upload_handler.uploads_dir(),
            static_dir_path: None,
        };
        let app = make_app(config, favorites.clone(), catalog.clone(), upload_handler);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            favorites,
            catalog,
            media_dir,
            _temp_dir: temp_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Directory holding `uploads/` and, for the JSON backend, `tracks.json`
    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Waits for the server to become ready by polling the index page
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
