use axum::extract::FromRef;

use crate::favorites::FavoritesStore;
use crate::track_catalog::TrackCatalogStore;
use crate::upload::UploadHandler;
use std::sync::Arc;

use super::ServerConfig;

pub type GuardedFavoritesStore = Arc<dyn FavoritesStore>;
pub type GuardedTrackCatalog = Arc<dyn TrackCatalogStore>;
pub type GuardedUploadHandler = Arc<UploadHandler>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub favorites_store: GuardedFavoritesStore,
    pub track_catalog: GuardedTrackCatalog,
    pub upload_handler: GuardedUploadHandler,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        favorites_store: GuardedFavoritesStore,
        track_catalog: GuardedTrackCatalog,
        upload_handler: GuardedUploadHandler,
    ) -> Self {
        ServerState {
            config,
            favorites_store,
            track_catalog,
            upload_handler,
        }
    }
}

impl FromRef<ServerState> for GuardedFavoritesStore {
    fn from_ref(input: &ServerState) -> Self {
        input.favorites_store.clone()
    }
}

impl FromRef<ServerState> for GuardedTrackCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.track_catalog.clone()
    }
}

impl FromRef<ServerState> for GuardedUploadHandler {
    fn from_ref(input: &ServerState) -> Self {
        input.upload_handler.clone()
    }
}
