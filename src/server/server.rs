use anyhow::{Context, Result};

use tracing::{debug, info};

use crate::error::{non_blank, ValidationError};
use tower_http::services::ServeDir;

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use super::pages::{render_favorites, render_index, render_themes};
use super::upload_routes::upload_routes;
use super::{log_requests, state::*, ApiError, ServerConfig};
use crate::upload::UPLOADS_DIR_NAME;

#[derive(Deserialize, Debug)]
struct AddFavoriteForm {
    track_title: Option<String>,
    artist_name: Option<String>,
}

#[derive(Deserialize, Debug)]
struct RemoveFavoriteForm {
    track_id: Option<String>,
}

/// GET /
async fn index(State(catalog): State<GuardedTrackCatalog>) -> Result<Html<String>, ApiError> {
    let tracks = catalog.list_tracks()?;
    Ok(Html(render_index(&tracks)))
}

/// GET /favorites
async fn favorites_page(
    State(store): State<GuardedFavoritesStore>,
) -> Result<Html<String>, ApiError> {
    let favorites = store.list_favorites()?;
    Ok(Html(render_favorites(&favorites)))
}

/// GET /themes
async fn themes_page() -> Html<String> {
    Html(render_themes())
}

/// POST /add_to_favorites
async fn add_to_favorites(
    State(store): State<GuardedFavoritesStore>,
    Form(form): Form<AddFavoriteForm>,
) -> Result<Redirect, ApiError> {
    let entry = store.add_favorite(
        form.track_title.as_deref().unwrap_or_default(),
        form.artist_name.as_deref().unwrap_or_default(),
    )?;
    debug!("Added favorite {} ({:?})", entry.id, entry.title);
    Ok(Redirect::to("/"))
}

/// POST /remove_from_favorites
///
/// Answers 204 whether or not a favorite was removed. An id that is not an
/// integer cannot match any row.
async fn remove_from_favorites(
    State(store): State<GuardedFavoritesStore>,
    Form(form): Form<RemoveFavoriteForm>,
) -> Result<StatusCode, ApiError> {
    let raw_id = non_blank(form.track_id.as_deref()).ok_or(ValidationError::MissingTrackId)?;
    match raw_id.parse::<i64>() {
        Ok(id) => match store.get_favorite(id)? {
            Some(entry) => {
                store.remove_favorite(id)?;
                info!(
                    "Removed favorite {} ({} by {})",
                    entry.id, entry.title, entry.artist
                );
            }
            None => debug!("No favorite with id {}", id),
        },
        Err(_) => debug!("Ignoring non-numeric track id {:?}", raw_id),
    }
    Ok(StatusCode::NO_CONTENT)
}

pub fn make_app(
    config: ServerConfig,
    favorites_store: GuardedFavoritesStore,
    track_catalog: GuardedTrackCatalog,
    upload_handler: GuardedUploadHandler,
) -> Router {
    let state = ServerState::new(
        config.clone(),
        favorites_store,
        track_catalog,
        upload_handler,
    );

    let favorites_routes: Router<ServerState> = Router::new()
        .route("/favorites", get(favorites_page))
        .route("/add_to_favorites", post(add_to_favorites))
        .route("/remove_from_favorites", post(remove_from_favorites));

    let mut app: Router = Router::new()
        .route("/", get(index))
        .route("/themes", get(themes_page))
        .merge(favorites_routes)
        .merge(upload_routes(config.max_upload_size))
        .nest_service(
            &format!("/{}", UPLOADS_DIR_NAME),
            ServeDir::new(&config.uploads_dir),
        )
        .with_state(state.clone());

    if let Some(static_dir) = &config.static_dir_path {
        app = app.nest_service("/static", ServeDir::new(static_dir));
    }

    app.layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(
    config: ServerConfig,
    favorites_store: GuardedFavoritesStore,
    track_catalog: GuardedTrackCatalog,
    upload_handler: GuardedUploadHandler,
) -> Result<()> {
    let port = config.port;
    let app = make_app(config, favorites_store, track_catalog, upload_handler);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on {}", listener.local_addr()?);

    Ok(axum::serve(listener, app).await?)
}
