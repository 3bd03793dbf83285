//! Upload form and multipart upload endpoint.

use super::pages::render_upload_form;
use super::state::{GuardedUploadHandler, ServerState};
use crate::upload::UploadedFile;
use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tracing::{error, info, warn};

/// Room for the text fields and multipart framing on top of the file itself.
const FORM_OVERHEAD_BYTES: u64 = 64 * 1024;

#[derive(Default)]
struct UploadForm {
    file: Option<UploadedFile>,
    title: Option<String>,
    artist: Option<String>,
}

async fn read_upload_form(multipart: &mut Multipart) -> Result<UploadForm, MultipartError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await?;
                form.file = Some(UploadedFile {
                    filename,
                    data: data.to_vec(),
                });
            }
            "title" => form.title = Some(field.text().await?),
            "artist" => form.artist = Some(field.text().await?),
            _ => {}
        }
    }
    Ok(form)
}

async fn upload_page() -> Html<String> {
    Html(render_upload_form())
}

/// POST /upload
async fn upload_track(
    State(handler): State<GuardedUploadHandler>,
    mut multipart: Multipart,
) -> Response {
    let form = match read_upload_form(&mut multipart).await {
        Ok(form) => form,
        Err(err) => {
            warn!("Failed to read upload form: {}", err);
            return (err.status(), err.body_text()).into_response();
        }
    };

    match handler
        .handle_upload(form.file, form.title.as_deref(), form.artist.as_deref())
        .await
    {
        Ok(record) => {
            info!("Uploaded {:?} by {:?}", record.title, record.artist);
            Redirect::to("/").into_response()
        }
        // Rejected uploads answer with a plain message and no error status
        Err(err) if err.is_invalid_input() => {
            info!("Rejected upload: {}", err);
            (StatusCode::OK, err.to_string()).into_response()
        }
        Err(err) => {
            error!("Upload failed: {:#}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            )
                .into_response()
        }
    }
}

pub fn upload_routes(max_upload_size: u64) -> Router<ServerState> {
    let body_limit = usize::try_from(max_upload_size.saturating_add(FORM_OVERHEAD_BYTES))
        .unwrap_or(usize::MAX);
    Router::new()
        .route("/upload", get(upload_page).post(upload_track))
        .layer(DefaultBodyLimit::max(body_limit))
}
