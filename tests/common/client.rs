//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per server endpoint.
//! When routes or form fields change, update only this file.

use super::constants::*;
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    /// Creates a client that does not follow redirects, so tests can assert
    /// on 303 responses directly.
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Request failed")
    }

    // ========================================================================
    // Pages
    // ========================================================================

    pub async fn get_index(&self) -> Response {
        self.get("/").await
    }

    pub async fn get_upload_page(&self) -> Response {
        self.get("/upload").await
    }

    pub async fn get_favorites_page(&self) -> Response {
        self.get("/favorites").await
    }

    pub async fn get_themes_page(&self) -> Response {
        self.get("/themes").await
    }

    pub async fn get_uploaded_file(&self, relative_path: &str) -> Response {
        self.get(&format!("/{}", relative_path)).await
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    /// Posts the add form with whichever fields are given.
    pub async fn add_to_favorites(&self, title: Option<&str>, artist: Option<&str>) -> Response {
        let mut fields = Vec::new();
        if let Some(title) = title {
            fields.push(("track_title", title));
        }
        if let Some(artist) = artist {
            fields.push(("artist_name", artist));
        }
        self.client
            .post(self.url("/add_to_favorites"))
            .form(&fields)
            .send()
            .await
            .expect("Add to favorites request failed")
    }

    pub async fn remove_from_favorites(&self, track_id: Option<&str>) -> Response {
        let fields: Vec<(&str, &str)> = track_id.map(|id| ("track_id", id)).into_iter().collect();
        self.client
            .post(self.url("/remove_from_favorites"))
            .form(&fields)
            .send()
            .await
            .expect("Remove from favorites request failed")
    }

    // ========================================================================
    // Uploads
    // ========================================================================

    /// Posts the upload form. `file` is `(filename, bytes)`; `None` omits the
    /// file part entirely.
    pub async fn upload(
        &self,
        file: Option<(&str, &[u8])>,
        title: Option<&str>,
        artist: Option<&str>,
    ) -> Response {
        let mut form = Form::new();
        if let Some(title) = title {
            form = form.text("title", title.to_string());
        }
        if let Some(artist) = artist {
            form = form.text("artist", artist.to_string());
        }
        if let Some((filename, bytes)) = file {
            form = form.part(
                "file",
                Part::bytes(bytes.to_vec()).file_name(filename.to_string()),
            );
        }
        self.client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .expect("Upload request failed")
    }
}
