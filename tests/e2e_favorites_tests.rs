//! End-to-end tests for the favorites endpoints

mod common;

use common::{TestClient, TestServer, TRACK_1_ARTIST, TRACK_1_TITLE, TRACK_2_ARTIST, TRACK_2_TITLE};
use reqwest::StatusCode;

#[tokio::test]
async fn test_add_favorite_redirects_and_lists() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client
        .add_to_favorites(Some(TRACK_1_TITLE), Some(TRACK_1_ARTIST))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    assert_eq!(server.favorites.count_favorites().unwrap(), 1);
    let html = client.get_favorites_page().await.text().await.unwrap();
    assert!(html.contains(TRACK_1_TITLE));
    assert!(html.contains(TRACK_1_ARTIST));
}

#[tokio::test]
async fn test_add_favorite_with_missing_field_is_rejected() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let cases = [
        (None, Some(TRACK_1_ARTIST)),
        (Some(TRACK_1_TITLE), None),
        (Some(""), Some(TRACK_1_ARTIST)),
        (None, None),
    ];
    for (title, artist) in cases {
        let response = client.add_to_favorites(title, artist).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.text().await.unwrap(),
            "Both track title and artist name are required!"
        );
    }

    assert_eq!(server.favorites.count_favorites().unwrap(), 0);
}

#[tokio::test]
async fn test_remove_favorite_removes_only_that_entry() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());
    client
        .add_to_favorites(Some(TRACK_1_TITLE), Some(TRACK_1_ARTIST))
        .await;
    client
        .add_to_favorites(Some(TRACK_2_TITLE), Some(TRACK_2_ARTIST))
        .await;
    let favorites = server.favorites.list_favorites().unwrap();
    assert_eq!(favorites.len(), 2);

    let response = client
        .remove_from_favorites(Some(&favorites[0].id.to_string()))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining = server.favorites.list_favorites().unwrap();
    assert_eq!(remaining, vec![favorites[1].clone()]);
    let html = client.get_favorites_page().await.text().await.unwrap();
    assert!(!html.contains(TRACK_1_TITLE));
    assert!(html.contains(TRACK_2_TITLE));
}

#[tokio::test]
async fn test_remove_missing_favorite_is_no_op() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());
    client
        .add_to_favorites(Some(TRACK_1_TITLE), Some(TRACK_1_ARTIST))
        .await;

    let response = client.remove_from_favorites(Some("424242")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client.remove_from_favorites(Some("not-a-number")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(server.favorites.count_favorites().unwrap(), 1);
}

#[tokio::test]
async fn test_remove_favorite_requires_track_id() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.remove_from_favorites(None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Track ID is required!");

    let response = client.remove_from_favorites(Some("")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_favorite_ids_are_not_reused() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());
    client
        .add_to_favorites(Some(TRACK_1_TITLE), Some(TRACK_1_ARTIST))
        .await;
    let first = server.favorites.list_favorites().unwrap()[0].clone();
    client
        .remove_from_favorites(Some(&first.id.to_string()))
        .await;

    client
        .add_to_favorites(Some(TRACK_2_TITLE), Some(TRACK_2_ARTIST))
        .await;

    let second = server.favorites.list_favorites().unwrap()[0].clone();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_pages_render() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    for response in [
        client.get_index().await,
        client.get_upload_page().await,
        client.get_favorites_page().await,
        client.get_themes_page().await,
    ] {
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}
