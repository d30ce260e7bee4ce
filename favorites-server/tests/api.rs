use std::sync::Arc;

use axum::http::{self, Request, StatusCode};
use axum::Router;
use favorites_server::{
    app, app_with_store, Envelope, Failure, FavoriteList, FavoriteStatus, FavoriteStore,
    InMemoryFavoriteStore,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

async fn send(app: &Router, method: &str, uri: &str) -> axum::response::Response {
    app.clone().oneshot(request(method, uri)).await.unwrap()
}

async fn status_of(app: &Router, method: &str, uri: &str) -> bool {
    let resp = send(app, method, uri).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Envelope<FavoriteStatus> = body_json(resp).await;
    assert!(envelope.success);
    envelope.data.is_favorite
}

async fn list_of(app: &Router, user_id: &str) -> Vec<String> {
    let resp = send(app, "GET", &format!("/favorites/{user_id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let envelope: Envelope<FavoriteList> = body_json(resp).await;
    assert!(envelope.success);
    let mut favorites = envelope.data.favorites;
    favorites.sort();
    favorites
}

// --- list ---

#[tokio::test]
async fn list_unknown_user_is_empty() {
    let app = app();
    assert!(list_of(&app, "nobody").await.is_empty());
}

#[tokio::test]
async fn list_wire_format() {
    let app = app();
    let resp = send(&app, "GET", "/favorites/u1").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/json"
    );
    let json: serde_json::Value = body_json(resp).await;
    assert_eq!(json, serde_json::json!({"success": true, "data": {"favorites": []}}));
}

// --- add ---

#[tokio::test]
async fn add_reports_favorite() {
    let app = app();
    assert!(status_of(&app, "POST", "/favorites/u1/5").await);
    assert_eq!(list_of(&app, "u1").await, vec!["5"]);
}

#[tokio::test]
async fn add_twice_keeps_one_entry() {
    let app = app();
    assert!(status_of(&app, "POST", "/favorites/u1/5").await);
    assert!(status_of(&app, "POST", "/favorites/u1/5").await);
    assert_eq!(list_of(&app, "u1").await, vec!["5"]);
}

#[tokio::test]
async fn add_two_resources_lists_both() {
    let app = app();
    status_of(&app, "POST", "/favorites/u1/r5").await;
    status_of(&app, "POST", "/favorites/u1/r7").await;
    assert_eq!(list_of(&app, "u1").await, vec!["r5", "r7"]);
}

// --- remove ---

#[tokio::test]
async fn remove_reports_not_favorite() {
    let app = app();
    status_of(&app, "POST", "/favorites/u1/r5").await;
    assert!(!status_of(&app, "DELETE", "/favorites/u1/r5").await);
    assert!(!status_of(&app, "GET", "/favorites/u1/r5").await);
}

#[tokio::test]
async fn remove_absent_is_ok() {
    let app = app();
    assert!(!status_of(&app, "DELETE", "/favorites/u1/never-added").await);
    assert!(list_of(&app, "u1").await.is_empty());
}

// --- check ---

#[tokio::test]
async fn check_tracks_membership() {
    let app = app();
    assert!(!status_of(&app, "GET", "/favorites/u1/r5").await);
    status_of(&app, "POST", "/favorites/u1/r5").await;
    assert!(status_of(&app, "GET", "/favorites/u1/r5").await);
}

#[tokio::test]
async fn users_are_isolated() {
    let app = app();
    status_of(&app, "POST", "/favorites/u1/r5").await;
    assert!(list_of(&app, "u2").await.is_empty());
    assert!(!status_of(&app, "GET", "/favorites/u2/r5").await);
}

#[tokio::test]
async fn path_segments_are_percent_decoded() {
    let store = Arc::new(InMemoryFavoriteStore::new());
    let app = app_with_store(store.clone());
    status_of(&app, "POST", "/favorites/test%20user/a%2Fb").await;
    assert!(store.contains("test user", "a/b"));
}

#[tokio::test]
async fn handlers_share_injected_store() {
    let store = Arc::new(InMemoryFavoriteStore::new());
    store.add("u1", "42");
    let app = app_with_store(store.clone());
    assert!(status_of(&app, "GET", "/favorites/u1/42").await);
    status_of(&app, "DELETE", "/favorites/u1/42").await;
    assert!(!store.contains("u1", "42"));
}

// --- failures ---

#[tokio::test]
async fn unknown_route_returns_failure_envelope() {
    let app = app();
    let resp = send(&app, "GET", "/nope").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let failure: Failure = body_json(resp).await;
    assert!(!failure.success);
    assert_eq!(failure.message, "no route for GET /nope");
}

#[tokio::test]
async fn too_many_segments_is_not_found() {
    let app = app();
    let resp = send(&app, "GET", "/favorites/u1/r5/extra").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_utf8_segment_returns_400() {
    let app = app();
    let resp = send(&app, "POST", "/favorites/u1/%FF").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let failure: Failure = body_json(resp).await;
    assert!(!failure.success);
    assert!(failure.message.starts_with("invalid path"));
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let app = app();
    let resp = send(&app, "PUT", "/favorites/u1/r5").await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// --- cors ---

#[tokio::test]
async fn preflight_allows_delete() {
    let app = app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/favorites/u1/r5")
                .header(http::header::ORIGIN, "http://localhost:3000")
                .header(http::header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[http::header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let allowed = resp.headers()[http::header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_string();
    assert!(allowed.contains("DELETE"));
    assert!(body_bytes(resp).await.is_empty());
}

// --- full lifecycle ---

#[tokio::test]
async fn favorites_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("POST", "/favorites/testUser123/1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let added: Envelope<FavoriteStatus> = body_json(resp).await;
    assert!(added.data.is_favorite);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("POST", "/favorites/testUser123/2"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/favorites/testUser123"))
        .await
        .unwrap();
    let listed: Envelope<FavoriteList> = body_json(resp).await;
    let mut ids = listed.data.favorites;
    ids.sort();
    assert_eq!(ids, vec!["1", "2"]);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("DELETE", "/favorites/testUser123/1"))
        .await
        .unwrap();
    let removed: Envelope<FavoriteStatus> = body_json(resp).await;
    assert!(!removed.data.is_favorite);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/favorites/testUser123/1"))
        .await
        .unwrap();
    let checked: Envelope<FavoriteStatus> = body_json(resp).await;
    assert!(!checked.data.is_favorite);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(request("GET", "/favorites/testUser123"))
        .await
        .unwrap();
    let listed: Envelope<FavoriteList> = body_json(resp).await;
    assert_eq!(listed.data.favorites, vec!["2"]);
}
