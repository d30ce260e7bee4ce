use std::{future::Future, sync::Arc, time::Duration};

use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::{header::CONTENT_TYPE, Method, Uri},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod store;

pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use store::{FavoriteStore, InMemoryFavoriteStore};

/// Uniform success response: `{ "success": true, "data": ... }`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure response: `{ "success": false, "message": ... }`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Failure {
    pub success: bool,
    pub message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteList {
    pub favorites: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub is_favorite: bool,
}

pub type SharedStore = Arc<dyn FavoriteStore>;

/// Router backed by a fresh, empty in-memory store.
pub fn app() -> Router {
    app_with_store(Arc::new(InMemoryFavoriteStore::new()))
}

pub fn app_with_store(store: SharedStore) -> Router {
    Router::new()
        .route("/favorites/{user_id}", get(list_favorites))
        .route(
            "/favorites/{user_id}/{resource_id}",
            get(check_favorite)
                .post(add_favorite)
                .delete(remove_favorite),
        )
        .fallback(not_found)
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_until<F>(listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown)
        .await
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}

type UserPath = Result<Path<String>, PathRejection>;
type PairPath = Result<Path<(String, String)>, PathRejection>;

async fn list_favorites(
    State(store): State<SharedStore>,
    path: UserPath,
) -> Result<Json<Envelope<FavoriteList>>, ApiError> {
    let Path(user_id) = path?;
    let favorites = store.list(&user_id);
    Ok(Json(Envelope::ok(FavoriteList { favorites })))
}

async fn add_favorite(
    State(store): State<SharedStore>,
    path: PairPath,
) -> Result<Json<Envelope<FavoriteStatus>>, ApiError> {
    let Path((user_id, resource_id)) = path?;
    store.add(&user_id, &resource_id);
    Ok(Json(Envelope::ok(FavoriteStatus { is_favorite: true })))
}

async fn remove_favorite(
    State(store): State<SharedStore>,
    path: PairPath,
) -> Result<Json<Envelope<FavoriteStatus>>, ApiError> {
    let Path((user_id, resource_id)) = path?;
    store.remove(&user_id, &resource_id);
    Ok(Json(Envelope::ok(FavoriteStatus { is_favorite: false })))
}

async fn check_favorite(
    State(store): State<SharedStore>,
    path: PairPath,
) -> Result<Json<Envelope<FavoriteStatus>>, ApiError> {
    let Path((user_id, resource_id)) = path?;
    let is_favorite = store.contains(&user_id, &resource_id);
    Ok(Json(Envelope::ok(FavoriteStatus { is_favorite })))
}

async fn not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound {
        method,
        path: uri.path().to_string(),
    }
}
