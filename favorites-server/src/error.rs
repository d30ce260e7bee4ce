//! Failures that never reach the store.
//!
//! The four favorites operations always succeed; only requests that do not
//! map onto one of them produce an `ApiError`, rendered as the failure
//! envelope `{ "success": false, "message": ... }`.

use axum::{
    extract::rejection::PathRejection,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::Failure;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("no route for {method} {path}")]
    NotFound { method: Method, path: String },

    #[error("invalid path: {0}")]
    InvalidPath(String),
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidPath(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidPath(_) => StatusCode::BAD_REQUEST,
        };

        (status, Json(Failure::new(self.to_string()))).into_response()
    }
}
