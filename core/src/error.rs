//! Error types for the catalog and favorites clients.
//!
//! `NotFound` is separate from `HttpError` because the detail view shows a
//! dedicated "resource not found" state. `Transport` covers exchanges that
//! never produced a response at all.

use thiserror::Error;

/// Failure to complete an HTTP exchange.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("connection refused: {0}")]
    ConnectionRefused(String),

    #[error("{0}")]
    Other(String),
}

/// Errors returned by client parse methods and `CatalogService`.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a status other than the expected one or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The favorites service answered with `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("transport failed")]
    Transport(#[from] TransportError),
}

impl ApiError {
    pub fn is_connection_refused(&self) -> bool {
        matches!(self, ApiError::Transport(TransportError::ConnectionRefused(_)))
    }
}
