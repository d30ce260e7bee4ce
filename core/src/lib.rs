//! Synchronous client core for the learning-resource catalog.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for two
//! services without touching the network (host-does-IO pattern): the CMS
//! that holds the resources, and the favorites service. `CatalogService`
//! strings them together over a caller-supplied `Transport` and adds the
//! five-minute listing cache with stale fallback.
//!
//! # Design
//! - `CatalogClient` and `FavoritesClient` are stateless; they hold only a
//!   base URL.
//! - Each operation is split into `build_*` and `parse_*` so the I/O boundary
//!   is explicit.
//! - `view` turns records into display-ready cards and detail pages.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod http;
pub mod service;
pub mod types;
pub mod view;

pub use cache::{CachedListing, ResourceCache, CACHE_VALIDITY};
pub use catalog::CatalogClient;
pub use config::ClientConfig;
pub use error::{ApiError, TransportError};
pub use favorites::FavoritesClient;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use service::CatalogService;
pub use types::{Description, Resource, ResourceKind, Toggle};
pub use view::{filter_resources, ResourceCard, ResourceDetail};
