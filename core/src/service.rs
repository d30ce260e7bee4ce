//! What a front-end needs from the two services, over any `Transport`.
//!
//! # Design
//! `CatalogService` owns the resource cache and the configured user id.
//! The listing follows this order:
//! 1. serve the cache while it is fresh (unless forced);
//! 2. `HEAD` the collection and reuse the cache when `last-modified` is
//!    unchanged (unless forced);
//! 3. `GET` the full listing and replace the cache.
//!
//! Any failure in 2 or 3 falls back to the cached listing when one exists.
//! Single-resource and favorites calls are never cached.

use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

use crate::cache::ResourceCache;
use crate::catalog::CatalogClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::favorites::FavoritesClient;
use crate::http::Transport;
use crate::types::{Resource, Toggle};

pub const ADDED_MESSAGE: &str = "Resource added to favorites";
pub const REMOVED_MESSAGE: &str = "Resource removed from favorites";

pub struct CatalogService<T> {
    transport: T,
    catalog: CatalogClient,
    favorites: FavoritesClient,
    user_id: String,
    cache: ResourceCache,
}

impl<T: Transport> CatalogService<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            catalog: CatalogClient::new(&config.catalog_url),
            favorites: FavoritesClient::new(&config.favorites_url),
            user_id: config.user_id.clone(),
            cache: ResourceCache::new(),
        }
    }

    pub fn with_cache_validity(mut self, validity: Duration) -> Self {
        self.cache = ResourceCache::with_validity(validity);
        self
    }

    /// Replace the empty cache, e.g. with one restored from disk.
    pub fn with_cache(mut self, cache: ResourceCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The resource listing, cached as described in the module docs.
    pub fn resources(&mut self, force_refresh: bool) -> Result<Vec<Resource>, ApiError> {
        let now = SystemTime::now();
        if !force_refresh {
            if let Some(cached) = self.cache.fresh(now) {
                debug!(count = cached.len(), "serving fresh cached resources");
                return Ok(cached.to_vec());
            }
        }

        match self.refresh(force_refresh, now) {
            Ok(resources) => Ok(resources),
            Err(err) => match self.cache.stale() {
                Some(stale) => {
                    warn!(error = %err, "catalog fetch failed, serving cached resources");
                    Ok(stale.to_vec())
                }
                None => Err(err),
            },
        }
    }

    fn refresh(&mut self, force_refresh: bool, now: SystemTime) -> Result<Vec<Resource>, ApiError> {
        let head = self.transport.execute(self.catalog.build_resources_head())?;
        let last_modified = self.catalog.parse_resources_head(head)?;

        if !force_refresh {
            if let Some(cached) = self.cache.revalidate(last_modified.as_deref(), now) {
                debug!(?last_modified, "catalog unchanged, revalidated cache");
                return Ok(cached.to_vec());
            }
        }

        let response = self.transport.execute(self.catalog.build_list_resources())?;
        let resources = self.catalog.parse_list_resources(response)?;
        debug!(count = resources.len(), ?last_modified, "fetched resources");
        self.cache.store(resources.clone(), last_modified, now);
        Ok(resources)
    }

    pub fn resource(&self, id: u64) -> Result<Resource, ApiError> {
        let response = self.transport.execute(self.catalog.build_get_resource(id))?;
        self.catalog.parse_get_resource(response)
    }

    pub fn favorite_status(&self, id: u64) -> Result<bool, ApiError> {
        let request = self
            .favorites
            .build_check_favorite(&self.user_id, &id.to_string());
        self.favorites
            .parse_check_favorite(self.transport.execute(request)?)
    }

    /// Flip the favorite flag of `id`: check, then remove or add.
    pub fn toggle_favorite(&self, id: u64) -> Result<Toggle, ApiError> {
        let resource_id = id.to_string();
        let was_favorite = self.favorite_status(id)?;

        let is_favorite = if was_favorite {
            let request = self
                .favorites
                .build_remove_favorite(&self.user_id, &resource_id);
            self.favorites
                .parse_remove_favorite(self.transport.execute(request)?)?
        } else {
            let request = self.favorites.build_add_favorite(&self.user_id, &resource_id);
            self.favorites
                .parse_add_favorite(self.transport.execute(request)?)?
        };

        let message = if was_favorite {
            REMOVED_MESSAGE
        } else {
            ADDED_MESSAGE
        };
        debug!(id, is_favorite, "toggled favorite");
        Ok(Toggle {
            is_favorite,
            message: message.to_string(),
        })
    }

    pub fn favorites(&self) -> Result<Vec<String>, ApiError> {
        let request = self.favorites.build_list_favorites(&self.user_id);
        self.favorites
            .parse_list_favorites(self.transport.execute(request)?)
    }
}
