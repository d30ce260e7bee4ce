//! The resource listing cache, persisted between runs as JSON.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog_core::{CachedListing, ResourceCache};
use tracing::{debug, warn};

pub struct CacheFile {
    path: Option<PathBuf>,
}

impl CacheFile {
    /// `None` disables persistence.
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// `<cache dir>/catalog/resources.json`, if the platform has a cache dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("catalog").join("resources.json"))
    }

    /// A missing or unreadable file gives an empty cache.
    pub fn load(&self) -> ResourceCache {
        let cache = ResourceCache::new();
        let Some(path) = &self.path else {
            return cache;
        };
        match read_listing(path) {
            Ok(Some(listing)) => {
                debug!(path = %path.display(), "restored resource cache");
                cache.restore(listing)
            }
            Ok(None) => cache,
            Err(e) => {
                warn!("ignoring resource cache {}: {e:#}", path.display());
                cache
            }
        }
    }

    /// Failures are logged; a command never fails because of the cache.
    pub fn save(&self, cache: &ResourceCache) {
        let (Some(path), Some(listing)) = (&self.path, cache.listing()) else {
            return;
        };
        if let Err(e) = write_listing(path, listing) {
            warn!("could not save resource cache {}: {e:#}", path.display());
        }
    }
}

fn read_listing(path: &Path) -> Result<Option<CachedListing>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context("failed to read"),
    };
    let listing: CachedListing = serde_json::from_str(&text).context("failed to parse")?;
    Ok(Some(listing))
}

fn write_listing(path: &Path, listing: &CachedListing) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create cache directory")?;
    }
    let text = serde_json::to_string(listing)?;
    fs::write(path, text).context("failed to write")?;
    Ok(())
}
