//! Single-slot cache for the resource listing.
//!
//! An entry is *fresh* for `validity` after it was fetched or last
//! revalidated. Past that, a matching `last-modified` value revalidates it
//! in place. The entry is never evicted, so it can always serve as a stale
//! fallback once something has been fetched.
//!
//! Timestamps are wall-clock so a [`CachedListing`] can be written out by
//! one process and picked up by the next.

use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::types::Resource;

/// How long a fetched listing is served without asking the CMS.
pub const CACHE_VALIDITY: Duration = Duration::from_secs(5 * 60);

/// The cached listing together with when and under which `last-modified`
/// value it was fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedListing {
    pub resources: Vec<Resource>,
    pub fetched_at: SystemTime,
    pub last_modified: Option<String>,
}

impl CachedListing {
    /// A timestamp ahead of `now` counts as expired.
    fn is_fresh(&self, now: SystemTime, validity: Duration) -> bool {
        now.duration_since(self.fetched_at)
            .is_ok_and(|age| age < validity)
    }
}

#[derive(Debug, Clone)]
pub struct ResourceCache {
    validity: Duration,
    entry: Option<CachedListing>,
}

impl Default for ResourceCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::with_validity(CACHE_VALIDITY)
    }

    pub fn with_validity(validity: Duration) -> Self {
        Self {
            validity,
            entry: None,
        }
    }

    /// Start from a previously saved listing.
    pub fn restore(mut self, listing: CachedListing) -> Self {
        self.entry = Some(listing);
        self
    }

    pub fn listing(&self) -> Option<&CachedListing> {
        self.entry.as_ref()
    }

    /// The cached listing if it is still within the validity window at `now`.
    pub fn fresh(&self, now: SystemTime) -> Option<&[Resource]> {
        self.entry
            .as_ref()
            .filter(|entry| entry.is_fresh(now, self.validity))
            .map(|entry| entry.resources.as_slice())
    }

    /// If the cached listing was fetched under the same `last_modified`
    /// value, restart its validity window at `now` and return it.
    ///
    /// A missing header on both sides counts as a match.
    pub fn revalidate(
        &mut self,
        last_modified: Option<&str>,
        now: SystemTime,
    ) -> Option<&[Resource]> {
        let entry = self.entry.as_mut()?;
        if entry.last_modified.as_deref() != last_modified {
            return None;
        }
        entry.fetched_at = now;
        Some(entry.resources.as_slice())
    }

    pub fn store(
        &mut self,
        resources: Vec<Resource>,
        last_modified: Option<String>,
        now: SystemTime,
    ) {
        self.entry = Some(CachedListing {
            resources,
            fetched_at: now,
            last_modified,
        });
    }

    /// Whatever was last stored, regardless of age.
    pub fn stale(&self) -> Option<&[Resource]> {
        self.entry.as_ref().map(|entry| entry.resources.as_slice())
    }
}
