//! The favorite relation: user id → set of resource ids.
//!
//! # Design
//! `FavoriteStore` is the seam between the HTTP handlers and whatever holds
//! the relation. Every operation is total: unknown users read as empty, and
//! adding or removing is idempotent. `InMemoryFavoriteStore` is process-local
//! and starts empty; nothing survives a restart.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use tracing::debug;

/// Storage for the favorite relation.
///
/// Implementations must be shareable across request handlers.
pub trait FavoriteStore: Send + Sync {
    /// All resource ids favorited by `user_id`. No ordering is guaranteed.
    fn list(&self, user_id: &str) -> Vec<String>;

    /// Mark `resource_id` as a favorite of `user_id`. Repeated calls are no-ops.
    fn add(&self, user_id: &str, resource_id: &str);

    /// Unmark `resource_id`. Removing an absent pair is a no-op.
    fn remove(&self, user_id: &str, resource_id: &str);

    /// Whether `user_id` currently has `resource_id` as a favorite.
    fn contains(&self, user_id: &str, resource_id: &str) -> bool;
}

#[derive(Debug, Default)]
pub struct InMemoryFavoriteStore {
    favorites: RwLock<HashMap<String, HashSet<String>>>,
}

impl InMemoryFavoriteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

// Lock poisoning is ignored: no operation leaves the map half-updated.
impl FavoriteStore for InMemoryFavoriteStore {
    fn list(&self, user_id: &str) -> Vec<String> {
        let favorites = self.favorites.read().unwrap_or_else(PoisonError::into_inner);
        favorites
            .get(user_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn add(&self, user_id: &str, resource_id: &str) {
        let mut favorites = self.favorites.write().unwrap_or_else(PoisonError::into_inner);
        let inserted = favorites
            .entry(user_id.to_string())
            .or_default()
            .insert(resource_id.to_string());
        debug!(user_id, resource_id, inserted, "add favorite");
    }

    fn remove(&self, user_id: &str, resource_id: &str) {
        let mut favorites = self.favorites.write().unwrap_or_else(PoisonError::into_inner);
        let Some(set) = favorites.get_mut(user_id) else {
            return;
        };
        let removed = set.remove(resource_id);
        if set.is_empty() {
            favorites.remove(user_id);
        }
        debug!(user_id, resource_id, removed, "remove favorite");
    }

    fn contains(&self, user_id: &str, resource_id: &str) -> bool {
        let favorites = self.favorites.read().unwrap_or_else(PoisonError::into_inner);
        favorites
            .get(user_id)
            .is_some_and(|set| set.contains(resource_id))
    }
}
