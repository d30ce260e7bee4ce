//! Client configuration, keyed by environment variable name.
//!
//! | key            | default                 |
//! |---------------------|-------------------------|
//! | `CATALOG_API_URL`   | `http://localhost:1337` |
//! | `FAVORITES_API_URL` | `http://localhost:3001` |
//! | `FAVORITES_USER_ID` | `testUser123`           |

use tracing::debug;

pub const DEFAULT_CATALOG_URL: &str = "http://localhost:1337";
pub const DEFAULT_FAVORITES_URL: &str = "http://localhost:3001";
pub const DEFAULT_USER_ID: &str = "testUser123";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub catalog_url: String,
    pub favorites_url: String,
    pub user_id: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            favorites_url: DEFAULT_FAVORITES_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}

impl ClientConfig {
    /// Looks each key up with `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let load = |key: &str, default: &str| {
            lookup(key).filter(|v| !v.is_empty()).unwrap_or_else(|| {
                debug!("{key} not set, using default: {default}");
                default.to_string()
            })
        };

        Self {
            catalog_url: load("CATALOG_API_URL", DEFAULT_CATALOG_URL),
            favorites_url: load("FAVORITES_API_URL", DEFAULT_FAVORITES_URL),
            user_id: load("FAVORITES_USER_ID", DEFAULT_USER_ID),
        }
    }
}
