//! Spot price cache configuration.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Freshness window for a fetched price.
    pub ttl_secs: u64,
    /// Oldest price served when a refresh fails.
    pub max_stale_secs: u64,
    /// JSON file the last fetched price is persisted to.
    pub snapshot_path: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 60,
            max_stale_secs: 3600,
            snapshot_path: None,
        }
    }
}
