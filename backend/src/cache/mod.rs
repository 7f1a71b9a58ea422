//! Result cache for generated constellations and heatmaps.
//!
//! The cache is best-effort from the service's point of view: read errors are
//! treated as misses and write errors are logged and ignored.

use async_trait::async_trait;
use std::time::Duration;

pub mod keys;
pub mod memory;

pub use keys::{constellation_cache_key, heatmap_cache_key};
pub use memory::InMemoryCache;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Byte-oriented key-value store with per-entry time-to-live.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// `Ok(None)` on a miss or an expired entry.
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> CacheResult<()>;
}
