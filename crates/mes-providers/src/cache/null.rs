//! Null cache provider
//!
//! Accepts every write and stores nothing. Selecting it disables caching
//! without touching call sites.

use mes_domain::error::Result;
use mes_domain::ports::providers::CacheProvider;
use mes_domain::registry::{CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry};
use serde_json::Value;
use std::time::Duration;

/// Cache provider that always misses
///
/// # Example
///
/// ```
/// use mes_domain::ports::providers::CacheProvider;
/// use mes_providers::cache::NullCacheProvider;
/// use serde_json::json;
///
/// let cache = NullCacheProvider::new();
/// assert!(cache.set("energy", "k", json!(1), None).unwrap());
/// assert_eq!(cache.get("energy", "k").unwrap(), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCacheProvider;

impl NullCacheProvider {
    /// Create a new null cache provider
    pub fn new() -> Self {
        Self
    }
}

impl CacheProvider for NullCacheProvider {
    fn get(&self, _region: &str, _key: &str) -> Result<Option<Value>> {
        Ok(None)
    }

    fn set(&self, _region: &str, _key: &str, _value: Value, _ttl: Option<Duration>) -> Result<bool> {
        Ok(true)
    }

    fn clear(&self, _region: Option<&str>, _key: Option<&str>) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static NULL_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "null",
    description: "Cache that stores nothing (caching disabled)",
    factory: |_config: &CacheProviderConfig| Ok(std::sync::Arc::new(NullCacheProvider::new())),
};
