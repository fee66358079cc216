//! Runtime-swappable cache provider
//!
//! ## Pattern
//!
//! ```text
//! linkme catalog → use_provider_named ─┐
//!                                      ├→ RwLock<Arc<dyn CacheProvider>> → get/set/clear
//!            use_provider(Some/None) ──┘
//! ```
//!
//! Every cache call reads the active handle fresh, so a swap takes effect
//! for the very next call on any thread. In-flight calls keep the provider
//! they started with.

use mes_domain::error::Result;
use mes_domain::ports::Clock;
use mes_domain::ports::providers::CacheProvider;
use mes_domain::registry::{CacheProviderConfig, resolve_cache_provider};
use mes_providers::cache::InMemoryCache;
use mes_providers::clock::SystemClock;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, info};

/// Holder of the active cache provider
///
/// # Example
///
/// ```
/// use mes_infrastructure::cache::CacheRegistry;
/// use mes_providers::cache::NullCacheProvider;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let cache = CacheRegistry::new();
/// cache.set("energy", "k", json!(1), None).unwrap();
/// assert_eq!(cache.get("energy", "k").unwrap(), Some(json!(1)));
///
/// cache.use_provider(Some(Arc::new(NullCacheProvider::new())));
/// assert_eq!(cache.get("energy", "k").unwrap(), None);
/// ```
pub struct CacheRegistry {
    active: RwLock<Arc<dyn CacheProvider>>,
    clock: Arc<dyn Clock>,
}

impl CacheRegistry {
    /// Create a registry backed by a fresh in-memory cache
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a registry whose default caches are driven by `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let initial: Arc<dyn CacheProvider> = Arc::new(InMemoryCache::with_clock(Arc::clone(&clock)));
        Self {
            active: RwLock::new(initial),
            clock,
        }
    }

    /// Create a registry with `provider` already active
    pub fn with_provider(provider: Arc<dyn CacheProvider>) -> Self {
        Self {
            active: RwLock::new(provider),
            clock: Arc::new(SystemClock),
        }
    }

    /// Currently active provider
    pub fn get_provider(&self) -> Arc<dyn CacheProvider> {
        Arc::clone(&self.active.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Name of the currently active provider
    pub fn provider_name(&self) -> String {
        self.get_provider().provider_name().to_string()
    }

    /// Swap the active provider
    ///
    /// `None` installs a fresh in-memory cache, discarding everything cached
    /// so far. Returns the provider now active.
    pub fn use_provider(&self, provider: Option<Arc<dyn CacheProvider>>) -> Arc<dyn CacheProvider> {
        let provider: Arc<dyn CacheProvider> = match provider {
            Some(provider) => provider,
            None => Arc::new(InMemoryCache::with_clock(Arc::clone(&self.clock))),
        };
        let previous = {
            let mut active = self.active.write().unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *active, Arc::clone(&provider))
        };
        info!(
            provider = provider.provider_name(),
            previous = previous.provider_name(),
            "Cache provider set"
        );
        provider
    }

    /// Resolve a provider from the catalog and make it active
    ///
    /// Unknown names fail without touching the active provider.
    pub fn use_provider_named(&self, config: &CacheProviderConfig) -> Result<Arc<dyn CacheProvider>> {
        let provider = resolve_cache_provider(config)?;
        Ok(self.use_provider(Some(provider)))
    }

    /// Get a value from the active provider
    pub fn get(&self, region: &str, key: &str) -> Result<Option<Value>> {
        self.get_provider().get(region, key)
    }

    /// Store a value in the active provider
    pub fn set(&self, region: &str, key: &str, value: Value, ttl: Option<Duration>) -> Result<bool> {
        self.get_provider().set(region, key, value, ttl)
    }

    /// Evict entries from the active provider
    pub fn clear(&self, region: Option<&str>, key: Option<&str>) -> Result<()> {
        self.get_provider().clear(region, key)
    }

    /// Check for a live entry in the active provider
    pub fn exists(&self, region: &str, key: &str) -> Result<bool> {
        self.get_provider().exists(region, key)
    }

    /// Read-through lookup
    ///
    /// Returns the cached value on a hit (a cached null included). On a miss
    /// runs `compute`, stores its result with `ttl` and returns it. A failing
    /// `compute` stores nothing.
    pub fn cached<F>(&self, region: &str, key: &str, ttl: Option<Duration>, compute: F) -> Result<Value>
    where
        F: FnOnce() -> Result<Value>,
    {
        let provider = self.get_provider();
        if let Some(value) = provider.get(region, key)? {
            debug!(region, key, "Cache hit");
            return Ok(value);
        }
        debug!(region, key, "Cache miss");
        let value = compute()?;
        provider.set(region, key, value.clone(), ttl)?;
        Ok(value)
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CacheRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheRegistry")
            .field("provider", &self.provider_name())
            .finish()
    }
}
