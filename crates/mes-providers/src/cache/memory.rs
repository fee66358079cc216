//! In-memory cache provider with per-entry expiry
//!
//! Entries live in a two-level map `region -> key -> entry`. Expiry is lazy:
//! every `get` sweeps the whole region it touches, so the region never grows
//! with dead entries while it is being read. Regions left empty by a sweep
//! are dropped.

use mes_domain::error::Result;
use mes_domain::ports::Clock;
use mes_domain::ports::providers::{CacheProvider, CacheStats, effective_ttl};
use mes_domain::registry::{CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::clock::SystemClock;

#[derive(Debug)]
struct CacheEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

#[derive(Debug, Default)]
struct CacheState {
    regions: HashMap<String, HashMap<String, CacheEntry>>,
    hits: u64,
    misses: u64,
    expired: u64,
}

impl CacheState {
    fn purge_region(&mut self, region: &str, now: Instant) {
        let Some(bucket) = self.regions.get_mut(region) else {
            return;
        };
        let before = bucket.len();
        bucket.retain(|_, entry| !entry.is_expired(now));
        self.expired += (before - bucket.len()) as u64;
        if bucket.is_empty() {
            self.regions.remove(region);
        }
    }

    fn entry_count(&self) -> usize {
        self.regions.values().map(HashMap::len).sum()
    }
}

/// Region-scoped in-memory cache
///
/// Thread-safe; all operations take one short-lived lock. The clock is
/// injectable so expiry can be driven deterministically.
///
/// # Example
///
/// ```
/// use mes_domain::ports::providers::CacheProvider;
/// use mes_providers::cache::InMemoryCache;
/// use serde_json::json;
///
/// let cache = InMemoryCache::new();
/// cache.set("quality", "limits:P-100", json!({"max_temp": 85}), None).unwrap();
/// assert_eq!(
///     cache.get("quality", "limits:P-100").unwrap(),
///     Some(json!({"max_temp": 85}))
/// );
/// assert_eq!(cache.get("energy", "limits:P-100").unwrap(), None);
/// ```
pub struct InMemoryCache {
    state: Mutex<CacheState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCache {
    /// Create an empty cache driven by the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty cache driven by `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            clock,
        }
    }

    /// Create as Arc for sharing
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of hit, miss and expiry counters
    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            expired: state.expired,
            entries: state.entry_count() as u64,
        }
    }

    /// Number of regions currently held, without sweeping
    pub fn region_count(&self) -> usize {
        self.lock().regions.len()
    }

    /// Number of entries held in `region`, expired ones included
    pub fn region_len(&self, region: &str) -> usize {
        self.lock().regions.get(region).map_or(0, HashMap::len)
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("InMemoryCache")
            .field("regions", &state.regions.len())
            .field("entries", &state.entry_count())
            .finish()
    }
}

impl CacheProvider for InMemoryCache {
    fn get(&self, region: &str, key: &str) -> Result<Option<Value>> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.purge_region(region, now);

        let value = state
            .regions
            .get(region)
            .and_then(|bucket| bucket.get(key))
            .map(|entry| entry.value.clone());
        if value.is_some() {
            state.hits += 1;
        } else {
            state.misses += 1;
        }
        Ok(value)
    }

    fn set(&self, region: &str, key: &str, value: Value, ttl: Option<Duration>) -> Result<bool> {
        let now = self.clock.now();
        // An unrepresentable deadline is treated as no expiry
        let expires_at = effective_ttl(ttl).and_then(|ttl| now.checked_add(ttl));

        self.lock()
            .regions
            .entry(region.to_string())
            .or_default()
            .insert(key.to_string(), CacheEntry { value, expires_at });
        Ok(true)
    }

    fn clear(&self, region: Option<&str>, key: Option<&str>) -> Result<()> {
        let mut state = self.lock();
        match (region, key) {
            (None, _) => state.regions.clear(),
            (Some(region), None) => {
                state.regions.remove(region);
            }
            (Some(region), Some(key)) => {
                if let Some(bucket) = state.regions.get_mut(region) {
                    bucket.remove(key);
                    if bucket.is_empty() {
                        state.regions.remove(region);
                    }
                }
            }
        }
        Ok(())
    }

    fn exists(&self, region: &str, key: &str) -> Result<bool> {
        let now = self.clock.now();
        let mut state = self.lock();
        state.purge_region(region, now);
        Ok(state
            .regions
            .get(region)
            .is_some_and(|bucket| bucket.contains_key(key)))
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

#[linkme::distributed_slice(CACHE_PROVIDERS)]
static MEMORY_PROVIDER: CacheProviderEntry = CacheProviderEntry {
    name: "memory",
    description: "In-process region cache with per-entry TTL",
    factory: |_config: &CacheProviderConfig| Ok(Arc::new(InMemoryCache::new())),
};
