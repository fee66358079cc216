//! Cache Provider Port
//!
//! Port for cache backend providers. Values are opaque JSON payloads stored
//! under a `(region, key)` pair; keys are unique only within one region.
//!
//! ## Provider Pattern
//!
//! Providers register themselves in [`crate::registry::CACHE_PROVIDERS`] and
//! are selected by name, or installed directly into the active-provider
//! handle owned by the infrastructure layer.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Convert a TTL expressed in (possibly fractional) seconds
///
/// Zero, negative and non-finite values mean "no expiry". Values beyond what
/// a [`Duration`] can hold saturate to [`Duration::MAX`].
///
/// # Example
///
/// ```
/// use mes_domain::ports::providers::cache::ttl_from_secs;
/// use std::time::Duration;
///
/// assert_eq!(ttl_from_secs(1.5), Some(Duration::from_millis(1500)));
/// assert_eq!(ttl_from_secs(0.0), None);
/// assert_eq!(ttl_from_secs(-3.0), None);
/// assert_eq!(ttl_from_secs(1e300), Some(Duration::MAX));
/// ```
pub fn ttl_from_secs(secs: f64) -> Option<Duration> {
    if secs.is_finite() && secs > 0.0 {
        Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
    } else {
        None
    }
}

/// Normalize an optional TTL: a zero duration means "no expiry"
pub fn effective_ttl(ttl: Option<Duration>) -> Option<Duration> {
    ttl.filter(|ttl| !ttl.is_zero())
}

/// Cache Operation Statistics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of entries purged because they expired
    pub expired: u64,
    /// Number of live entries (expired entries not yet purged included)
    pub entries: u64,
}

impl CacheStats {
    /// Calculate hit rate from hits and misses
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total > 0 {
            self.hits as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Cache Provider Port
///
/// Defines the contract for cache backend providers.
///
/// # Contract
///
/// - `get` returns `None` for absent or expired entries. A stored
///   [`Value::Null`] is returned as `Some(Value::Null)`, so an explicitly
///   cached "no value" stays distinguishable from "never cached".
/// - `set` overwrites unconditionally. Providers that do not support expiry
///   ignore `ttl`.
/// - `clear(None, _)` wipes every region, `clear(Some(region), None)` wipes one
///   region, `clear(Some(region), Some(key))` wipes one entry.
///
/// # Example
///
/// ```ignore
/// use mes_domain::ports::providers::CacheProvider;
/// use serde_json::json;
///
/// cache.set("energy", "baseline:WO-1", json!({"expected_kwh": 50.0}), None)?;
/// if let Some(baseline) = cache.get("energy", "baseline:WO-1")? {
///     println!("{baseline}");
/// }
/// ```
pub trait CacheProvider: Send + Sync + std::fmt::Debug {
    /// Get the value stored under `key` inside `region`
    fn get(&self, region: &str, key: &str) -> Result<Option<Value>>;

    /// Store `value` under `key` inside `region`
    ///
    /// Returns `true` when the value was accepted.
    fn set(&self, region: &str, key: &str, value: Value, ttl: Option<Duration>) -> Result<bool>;

    /// Evict entries from the cache
    fn clear(&self, region: Option<&str>, key: Option<&str>) -> Result<()>;

    /// Check whether a live entry exists, including a stored null
    fn exists(&self, region: &str, key: &str) -> Result<bool> {
        Ok(self.get(region, key)?.is_some())
    }

    /// Get the name/identifier of this provider implementation
    fn provider_name(&self) -> &str;
}
