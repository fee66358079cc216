//! Tests for the runtime-swappable cache registry

use mes_domain::error::Error;
use mes_domain::ports::providers::CacheProvider;
use mes_domain::registry::CacheProviderConfig;
use mes_infrastructure::cache::CacheRegistry;
use mes_providers::cache::{InMemoryCache, NullCacheProvider};
use mes_providers::clock::ManualClock;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

#[test]
fn test_default_provider_is_memory() {
    let cache = CacheRegistry::new();
    assert_eq!(cache.provider_name(), "memory");
}

#[test]
fn test_swap_takes_effect_on_next_call() {
    let cache = CacheRegistry::new();
    cache.set("energy", "k", json!(1), None).unwrap();

    cache.use_provider(Some(Arc::new(NullCacheProvider::new())));
    assert_eq!(cache.provider_name(), "null");
    assert_eq!(cache.get("energy", "k").unwrap(), None);
}

#[test]
fn test_reset_to_default_discards_state() {
    let shared = Arc::new(InMemoryCache::new());
    let cache = CacheRegistry::with_provider(shared.clone());
    cache.set("energy", "k", json!(1), None).unwrap();

    let fresh = cache.use_provider(None);

    assert_eq!(fresh.provider_name(), "memory");
    assert_eq!(cache.get("energy", "k").unwrap(), None);
    // The previous instance is untouched, only detached
    assert_eq!(shared.get("energy", "k").unwrap(), Some(json!(1)));
}

#[test]
fn test_reset_provider_uses_registry_clock() {
    let clock = Arc::new(ManualClock::new());
    let cache = CacheRegistry::with_clock(clock.clone());
    cache.use_provider(None);
    cache
        .set("energy", "k", json!(1), Some(Duration::from_secs(5)))
        .unwrap();

    clock.advance(Duration::from_secs(6));
    assert_eq!(cache.get("energy", "k").unwrap(), None);
}

#[test]
fn test_use_provider_named_from_catalog() {
    let cache = CacheRegistry::new();
    let provider = cache
        .use_provider_named(&CacheProviderConfig::new("null"))
        .unwrap();
    assert_eq!(provider.provider_name(), "null");
    assert_eq!(cache.provider_name(), "null");
}

#[test]
fn test_unknown_provider_name_keeps_active() {
    let cache = CacheRegistry::new();
    cache.set("energy", "k", json!(1), None).unwrap();

    let err = cache
        .use_provider_named(&CacheProviderConfig::new("memcached"))
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }));
    assert_eq!(cache.provider_name(), "memory");
    assert_eq!(cache.get("energy", "k").unwrap(), Some(json!(1)));
}

#[test]
fn test_cached_value_none_is_a_hit() {
    let cache = CacheRegistry::new();
    cache.set("quality", "limits", Value::Null, None).unwrap();

    let value = cache
        .cached("quality", "limits", None, || panic!("must not recompute"))
        .unwrap();
    assert_eq!(value, Value::Null);
    assert!(cache.exists("quality", "limits").unwrap());
}

#[test]
fn test_cached_computes_once_on_miss() {
    let cache = CacheRegistry::new();
    let calls = AtomicUsize::new(0);
    let compute = || {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!({"expected_kwh": 50.0}))
    };

    let first = cache.cached("energy", "baseline", None, compute).unwrap();
    let second = cache.cached("energy", "baseline", None, compute).unwrap();

    assert_eq!(first, second);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_cached_failure_stores_nothing() {
    let cache = CacheRegistry::new();
    let err = cache
        .cached("energy", "baseline", None, || Err(Error::internal("meter offline")))
        .unwrap_err();

    assert!(err.to_string().contains("meter offline"));
    assert!(!cache.exists("energy", "baseline").unwrap());
}

#[test]
fn test_clear_through_registry() {
    let cache = CacheRegistry::new();
    cache.set("energy", "a", json!(1), None).unwrap();
    cache.set("quality", "a", json!(2), None).unwrap();

    cache.clear(Some("energy"), None).unwrap();

    assert_eq!(cache.get("energy", "a").unwrap(), None);
    assert_eq!(cache.get("quality", "a").unwrap(), Some(json!(2)));
}

#[test]
fn test_concurrent_swaps_are_atomic() {
    let cache = Arc::new(CacheRegistry::new());
    let memory: Arc<dyn CacheProvider> = Arc::new(InMemoryCache::new());
    let null: Arc<dyn CacheProvider> = Arc::new(NullCacheProvider::new());

    let swapper = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for i in 0..500 {
                let next = if i % 2 == 0 { &null } else { &memory };
                cache.use_provider(Some(Arc::clone(next)));
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for _ in 0..500 {
                    let name = cache.provider_name();
                    assert!(name == "memory" || name == "null", "torn provider: {name}");
                    cache.set("line", "k", json!(1), None).unwrap();
                    cache.get("line", "k").unwrap();
                }
            })
        })
        .collect();

    swapper.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }
    // 500 swaps ending on index 499 (odd) leave the memory provider active
    assert_eq!(cache.provider_name(), "memory");
}
