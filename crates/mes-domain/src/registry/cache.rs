//! Cache provider catalog
//!
//! Backends add an entry to [`CACHE_PROVIDERS`] with
//! `#[linkme::distributed_slice(CACHE_PROVIDERS)]`; the cache registry picks
//! one by name when the runtime is configured.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ports::providers::CacheProvider;

/// Selection of a cache backend plus backend-specific settings
#[derive(Debug, Clone, Default)]
pub struct CacheProviderConfig {
    /// Provider name (e.g., "memory", "null")
    pub provider: String,
    /// Settings only the selected backend interprets
    pub extra: HashMap<String, String>,
}

impl CacheProviderConfig {
    /// Select the backend named `provider`
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Attach one backend setting
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// One catalog entry: a backend name and how to build it
pub struct CacheProviderEntry {
    /// Unique provider name (e.g., "memory", "null")
    pub name: &'static str,
    /// Shown in runtime summaries
    pub description: &'static str,
    /// Builds a fresh provider from the selection
    pub factory: fn(&CacheProviderConfig) -> Result<Arc<dyn CacheProvider>>,
}

/// Compile-time collected cache provider entries
#[linkme::distributed_slice]
pub static CACHE_PROVIDERS: [CacheProviderEntry] = [..];

/// Build the backend named in `config`
///
/// Fails with [`Error::NotFound`] listing the registered names when nothing
/// matches.
pub fn resolve_cache_provider(config: &CacheProviderConfig) -> Result<Arc<dyn CacheProvider>> {
    let provider_name = config.provider.as_str();

    match CACHE_PROVIDERS.iter().find(|entry| entry.name == provider_name) {
        Some(entry) => (entry.factory)(config),
        None => {
            let available: Vec<&str> = CACHE_PROVIDERS.iter().map(|entry| entry.name).collect();
            Err(Error::not_found(format!(
                "cache provider '{provider_name}'. Available providers: {available:?}"
            )))
        }
    }
}

/// Registered `(name, description)` pairs, sorted by name
pub fn list_cache_providers() -> Vec<(&'static str, &'static str)> {
    let mut providers: Vec<_> = CACHE_PROVIDERS
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect();
    providers.sort_unstable();
    providers
}
