//! Adapter runtime
//!
//! Owns one cache registry and one message router. Nothing here is global:
//! every runtime is independent, so tests build a fresh one each time.

use crate::cache::CacheRegistry;
use crate::config::AppConfig;
use crate::messaging::MessageRouter;
use mes_domain::constants::INTERNAL_ADAPTER_NAME;
use mes_domain::error::Result;
use mes_domain::registry::{
    CacheProviderConfig, MessageAdapterConfig, list_cache_providers, list_message_adapters,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Catalog entry as reported by [`AdapterRuntime::summary`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Registry name
    pub name: String,
    /// Human-readable description
    pub description: String,
}

/// Snapshot of the available providers and the active selections
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeSummary {
    /// Cache providers linked into the binary
    pub cache_providers: Vec<CatalogEntry>,
    /// Message adapters linked into the binary
    pub message_adapters: Vec<CatalogEntry>,
    /// Active cache provider
    pub active_cache_provider: String,
    /// Adapters registered with the router
    pub registered_adapters: Vec<String>,
    /// Active message adapter
    pub active_adapter: Option<String>,
}

fn catalog(entries: Vec<(&'static str, &'static str)>) -> Vec<CatalogEntry> {
    entries
        .into_iter()
        .map(|(name, description)| CatalogEntry {
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Cache registry plus message router
#[derive(Debug, Clone)]
pub struct AdapterRuntime {
    cache: Arc<CacheRegistry>,
    router: Arc<MessageRouter>,
}

impl AdapterRuntime {
    /// Runtime with an in-memory cache and the internal bus active
    pub fn new() -> Self {
        Self::from_parts(Arc::new(CacheRegistry::new()), Arc::new(MessageRouter::new()))
    }

    /// Runtime over existing registries
    pub fn from_parts(cache: Arc<CacheRegistry>, router: Arc<MessageRouter>) -> Self {
        Self { cache, router }
    }

    /// Runtime wired from configuration
    ///
    /// Selects the cache provider and registers every configured adapter by
    /// catalog name, then activates the configured adapter. The internal bus
    /// is always registered.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let runtime = Self::new();
        runtime
            .cache
            .use_provider_named(&CacheProviderConfig::new(&config.cache.provider))?;

        for name in &config.messaging.adapters {
            if name == INTERNAL_ADAPTER_NAME {
                continue;
            }
            runtime
                .router
                .register_named(&MessageAdapterConfig::new(name), false)?;
        }
        runtime.router.use_adapter(&config.messaging.active_adapter)?;

        info!(
            cache = %runtime.cache.provider_name(),
            adapter = %config.messaging.active_adapter,
            "Adapter runtime ready"
        );
        Ok(runtime)
    }

    /// Cache registry
    pub fn cache(&self) -> &Arc<CacheRegistry> {
        &self.cache
    }

    /// Message router
    pub fn router(&self) -> &Arc<MessageRouter> {
        &self.router
    }

    /// Available providers and active selections
    pub fn summary(&self) -> RuntimeSummary {
        RuntimeSummary {
            cache_providers: catalog(list_cache_providers()),
            message_adapters: catalog(list_message_adapters()),
            active_cache_provider: self.cache.provider_name(),
            registered_adapters: self.router.adapter_names(),
            active_adapter: self.router.active_adapter_name(),
        }
    }
}

impl Default for AdapterRuntime {
    fn default() -> Self {
        Self::new()
    }
}
