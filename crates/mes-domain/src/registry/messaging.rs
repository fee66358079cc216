//! Message Adapter Registry
//!
//! Auto-registration catalog for messaging transports, mirroring the cache
//! provider catalog.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ports::providers::MessageAdapter;

/// Configuration for message adapter creation
#[derive(Debug, Clone, Default)]
pub struct MessageAdapterConfig {
    /// Adapter name (e.g., "internal", "null")
    pub adapter: String,
    /// Additional adapter-specific configuration
    pub extra: HashMap<String, String>,
}

impl MessageAdapterConfig {
    /// Create a new config with the given adapter name
    pub fn new(adapter: impl Into<String>) -> Self {
        Self {
            adapter: adapter.into(),
            ..Default::default()
        }
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Registry entry for message adapters
pub struct MessageAdapterEntry {
    /// Unique adapter name (e.g., "internal", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create adapter instance
    pub factory: fn(&MessageAdapterConfig) -> Result<Arc<dyn MessageAdapter>>,
}

/// Compile-time collected message adapter entries
#[linkme::distributed_slice]
pub static MESSAGE_ADAPTERS: [MessageAdapterEntry] = [..];

/// Resolve message adapter by name from registry
pub fn resolve_message_adapter(config: &MessageAdapterConfig) -> Result<Arc<dyn MessageAdapter>> {
    let adapter_name = config.adapter.as_str();

    if let Some(entry) = MESSAGE_ADAPTERS.iter().find(|e| e.name == adapter_name) {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = MESSAGE_ADAPTERS.iter().map(|e| e.name).collect();
    Err(Error::not_found(format!(
        "message adapter '{adapter_name}'. Available adapters: {available:?}"
    )))
}

/// List all registered message adapters, sorted by name
pub fn list_message_adapters() -> Vec<(&'static str, &'static str)> {
    let mut adapters: Vec<_> = MESSAGE_ADAPTERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect();
    adapters.sort_unstable();
    adapters
}
