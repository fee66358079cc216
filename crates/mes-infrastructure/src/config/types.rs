//! Configuration types

use crate::constants::DEFAULT_LOG_LEVEL;
use mes_domain::constants::{DEFAULT_CACHE_PROVIDER, INTERNAL_ADAPTER_NAME};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit structured JSON records instead of text
    pub json_format: bool,
    /// Log to a daily-rotated file instead of stdout (JSON) or in addition to it (text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_output: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: true,
            file_output: None,
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Catalog name of the cache provider
    pub provider: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_CACHE_PROVIDER.to_string(),
        }
    }
}

/// Messaging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Adapter routed to after startup
    pub active_adapter: String,
    /// Catalog names of the adapters to register
    pub adapters: Vec<String>,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            active_adapter: INTERNAL_ADAPTER_NAME.to_string(),
            adapters: vec![INTERNAL_ADAPTER_NAME.to_string()],
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Cache configuration
    pub cache: CacheConfig,
    /// Messaging configuration
    pub messaging: MessagingConfig,
}
