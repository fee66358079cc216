//! Configuration management
//!
//! Figment-based loading of [`AppConfig`] from defaults, TOML and the
//! environment.

pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, validate_app_config};
pub use types::{AppConfig, CacheConfig, LoggingConfig, MessagingConfig};
