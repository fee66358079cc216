//! Infrastructure constants

// ============================================================================
// Configuration
// ============================================================================

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "MES";

/// Separator between the prefix and nested keys (`MES__CACHE__PROVIDER`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILENAME: &str = "mes.toml";

/// Configuration directory looked up in the working directory
pub const DEFAULT_CONFIG_DIR: &str = "config";

// ============================================================================
// Logging
// ============================================================================

/// Environment variable overriding the log filter
pub const LOG_ENV_VAR: &str = "MES_LOG";

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Records kept by an in-memory log sink by default
pub const DEFAULT_LOG_BUFFER_CAPACITY: usize = 1000;

/// Logger name used by the execution wrappers
pub const EXECUTION_LOG_TARGET: &str = "mes::execution";
