//! Domain constants

/// Name under which the in-process bus is registered with the router
pub const INTERNAL_ADAPTER_NAME: &str = "internal";

/// Catalog name of the default in-memory cache provider
pub const DEFAULT_CACHE_PROVIDER: &str = "memory";

/// Catalog name of the no-op providers
pub const NULL_PROVIDER_NAME: &str = "null";
