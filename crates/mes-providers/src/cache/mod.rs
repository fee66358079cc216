//! Cache Provider Implementations
//!
//! ## Available Providers
//!
//! | Provider | Registry name | Description |
//! |----------|---------------|-------------|
//! | [`InMemoryCache`] | `memory` | Region cache with lazy TTL expiry (default) |
//! | [`NullCacheProvider`] | `null` | Stores nothing, always misses |

pub mod memory;
pub mod null;

pub use memory::InMemoryCache;
pub use null::NullCacheProvider;

// Re-export domain types used by cache providers
pub use mes_domain::ports::providers::cache::{CacheStats, effective_ttl, ttl_from_secs};
