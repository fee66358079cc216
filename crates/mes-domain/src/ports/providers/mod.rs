//! Provider ports
//!
//! User-selectable capabilities: caching backends and messaging transports.

pub mod cache;
pub mod messaging;

pub use cache::{CacheProvider, CacheStats, effective_ttl, ttl_from_secs};
pub use messaging::{HandlerFn, MessageAdapter, MessageHandler};
