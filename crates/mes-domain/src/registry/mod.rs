//! Name-based provider catalogs
//!
//! Two `linkme` slices: [`CACHE_PROVIDERS`] for cache backends and
//! [`MESSAGE_ADAPTERS`] for messaging transports. A provider crate adds one
//! static entry per backend; the runtime resolves the names it finds in
//! configuration (`cache.provider`, `messaging.adapters`) against them.
//!
//! Entries only exist for crates that are linked into the final binary.
//!
//! ```ignore
//! #[linkme::distributed_slice(MESSAGE_ADAPTERS)]
//! static INTERNAL_ADAPTER: MessageAdapterEntry = MessageAdapterEntry {
//!     name: "internal",
//!     description: "In-process synchronous pub/sub bus",
//!     factory: |_config| Ok(Arc::new(InternalBus::new())),
//! };
//! ```

pub mod cache;
pub mod messaging;

pub use cache::{
    CACHE_PROVIDERS, CacheProviderConfig, CacheProviderEntry, list_cache_providers,
    resolve_cache_provider,
};
pub use messaging::{
    MESSAGE_ADAPTERS, MessageAdapterConfig, MessageAdapterEntry, list_message_adapters,
    resolve_message_adapter,
};
