//! # MES Adapter Runtime - Provider Implementations
//!
//! User-selectable implementations of the ports defined in `mes-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Cache | `CacheProvider` | InMemory, Null |
//! | Messaging | `MessageAdapter` | Internal, Null |
//! | Transactions | `TransactionManager` | Noop |
//! | Time | `Clock` | System, Manual |
//!
//! Cache providers and message adapters register themselves in the
//! `mes-domain` catalogs at link time. A binary that selects providers by
//! name must link this crate (`extern crate mes_providers;`).
//!
//! ## Usage
//!
//! ```ignore
//! use mes_providers::cache::InMemoryCache;
//! use mes_providers::messaging::InternalBus;
//! ```

// Re-export mes-domain types commonly used with providers
pub use mes_domain::error::{Error, Result};
pub use mes_domain::ports::providers::{CacheProvider, MessageAdapter, MessageHandler};

/// Clock implementations
pub mod clock;

/// Cache provider implementations
///
/// Implements `CacheProvider` trait for caching backends.
pub mod cache;

/// Message adapter implementations
///
/// Implements `MessageAdapter` trait for pub/sub transports.
pub mod messaging;

/// Transaction manager implementations
pub mod transaction;

pub use cache::{InMemoryCache, NullCacheProvider};
pub use clock::{ManualClock, SystemClock};
pub use messaging::{InternalBus, NullMessageAdapter};
pub use transaction::NoopTransactionManager;
