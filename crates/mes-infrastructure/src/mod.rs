//! # MES Adapter Runtime - Infrastructure Layer
//!
//! Cross-cutting runtime pieces built on the `mes-domain` ports:
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`cache`] | [`CacheRegistry`] - swappable active cache provider |
//! | [`messaging`] | [`MessageRouter`] - named adapters, one active |
//! | [`context`] | Thread-bound correlation id, session and transaction manager |
//! | [`transaction`] | [`TransactionScope`] and [`transactional`] |
//! | [`execution`] | [`traced`], [`guarded`] and the [`Execution`] builder |
//! | [`logging`] | Structured tracing output |
//! | [`config`] | Figment configuration loading |
//! | [`runtime`] | [`AdapterRuntime`] wiring it together |

pub mod cache;
pub mod config;
pub mod constants;
pub mod context;
pub mod error_ext;
pub mod execution;
pub mod logging;
pub mod messaging;
pub mod runtime;
pub mod transaction;
pub mod utils;

pub use cache::CacheRegistry;
pub use config::{AppConfig, ConfigLoader};
pub use context::{CorrelationScope, SessionContext, current_correlation_id, with_correlation};
pub use execution::{Execution, guarded, traced};
pub use messaging::MessageRouter;
pub use runtime::AdapterRuntime;
pub use transaction::{TransactionScope, transactional};
