//! Port definitions (traits implemented by providers)

pub mod infrastructure;
pub mod providers;

pub use infrastructure::{Clock, TransactionHandle, TransactionManager};
pub use providers::{CacheProvider, MessageAdapter, MessageHandler};
