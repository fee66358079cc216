//! Cache infrastructure
//!
//! [`CacheRegistry`] owns the active [`CacheProvider`](mes_domain::ports::providers::CacheProvider)
//! and forwards every cache call to it.

pub mod registry;

pub use registry::CacheRegistry;
