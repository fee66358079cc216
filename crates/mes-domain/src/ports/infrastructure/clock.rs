//! Clock Port
//!
//! Monotonic time source used for cache expiry. Injectable so expiry can be
//! driven deterministically.

use std::time::Instant;

/// Monotonic time source
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current monotonic instant
    fn now(&self) -> Instant;
}
