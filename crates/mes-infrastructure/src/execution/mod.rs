//! Execution wrappers
//!
//! | Wrapper | Effect |
//! |---------|--------|
//! | [`traced`] | Correlated start/ok/fail log events with elapsed time |
//! | [`guarded`] | Normalizes non-domain errors to `UNHANDLED` |
//! | [`transactional`](crate::transaction::transactional) | Commit/rollback around the operation |
//! | [`Execution`] | Composes the above in a fixed order |

pub mod builder;
pub mod guard;
pub mod trace;

pub use builder::Execution;
pub use guard::guarded;
pub use trace::{traced, traced_with_correlation};
