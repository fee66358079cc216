//! Infrastructure ports
//!
//! Technical capabilities the runtime consumes but does not select by name.

pub mod clock;
pub mod transaction;

pub use clock::Clock;
pub use transaction::{TransactionHandle, TransactionManager};
