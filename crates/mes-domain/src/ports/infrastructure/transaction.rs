//! Transaction Manager Port
//!
//! A transaction manager hands out one [`TransactionHandle`] per unit of work.
//! The transaction scope in the infrastructure layer guarantees that exactly
//! one of `commit`/`rollback` is called on every handle, followed by `close`.

use crate::error::Result;

/// Open transaction obtained from a [`TransactionManager`]
pub trait TransactionHandle: Send {
    /// Make the unit of work durable
    fn commit(&mut self) -> Result<()>;

    /// Discard the unit of work
    fn rollback(&mut self) -> Result<()>;

    /// Release the underlying resource
    fn close(&mut self) -> Result<()>;
}

/// Source of transaction handles for one data source
pub trait TransactionManager: Send + Sync + std::fmt::Debug {
    /// Open a new transaction
    fn begin(&self) -> Result<Box<dyn TransactionHandle>>;

    /// Get the name/identifier of this manager implementation
    fn manager_name(&self) -> &str;
}
