//! No-op transaction manager
//!
//! Used when no data source is configured: every transaction opens,
//! commits and closes without touching anything.

use mes_domain::error::Result;
use mes_domain::ports::{TransactionHandle, TransactionManager};
use tracing::trace;

/// Transaction manager without a backing resource
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTransactionManager;

impl NoopTransactionManager {
    /// Create a new no-op manager
    pub fn new() -> Self {
        Self
    }
}

impl TransactionManager for NoopTransactionManager {
    fn begin(&self) -> Result<Box<dyn TransactionHandle>> {
        trace!("Begin no-op transaction");
        Ok(Box::new(NoopTransaction))
    }

    fn manager_name(&self) -> &str {
        "noop"
    }
}

#[derive(Debug)]
struct NoopTransaction;

impl TransactionHandle for NoopTransaction {
    fn commit(&mut self) -> Result<()> {
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
