//! Composed execution
//!
//! [`Execution`] stacks the wrappers in one fixed order, outermost first:
//!
//! ```text
//! guarded → traced → transactional → operation
//! ```
//!
//! so the transaction is finished before the outcome is logged, and the
//! logged error is the untranslated one.

use super::guard::guarded;
use super::trace::traced_with_correlation;
use crate::context::{CorrelationScope, set_transaction_manager};
use crate::transaction::transactional;
use mes_domain::error::{DomainError, Result};
use mes_domain::ports::TransactionManager;
use std::sync::Arc;

/// Builder for a wrapped operation
///
/// # Example
///
/// ```
/// use mes_infrastructure::execution::Execution;
///
/// let qty = Execution::named("consume_material")
///     .correlation_id("req-7")
///     .traced()
///     .transactional()
///     .run(|| Ok(12))
///     .unwrap();
/// assert_eq!(qty, 12);
/// ```
#[derive(Debug, Clone)]
pub struct Execution {
    name: String,
    correlation_id: Option<String>,
    traced: bool,
    transactional: bool,
    transaction_manager: Option<Arc<dyn TransactionManager>>,
}

impl Execution {
    /// Start building an execution of the operation called `name`
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            correlation_id: None,
            traced: false,
            transactional: false,
            transaction_manager: None,
        }
    }

    /// Run under this correlation id
    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Log start and outcome
    pub fn traced(mut self) -> Self {
        self.traced = true;
        self
    }

    /// Run inside a transaction
    pub fn transactional(mut self) -> Self {
        self.transactional = true;
        self
    }

    /// Use `manager` for this execution's transaction
    pub fn transaction_manager(mut self, manager: Arc<dyn TransactionManager>) -> Self {
        self.transaction_manager = Some(manager);
        self.transactional = true;
        self
    }

    /// Operation name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `f` with the configured wrappers, returning its error unchanged
    pub fn run<T>(self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        let _manager = self.transaction_manager.map(set_transaction_manager);
        let in_transaction = self.transactional;
        let operation = move || {
            if in_transaction {
                transactional(f)
            } else {
                f()
            }
        };

        if self.traced {
            traced_with_correlation(&self.name, self.correlation_id.as_deref(), operation)
        } else {
            let _scope = self
                .correlation_id
                .as_deref()
                .map(|id| CorrelationScope::enter(Some(id)));
            operation()
        }
    }

    /// Run `f` with the configured wrappers inside the guarded boundary
    pub fn run_guarded<T>(self, f: impl FnOnce() -> Result<T>) -> std::result::Result<T, DomainError> {
        let name = self.name.clone();
        guarded(&name, move || self.run(f))
    }
}
