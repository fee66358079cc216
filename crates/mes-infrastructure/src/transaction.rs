//! Transaction scope
//!
//! [`TransactionScope`] wraps one [`TransactionHandle`]: exactly one of
//! commit/rollback runs, followed by close. Dropping an unfinished scope
//! (early return or unwinding panic) rolls back.
//!
//! [`transactional`] runs a closure inside a scope opened on the thread's
//! transaction manager. Calls nest: an inner `transactional` joins the
//! transaction of the outer one instead of opening its own.

use crate::context::{current_transaction_manager, default_transaction_manager};
use mes_domain::error::Result;
use mes_domain::ports::{TransactionHandle, TransactionManager};
use std::cell::Cell;
use std::marker::PhantomData;
use tracing::{debug, warn};

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Whether a `transactional` call is active on the current thread
pub fn in_transaction() -> bool {
    DEPTH.with(Cell::get) > 0
}

struct DepthGuard {
    _not_send: PhantomData<*const ()>,
}

impl DepthGuard {
    fn enter() -> Self {
        DEPTH.with(|depth| depth.set(depth.get() + 1));
        Self {
            _not_send: PhantomData,
        }
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// One open transaction
#[must_use = "an unfinished transaction is rolled back when dropped"]
pub struct TransactionScope {
    handle: Option<Box<dyn TransactionHandle>>,
    manager: String,
}

impl TransactionScope {
    /// Open a transaction on `manager`
    pub fn begin(manager: &dyn TransactionManager) -> Result<Self> {
        let handle = manager.begin()?;
        debug!(manager = manager.manager_name(), "Transaction started");
        Ok(Self {
            handle: Some(handle),
            manager: manager.manager_name().to_string(),
        })
    }

    /// Commit and close
    pub fn commit(mut self) -> Result<()> {
        self.finish(true)
    }

    /// Roll back and close
    pub fn rollback(mut self) -> Result<()> {
        self.finish(false)
    }

    fn finish(&mut self, commit: bool) -> Result<()> {
        let Some(mut handle) = self.handle.take() else {
            return Ok(());
        };
        let outcome = if commit {
            handle.commit()
        } else {
            handle.rollback()
        };
        let closed = handle.close();
        debug!(manager = %self.manager, committed = commit, "Transaction finished");
        outcome.and(closed)
    }
}

impl Drop for TransactionScope {
    fn drop(&mut self) {
        if self.handle.is_some()
            && let Err(e) = self.finish(false)
        {
            warn!(manager = %self.manager, error = %e, "Rollback of abandoned transaction failed");
        }
    }
}

impl std::fmt::Debug for TransactionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionScope")
            .field("manager", &self.manager)
            .field("open", &self.handle.is_some())
            .finish()
    }
}

/// Run `f` inside a transaction
///
/// Commits when `f` returns `Ok`, rolls back when it returns `Err` or panics,
/// and always closes the handle. Uses the thread's transaction manager, or a
/// no-op manager when none is installed.
///
/// # Example
///
/// ```
/// use mes_infrastructure::transaction::{in_transaction, transactional};
///
/// let total = transactional(|| {
///     assert!(in_transaction());
///     transactional(|| Ok(40))
/// })
/// .map(|v| v + 2)
/// .unwrap();
/// assert_eq!(total, 42);
/// assert!(!in_transaction());
/// ```
pub fn transactional<T>(f: impl FnOnce() -> Result<T>) -> Result<T> {
    if in_transaction() {
        return f();
    }

    let manager = current_transaction_manager().unwrap_or_else(default_transaction_manager);
    let scope = TransactionScope::begin(manager.as_ref())?;
    let depth = DepthGuard::enter();
    let outcome = f();
    let finished = match &outcome {
        Ok(_) => scope.commit(),
        Err(_) => scope.rollback(),
    };
    drop(depth);

    match (outcome, finished) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(e)) | (Err(e), Ok(())) => Err(e),
        (Err(e), Err(rollback)) => {
            warn!(error = %rollback, "Rollback failed after operation error");
            Err(e)
        }
    }
}
