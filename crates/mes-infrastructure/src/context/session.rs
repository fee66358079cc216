//! Thread-bound session context
//!
//! Holds the tenant/site/user the current unit of work runs for, and the
//! transaction manager used by [`crate::transaction::transactional`]. Both
//! are set through scoped guards that restore the previous value on drop.

use mes_domain::ports::TransactionManager;
use mes_providers::transaction::NoopTransactionManager;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

/// Who the current unit of work runs for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Tenant identifier
    pub tenant: Option<String>,
    /// Plant site
    pub site: Option<String>,
    /// Acting user
    pub user: Option<String>,
}

impl SessionContext {
    /// Create a context with every field set
    pub fn new(
        tenant: impl Into<String>,
        site: impl Into<String>,
        user: impl Into<String>,
    ) -> Self {
        Self {
            tenant: Some(tenant.into()),
            site: Some(site.into()),
            user: Some(user.into()),
        }
    }

    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        self.tenant.is_none() && self.site.is_none() && self.user.is_none()
    }
}

thread_local! {
    static SESSION: RefCell<Option<SessionContext>> = const { RefCell::new(None) };
    static TRANSACTION_MANAGER: RefCell<Option<Arc<dyn TransactionManager>>> =
        const { RefCell::new(None) };
}

/// Session active on the current thread
pub fn current_session() -> Option<SessionContext> {
    SESSION.with(|session| session.borrow().clone())
}

/// Read the active session without cloning it
pub(crate) fn with_current_session<T>(f: impl FnOnce(Option<&SessionContext>) -> T) -> T {
    SESSION.with(|session| f(session.borrow().as_ref()))
}

/// Guard restoring the previous session on drop
#[must_use = "the session is reset when the scope is dropped"]
#[derive(Debug)]
pub struct SessionScope {
    previous: Option<SessionContext>,
    _not_send: PhantomData<*const ()>,
}

impl SessionScope {
    /// Make `session` current until the guard is dropped
    pub fn enter(session: SessionContext) -> Self {
        let previous = SESSION.with(|current| current.replace(Some(session)));
        Self {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Drop for SessionScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        SESSION.with(|current| current.replace(previous));
    }
}

/// Guard restoring the previous transaction manager on drop
#[must_use = "the transaction manager is reset when the scope is dropped"]
pub struct TransactionManagerScope {
    previous: Option<Arc<dyn TransactionManager>>,
    _not_send: PhantomData<*const ()>,
}

impl std::fmt::Debug for TransactionManagerScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionManagerScope")
            .field(
                "previous",
                &self.previous.as_ref().map(|manager| manager.manager_name()),
            )
            .finish()
    }
}

impl Drop for TransactionManagerScope {
    fn drop(&mut self) {
        let previous = self.previous.take();
        TRANSACTION_MANAGER.with(|current| current.replace(previous));
    }
}

/// Install `manager` for the current thread until the guard is dropped
pub fn set_transaction_manager(manager: Arc<dyn TransactionManager>) -> TransactionManagerScope {
    let previous = TRANSACTION_MANAGER.with(|current| current.replace(Some(manager)));
    TransactionManagerScope {
        previous,
        _not_send: PhantomData,
    }
}

/// Transaction manager installed on the current thread, if any
pub fn current_transaction_manager() -> Option<Arc<dyn TransactionManager>> {
    TRANSACTION_MANAGER.with(|current| current.borrow().clone())
}

/// Manager used when none is installed
pub fn default_transaction_manager() -> Arc<dyn TransactionManager> {
    Arc::new(NoopTransactionManager::new())
}
