//! Thread-bound correlation id
//!
//! Every log record emitted while a [`CorrelationScope`] is alive carries its
//! id. Scopes nest: leaving a scope restores exactly the id that was active
//! when it was entered, including "no id".

use mes_domain::value_objects::{MessageEnvelope, new_id};
use serde_json::Value;
use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    static CORRELATION_ID: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Correlation id active on the current thread, if any
pub fn current_correlation_id() -> Option<String> {
    CORRELATION_ID.with(|current| current.borrow().clone())
}

fn replace_correlation_id(id: Option<String>) -> Option<String> {
    CORRELATION_ID.with(|current| current.replace(id))
}

/// Guard that establishes a correlation id for its lifetime
///
/// The id is chosen as: the explicit id if given, else the id already active
/// on this thread, else a freshly generated UUID.
///
/// # Example
///
/// ```
/// use mes_infrastructure::context::{CorrelationScope, current_correlation_id};
///
/// assert_eq!(current_correlation_id(), None);
/// {
///     let outer = CorrelationScope::enter(Some("req-1"));
///     assert_eq!(outer.id(), "req-1");
///     {
///         let inner = CorrelationScope::enter(None);
///         assert_eq!(inner.id(), "req-1");
///     }
/// }
/// assert_eq!(current_correlation_id(), None);
/// ```
#[must_use = "the correlation id is reset when the scope is dropped"]
pub struct CorrelationScope {
    id: String,
    previous: Option<String>,
    // Restoring on another thread would corrupt both threads' context
    _not_send: PhantomData<*const ()>,
}

impl CorrelationScope {
    /// Enter a scope, resolving the id as described on the type
    pub fn enter(id: Option<&str>) -> Self {
        let previous = current_correlation_id();
        let id = id
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| previous.clone())
            .unwrap_or_else(|| new_id(None));
        replace_correlation_id(Some(id.clone()));
        Self {
            id,
            previous,
            _not_send: PhantomData,
        }
    }

    /// The id active inside this scope
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for CorrelationScope {
    fn drop(&mut self) {
        replace_correlation_id(self.previous.take());
    }
}

impl std::fmt::Debug for CorrelationScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorrelationScope")
            .field("id", &self.id)
            .field("previous", &self.previous)
            .finish()
    }
}

/// Run `f` with a correlation id established on the current thread
pub fn with_correlation<T>(id: Option<&str>, f: impl FnOnce() -> T) -> T {
    let _scope = CorrelationScope::enter(id);
    f()
}

/// Build an envelope stamped with the thread's correlation id
///
/// Falls back to a fresh `corr-` prefixed id outside any scope.
pub fn make_envelope(verb: &str, noun: &str, data: Value) -> MessageEnvelope {
    let envelope = MessageEnvelope::new(verb, noun, data);
    match current_correlation_id() {
        Some(id) => envelope.with_correlation_id(id),
        None => envelope,
    }
}
