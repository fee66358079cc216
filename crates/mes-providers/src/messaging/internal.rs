//! In-process message bus
//!
//! Synchronous topic pub/sub for a single process. Handlers run on the
//! publishing thread, in subscription order.
//!
//! ## Delivery
//!
//! - The subscriber list is snapshotted under the lock and invoked outside
//!   it, so a handler may publish or subscribe without deadlocking.
//! - One failing handler never blocks delivery to the others: errors and
//!   panics are logged per handler and swallowed.
//! - Publishing to a topic without subscribers is a silent no-op.
//! - Any string is a valid topic, the empty string included.

use mes_domain::error::{Error, Result};
use mes_domain::ports::providers::{MessageAdapter, MessageHandler};
use mes_domain::registry::{MESSAGE_ADAPTERS, MessageAdapterConfig, MessageAdapterEntry};
use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info};

/// Process-local message adapter
///
/// # Example
///
/// ```
/// use mes_domain::ports::providers::{MessageAdapter, MessageHandler};
/// use mes_providers::messaging::InternalBus;
/// use serde_json::json;
///
/// let bus = InternalBus::new();
/// bus.subscribe(
///     "mes.material.received",
///     MessageHandler::named("stock", |message| {
///         assert_eq!(message["lot"], "L-7");
///         Ok(())
///     }),
/// )
/// .unwrap();
/// bus.publish("mes.material.received", &json!({"lot": "L-7"})).unwrap();
/// ```
#[derive(Default)]
pub struct InternalBus {
    subscribers: Mutex<HashMap<String, Vec<MessageHandler>>>,
}

impl InternalBus {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Create as Arc for sharing
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<MessageHandler>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of handlers subscribed to `topic`
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.lock().get(topic).map_or(0, Vec::len)
    }

    /// Topics with at least one subscriber, sorted
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self.lock().keys().cloned().collect();
        topics.sort();
        topics
    }

    fn deliver(topic: &str, handler: &MessageHandler, message: &Value) {
        let outcome = catch_unwind(AssertUnwindSafe(|| handler.call(message)));
        let failure = match outcome {
            Ok(Ok(())) => return,
            Ok(Err(e)) => Error::delivery(topic, handler.name(), e.to_string()),
            Err(payload) => Error::delivery(topic, handler.name(), panic_message(&*payload)),
        };
        error!(topic, handler = handler.name(), error = %failure, "Handler failed");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}

impl std::fmt::Debug for InternalBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalBus")
            .field("topics", &self.lock().len())
            .finish()
    }
}

impl MessageAdapter for InternalBus {
    fn publish(&self, topic: &str, message: &Value) -> Result<()> {
        let handlers = self.lock().get(topic).cloned().unwrap_or_default();
        if handlers.is_empty() {
            debug!(topic, "Published message but no subscribers");
            return Ok(());
        }

        debug!(topic, subscribers = handlers.len(), "Publishing message");
        for handler in &handlers {
            Self::deliver(topic, handler, message);
        }
        Ok(())
    }

    fn subscribe(&self, topic: &str, handler: MessageHandler) -> Result<()> {
        let handler_name = handler.name().to_string();
        let count = {
            let mut subscribers = self.lock();
            let handlers = subscribers.entry(topic.to_string()).or_default();
            handlers.push(handler);
            handlers.len()
        };
        info!(topic, handler = %handler_name, handlers = count, "Subscribed handler");
        Ok(())
    }

    fn adapter_name(&self) -> &str {
        "internal"
    }
}

#[linkme::distributed_slice(MESSAGE_ADAPTERS)]
static INTERNAL_ADAPTER: MessageAdapterEntry = MessageAdapterEntry {
    name: "internal",
    description: "In-process synchronous pub/sub bus",
    factory: |_config: &MessageAdapterConfig| Ok(Arc::new(InternalBus::new())),
};
