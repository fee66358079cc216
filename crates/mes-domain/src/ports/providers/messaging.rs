//! Message Adapter Port
//!
//! Defines the contract for publish/subscribe transports. Messages are opaque
//! JSON payloads addressed by topic string.
//!
//! ## Architecture
//!
//! Implementations (in-process bus, null adapter, external brokers) live in
//! the providers layer and are registered with the message router in the
//! infrastructure layer, which selects exactly one active adapter.

use crate::error::Result;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Callback signature invoked for every delivered message
pub type HandlerFn = dyn Fn(&Value) -> Result<()> + Send + Sync;

/// A subscriber callback with a diagnosable identity
///
/// The identity is used in delivery logs when the handler fails. It defaults
/// to the closure's type name and can be overridden with [`MessageHandler::named`].
///
/// # Example
///
/// ```
/// use mes_domain::ports::providers::MessageHandler;
/// use serde_json::json;
///
/// let handler = MessageHandler::named("on_material_received", |message| {
///     assert_eq!(message["qty"], 100);
///     Ok(())
/// });
/// assert_eq!(handler.name(), "on_material_received");
/// handler.call(&json!({"qty": 100})).unwrap();
/// ```
#[derive(Clone)]
pub struct MessageHandler {
    name: Arc<str>,
    callback: Arc<HandlerFn>,
}

impl MessageHandler {
    /// Wrap a callback, naming it after its type
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&Value) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(std::any::type_name::<F>()),
            callback: Arc::new(callback),
        }
    }

    /// Wrap a callback under an explicit name
    pub fn named<S, F>(name: S, callback: F) -> Self
    where
        S: AsRef<str>,
        F: Fn(&Value) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.as_ref()),
            callback: Arc::new(callback),
        }
    }

    /// Handler identity for diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the handler with one message
    pub fn call(&self, message: &Value) -> Result<()> {
        (self.callback)(message)
    }
}

impl fmt::Debug for MessageHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageHandler")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Message adapter interface for topic pub/sub
///
/// | Method | Purpose |
/// |--------|---------|
/// | `publish` | Deliver a message to every subscriber of a topic |
/// | `subscribe` | Register a handler for a topic |
/// | `adapter_name` | Implementation identifier for logs and diagnostics |
pub trait MessageAdapter: Send + Sync + fmt::Debug {
    /// Publish `message` to `topic`
    fn publish(&self, topic: &str, message: &Value) -> Result<()>;

    /// Register `handler` to consume messages from `topic`
    fn subscribe(&self, topic: &str, handler: MessageHandler) -> Result<()>;

    /// Get the name/identifier of this adapter implementation
    fn adapter_name(&self) -> &str;
}
