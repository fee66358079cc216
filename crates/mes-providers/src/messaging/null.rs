//! Null message adapter
//!
//! Drops every published message and accepts every subscription.

use mes_domain::error::Result;
use mes_domain::ports::providers::{MessageAdapter, MessageHandler};
use mes_domain::registry::{MESSAGE_ADAPTERS, MessageAdapterConfig, MessageAdapterEntry};
use serde_json::Value;
use tracing::trace;

/// Message adapter that delivers nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMessageAdapter;

impl NullMessageAdapter {
    /// Create a new null adapter
    pub fn new() -> Self {
        Self
    }
}

impl MessageAdapter for NullMessageAdapter {
    fn publish(&self, topic: &str, _message: &Value) -> Result<()> {
        trace!(topic, "Dropped message");
        Ok(())
    }

    fn subscribe(&self, _topic: &str, _handler: MessageHandler) -> Result<()> {
        Ok(())
    }

    fn adapter_name(&self) -> &str {
        "null"
    }
}

#[linkme::distributed_slice(MESSAGE_ADAPTERS)]
static NULL_ADAPTER: MessageAdapterEntry = MessageAdapterEntry {
    name: "null",
    description: "Adapter that drops every message",
    factory: |_config: &MessageAdapterConfig| Ok(std::sync::Arc::new(NullMessageAdapter::new())),
};
