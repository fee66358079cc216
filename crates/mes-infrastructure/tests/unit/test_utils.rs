//! Shared test doubles

use mes_domain::error::{Error, Result};
use mes_domain::ports::providers::{MessageAdapter, MessageHandler};
use mes_domain::ports::{TransactionHandle, TransactionManager};
use mes_infrastructure::logging::{MemoryLogSink, StructuredLogLayer};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tracing_subscriber::Registry;
use tracing_subscriber::layer::SubscriberExt;

// ============================================================================
// Transactions
// ============================================================================

type EventLog = Arc<Mutex<Vec<&'static str>>>;

/// Transaction manager recording every handle call
#[derive(Debug, Default)]
pub struct RecordingTransactionManager {
    events: EventLog,
    fail_commit: bool,
}

impl RecordingTransactionManager {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing_commit() -> Arc<Self> {
        Arc::new(Self {
            fail_commit: true,
            ..Self::default()
        })
    }

    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.events().iter().filter(|e| **e == event).count()
    }
}

impl TransactionManager for RecordingTransactionManager {
    fn begin(&self) -> Result<Box<dyn TransactionHandle>> {
        self.events.lock().unwrap().push("begin");
        Ok(Box::new(RecordingHandle {
            events: Arc::clone(&self.events),
            fail_commit: self.fail_commit,
        }))
    }

    fn manager_name(&self) -> &str {
        "recording"
    }
}

struct RecordingHandle {
    events: EventLog,
    fail_commit: bool,
}

impl TransactionHandle for RecordingHandle {
    fn commit(&mut self) -> Result<()> {
        self.events.lock().unwrap().push("commit");
        if self.fail_commit {
            return Err(Error::transaction("commit refused"));
        }
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.events.lock().unwrap().push("rollback");
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.events.lock().unwrap().push("close");
        Ok(())
    }
}

// ============================================================================
// Messaging
// ============================================================================

/// Adapter standing in for an external broker
#[derive(Debug)]
pub struct RecordingAdapter {
    name: &'static str,
    published: Mutex<Vec<(String, Value)>>,
}

impl RecordingAdapter {
    pub fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            published: Mutex::new(Vec::new()),
        })
    }

    pub fn published(&self) -> Vec<(String, Value)> {
        self.published.lock().unwrap().clone()
    }
}

impl MessageAdapter for RecordingAdapter {
    fn publish(&self, topic: &str, message: &Value) -> Result<()> {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), message.clone()));
        Ok(())
    }

    fn subscribe(&self, _topic: &str, _handler: MessageHandler) -> Result<()> {
        Ok(())
    }

    fn adapter_name(&self) -> &str {
        self.name
    }
}

/// Handler counting its deliveries
pub fn counting_handler(name: &str) -> (MessageHandler, Arc<Mutex<Vec<Value>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let handler = MessageHandler::named(name, move |message| {
        sink.lock().unwrap().push(message.clone());
        Ok(())
    });
    (handler, received)
}

// ============================================================================
// Logging
// ============================================================================

/// Run `f` with a thread-scoped subscriber capturing structured records
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, Arc<MemoryLogSink>) {
    let sink = Arc::new(MemoryLogSink::new(1000));
    let subscriber = Registry::default().with(StructuredLogLayer::new(sink.clone()));
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, sink)
}
