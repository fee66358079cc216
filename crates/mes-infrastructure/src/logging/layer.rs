//! Tracing layer rendering events as structured records
//!
//! Each event is flattened into a [`LogRecord`], enriched with the thread's
//! correlation id and session, and handed to a [`LogSink`].

use super::record::LogRecord;
use super::sink::LogSink;
use crate::context::correlation::current_correlation_id;
use crate::context::session::with_current_session;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Layer that writes [`LogRecord`]s to a sink
pub struct StructuredLogLayer {
    sink: Arc<dyn LogSink>,
    min_level: Level,
}

impl StructuredLogLayer {
    /// Capture every event into `sink`
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self::with_min_level(sink, Level::TRACE)
    }

    /// Capture events at `min_level` or more severe
    pub fn with_min_level(sink: Arc<dyn LogSink>, min_level: Level) -> Self {
        Self { sink, min_level }
    }
}

impl std::fmt::Debug for StructuredLogLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuredLogLayer")
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

impl<S> Layer<S> for StructuredLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = *metadata.level();
        if level > self.min_level {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let record = with_current_session(|session| LogRecord {
            ts: chrono::Utc::now().timestamp_millis(),
            level: level.to_string(),
            logger: metadata.target().to_string(),
            message: visitor.message,
            correlation_id: current_correlation_id(),
            tenant: session.and_then(|s| s.tenant.clone()),
            site: session.and_then(|s| s.site.clone()),
            user: session.and_then(|s| s.user.clone()),
            fields: visitor.fields,
        });
        self.sink.write(&record);
    }
}

/// Collects the message and typed fields of one event
#[derive(Default)]
struct FieldVisitor {
    message: String,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.insert(field, Value::from(value));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, Value::from(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.insert(field, Value::from(format!("{value:?}")));
        }
    }
}
