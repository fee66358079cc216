//! Structured log record

use serde::Serialize;
use serde_json::{Map, Value};

/// One rendered log event
///
/// Serializes as
/// `{"ts", "level", "logger", "message", "correlationId", "tenant"?, "site"?, "user"?, ...fields}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// Milliseconds since the Unix epoch
    pub ts: i64,
    /// Level name (ERROR, WARN, INFO, DEBUG, TRACE)
    pub level: String,
    /// Emitting component (the event target)
    pub logger: String,
    /// Event message
    pub message: String,
    /// Correlation id active when the event was emitted
    #[serde(rename = "correlationId")]
    pub correlation_id: Option<String>,
    /// Session tenant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    /// Session site
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    /// Session user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Remaining event fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl LogRecord {
    /// Field value by name
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Render as a single JSON line
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"message\":{:?}}}", self.message))
    }
}
