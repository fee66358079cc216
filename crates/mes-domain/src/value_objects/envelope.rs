//! Canonical messaging envelope
//!
//! Transport-agnostic wrapper for domain events published through the router.
//! Serialized with camelCase keys so external consumers see
//! `{correlationId, timestamp, verb, noun, data, attributes}`.

use super::ids::{CORRELATION_ID_PREFIX, new_id};
use crate::error::Result;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current UTC time as ISO-8601 with second precision and a `Z` suffix
pub fn utc_now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Immutable message envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEnvelope {
    /// Correlation id tying the event to the operation that produced it
    pub correlation_id: String,
    /// Creation time (ISO-8601 UTC)
    pub timestamp: String,
    /// Action, e.g. "receive"
    pub verb: String,
    /// Subject, e.g. "material"
    pub noun: String,
    /// Event payload
    pub data: Value,
    /// Free-form transport attributes
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl MessageEnvelope {
    /// Create an envelope with a fresh correlation id
    pub fn new<V: Into<String>, N: Into<String>>(verb: V, noun: N, data: Value) -> Self {
        Self {
            correlation_id: new_id(Some(CORRELATION_ID_PREFIX)),
            timestamp: utc_now_iso(),
            verb: verb.into(),
            noun: noun.into(),
            data,
            attributes: Map::new(),
        }
    }

    /// Use an existing correlation id
    pub fn with_correlation_id<S: Into<String>>(mut self, correlation_id: S) -> Self {
        self.correlation_id = correlation_id.into();
        self
    }

    /// Attach one transport attribute
    pub fn with_attribute<K: Into<String>>(mut self, key: K, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Serialize into the JSON shape delivered to subscribers
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Parse a delivered message back into an envelope
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self::deserialize(value)?)
    }
}
