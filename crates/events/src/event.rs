//! The audit event record.

use applica_core::types::Timestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Keys owned by the envelope; payload entries with these names are dropped.
const RESERVED_KEYS: &[&str] = &["eventName", "timestamp"];

/// A single audit record.
///
/// Serializes flat: `{"eventName": ..., <payload fields>, "timestamp": ...}`.
/// Constructed via [`AuditEvent::new`] and enriched with
/// [`with_field`](AuditEvent::with_field) and
/// [`with_payload`](AuditEvent::with_payload).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    /// Event name, e.g. `"mission_complete"`.
    pub event_name: String,

    /// Event-specific fields, flattened into the record.
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,

    /// When the event was recorded (UTC).
    pub timestamp: Timestamp,
}

impl AuditEvent {
    /// Create an event with an empty payload, stamped now.
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: event_name.into(),
            payload: serde_json::Map::new(),
            timestamp: Utc::now(),
        }
    }

    /// Add one payload field.
    pub fn with_field(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        if !RESERVED_KEYS.contains(&key) {
            self.payload.insert(key.to_string(), value.into());
        }
        self
    }

    /// Merge a JSON payload into the event.
    ///
    /// Object payloads are merged field by field; any other value is stored
    /// under `"value"`.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        match payload {
            serde_json::Value::Object(map) => {
                for (key, value) in map {
                    self = self.with_field(&key, value);
                }
            }
            serde_json::Value::Null => {}
            other => {
                self.payload.insert("value".to_string(), other);
            }
        }
        self
    }

    /// Look up a payload field.
    pub fn field(&self, key: &str) -> Option<&serde_json::Value> {
        self.payload.get(key)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
