//! Fired events and the log records produced from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ContextId;

/// An event as delivered by the observable platform.
///
/// `target` is an opaque reference the rendering layer can resolve back to
/// the object the event was dispatched on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeEvent {
    pub event_type: String,
    pub target: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub detail: serde_json::Value,
}

impl NativeEvent {
    /// Creates an event fired now, without detail.
    #[must_use]
    pub fn new(event_type: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: target.into(),
            timestamp: Utc::now(),
            detail: serde_json::Value::Null,
        }
    }

    /// Attaches platform-specific detail (coordinates, key codes, ...).
    #[must_use]
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = detail;
        self
    }
}

/// One logged event, handed to an [`EventSink`](crate::sink::EventSink).
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    record_id: Uuid,
    context: ContextId,
    logged_at: DateTime<Utc>,
    event: NativeEvent,
}

impl LogRecord {
    /// Wraps a fired event for the given context.
    #[must_use]
    pub fn new(event: NativeEvent, context: ContextId) -> Self {
        Self {
            record_id: Uuid::new_v4(),
            context,
            logged_at: Utc::now(),
            event,
        }
    }

    #[must_use]
    pub const fn record_id(&self) -> Uuid {
        self.record_id
    }

    #[must_use]
    pub const fn context(&self) -> ContextId {
        self.context
    }

    #[must_use]
    pub const fn logged_at(&self) -> DateTime<Utc> {
        self.logged_at
    }

    #[must_use]
    pub const fn event(&self) -> &NativeEvent {
        &self.event
    }

    #[must_use]
    pub fn event_type(&self) -> &str {
        &self.event.event_type
    }

    /// Reference to the object the event fired on.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.event.target
    }

    /// One-line summary: event type followed by its target.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{} \u{bb} {}", self.event.event_type, self.event.target)
    }
}
