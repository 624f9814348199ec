//! Destinations for log records.

use std::sync::Arc;

use crate::error::SinkError;
use crate::event::LogRecord;
use crate::types::ContextId;

/// Receives one [`LogRecord`] per fired event.
///
/// Fire-and-forget from the monitor's point of view: a returned error is
/// logged and counted by the dispatcher, nothing else.
pub trait EventSink: Send + Sync {
    /// Accepts a record logged under `context`.
    fn accept(&self, record: LogRecord, context: ContextId) -> Result<(), SinkError>;
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn accept(&self, record: LogRecord, context: ContextId) -> Result<(), SinkError> {
        (**self).accept(record, context)
    }
}

/// Sink that writes each record to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn accept(&self, record: LogRecord, context: ContextId) -> Result<(), SinkError> {
        log::info!(target: "eventwatch::console", "[{}] {}", context, record.summary());
        Ok(())
    }
}
