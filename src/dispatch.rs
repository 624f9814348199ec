//! Per-context dispatch listener.
//!
//! Each monitoring context owns exactly one [`EventDispatcher`], created on
//! the first monitor call. Every (target, type) pair in that context is bound
//! to it, so its identity stays stable for detach.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::event::{LogRecord, NativeEvent};
use crate::sink::EventSink;
use crate::types::{ContextId, ListenerId};

/// Wraps fired events into log records and forwards them to a sink.
pub struct EventDispatcher {
    id: ListenerId,
    context: ContextId,
    sink: Arc<dyn EventSink>,
    delivered: AtomicU64,
    dropped: AtomicU64,
}

impl EventDispatcher {
    /// Creates a dispatcher for `context`.
    #[must_use]
    pub fn new(context: ContextId, sink: Arc<dyn EventSink>) -> Self {
        Self {
            id: ListenerId::new(),
            context,
            sink,
            delivered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Listener identity used by binders to match detach calls.
    #[must_use]
    pub const fn id(&self) -> ListenerId {
        self.id
    }

    /// The context this dispatcher logs for.
    #[must_use]
    pub const fn context(&self) -> ContextId {
        self.context
    }

    /// Handles one fired event.
    ///
    /// Sink failures stop here: they are logged and counted, and the
    /// listener binding is unaffected.
    pub fn handle_event(&self, event: NativeEvent) {
        let record = LogRecord::new(event, self.context);
        match self.sink.accept(record, self.context) {
            Ok(()) => {
                self.delivered.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                log::warn!("event log record dropped for context {}: {}", self.context, e);
            }
        }
    }

    #[must_use]
    pub fn delivered_records(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn dropped_records(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("id", &self.id)
            .field("context", &self.context)
            .field("delivered", &self.delivered_records())
            .field("dropped", &self.dropped_records())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SinkError;
    use crate::memory::BufferedSink;

    struct RejectingSink;

    impl EventSink for RejectingSink {
        fn accept(&self, _record: LogRecord, _context: ContextId) -> Result<(), SinkError> {
            Err(SinkError::Closed)
        }
    }

    #[test]
    fn test_dispatch_forwards_record_with_context() {
        let sink = Arc::new(BufferedSink::new());
        let ctx = ContextId::new();
        let dispatcher = EventDispatcher::new(ctx, sink.clone());

        dispatcher.handle_event(NativeEvent::new("click", "btn"));

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].context(), ctx);
        assert_eq!(records[0].event_type(), "click");
        assert_eq!(dispatcher.delivered_records(), 1);
        assert_eq!(dispatcher.dropped_records(), 0);
    }

    #[test]
    fn test_sink_failure_is_contained() {
        let dispatcher = EventDispatcher::new(ContextId::new(), Arc::new(RejectingSink));

        dispatcher.handle_event(NativeEvent::new("click", "btn"));
        dispatcher.handle_event(NativeEvent::new("mouseup", "btn"));

        assert_eq!(dispatcher.dropped_records(), 2);
        assert_eq!(dispatcher.delivered_records(), 0);
    }

    #[test]
    fn test_listener_ids_differ_per_dispatcher() {
        let sink: Arc<dyn EventSink> = Arc::new(BufferedSink::new());
        let a = EventDispatcher::new(ContextId::new(), Arc::clone(&sink));
        let b = EventDispatcher::new(ContextId::new(), sink);
        assert_ne!(a.id(), b.id());
    }
}
