//! In-memory listener platform and log buffer.
//!
//! [`InMemoryBinder`] simulates an observable platform: it keeps listener
//! registrations per (target, type), counts primitive calls and can fire
//! events. [`BufferedSink`] collects log records. Both are meant for
//! embedded use, tests, and as reference implementations of the traits.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::binder::{Listener, ListenerBinder};
use crate::error::{BindError, SinkError};
use crate::event::{LogRecord, NativeEvent};
use crate::sink::EventSink;
use crate::types::ContextId;

fn lock_err(context: &'static str) -> BindError {
    BindError::Platform {
        message: format!("poisoned lock: {context}"),
    }
}

#[derive(Debug)]
struct BinderState<T> {
    listeners: HashMap<(T, String), Vec<Listener>>,
    unsupported: HashSet<T>,
    attach_calls: usize,
    detach_calls: usize,
    detach_all_calls: usize,
}

impl<T> Default for BinderState<T> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
            unsupported: HashSet::new(),
            attach_calls: 0,
            detach_calls: 0,
            detach_all_calls: 0,
        }
    }
}

/// Simulated observable platform.
///
/// Like DOM `addEventListener`, attaching the same listener twice for one
/// (target, type) keeps a single registration.
pub struct InMemoryBinder<T> {
    state: Mutex<BinderState<T>>,
}

impl<T> Default for InMemoryBinder<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(BinderState::default()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for InMemoryBinder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryBinder").finish_non_exhaustive()
    }
}

impl<T: Clone + Eq + Hash + fmt::Debug> InMemoryBinder<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self, context: &'static str) -> Result<MutexGuard<'_, BinderState<T>>, BindError> {
        self.state.lock().map_err(|_| lock_err(context))
    }

    fn read<V>(&self, f: impl FnOnce(&BinderState<T>) -> V) -> V {
        match self.state.lock() {
            Ok(guard) => f(&*guard),
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    /// Makes `target` refuse listeners, like a non-event-target object.
    pub fn mark_unsupported(&self, target: &T) {
        match self.state.lock() {
            Ok(mut guard) => {
                guard.unsupported.insert(target.clone());
            }
            Err(poisoned) => {
                poisoned.into_inner().unsupported.insert(target.clone());
            }
        }
    }

    /// Fires `event` on `target`, invoking every listener bound for its type.
    ///
    /// Returns the number of listeners invoked. Listeners run after the
    /// internal lock is released.
    pub fn fire(&self, target: &T, event: NativeEvent) -> usize {
        let key = (target.clone(), event.event_type.clone());
        let listeners: Vec<Listener> = self.read(|s| s.listeners.get(&key).cloned().unwrap_or_default());
        for listener in &listeners {
            listener.handle_event(event.clone());
        }
        listeners.len()
    }

    /// Registrations for one (target, type).
    #[must_use]
    pub fn listener_count(&self, target: &T, event_type: &str) -> usize {
        let key = (target.clone(), event_type.to_string());
        self.read(|s| s.listeners.get(&key).map_or(0, Vec::len))
    }

    /// (target, type) pairs with at least one registration.
    #[must_use]
    pub fn bound_pairs(&self) -> usize {
        self.read(|s| s.listeners.len())
    }

    #[must_use]
    pub fn attach_calls(&self) -> usize {
        self.read(|s| s.attach_calls)
    }

    #[must_use]
    pub fn detach_calls(&self) -> usize {
        self.read(|s| s.detach_calls)
    }

    #[must_use]
    pub fn detach_all_calls(&self) -> usize {
        self.read(|s| s.detach_all_calls)
    }
}

impl<T: Clone + Eq + Hash + fmt::Debug> ListenerBinder for InMemoryBinder<T> {
    type Target = T;

    fn supports_listeners(&self, target: &T) -> bool {
        self.read(|s| !s.unsupported.contains(target))
    }

    fn attach(&self, target: &T, event_type: &str, listener: &Listener) -> Result<(), BindError> {
        let mut state = self.state("attach")?;
        state.attach_calls += 1;
        if state.unsupported.contains(target) {
            return Err(BindError::Unsupported {
                target: format!("{target:?}"),
            });
        }

        let bound = state
            .listeners
            .entry((target.clone(), event_type.to_string()))
            .or_default();
        if !bound.iter().any(|l| l.id() == listener.id()) {
            bound.push(Arc::clone(listener));
        }
        Ok(())
    }

    fn detach(&self, target: &T, event_type: &str, listener: &Listener) -> Result<(), BindError> {
        let mut state = self.state("detach")?;
        state.detach_calls += 1;

        let key = (target.clone(), event_type.to_string());
        if let Some(bound) = state.listeners.get_mut(&key) {
            bound.retain(|l| l.id() != listener.id());
            if bound.is_empty() {
                state.listeners.remove(&key);
            }
        }
        Ok(())
    }

    fn detach_all(&self, target: &T, listener: &Listener) -> Result<(), BindError> {
        let mut state = self.state("detach_all")?;
        state.detach_all_calls += 1;

        state.listeners.retain(|(t, _), bound| {
            if t == target {
                bound.retain(|l| l.id() != listener.id());
            }
            !bound.is_empty()
        });
        Ok(())
    }
}

/// Sink that keeps log records in memory.
///
/// With a capacity limit, records beyond the limit are rejected.
#[derive(Debug, Default)]
pub struct BufferedSink {
    records: Mutex<Vec<LogRecord>>,
    capacity: Option<usize>,
}

impl BufferedSink {
    /// Creates an unbounded buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer that rejects records once `capacity` are held.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            capacity: Some(capacity),
        }
    }

    /// Snapshot of buffered records, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        match self.records.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().map_or(0, |guard| guard.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns every buffered record.
    pub fn drain(&self) -> Vec<LogRecord> {
        match self.records.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventSink for BufferedSink {
    fn accept(&self, record: LogRecord, _context: ContextId) -> Result<(), SinkError> {
        let mut guard = self.records.lock().map_err(|_| SinkError::Closed)?;
        if let Some(cap) = self.capacity {
            if guard.len() >= cap {
                return Err(SinkError::Rejected {
                    reason: format!("buffer full ({cap} records)"),
                });
            }
        }
        guard.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::EventDispatcher;

    fn listener(sink: &Arc<BufferedSink>) -> Listener {
        Arc::new(EventDispatcher::new(ContextId::new(), sink.clone()))
    }

    #[test]
    fn test_attach_same_listener_keeps_one_registration() {
        let sink = Arc::new(BufferedSink::new());
        let binder = InMemoryBinder::new();
        let l = listener(&sink);

        binder.attach(&"btn", "click", &l).unwrap();
        binder.attach(&"btn", "click", &l).unwrap();

        assert_eq!(binder.attach_calls(), 2);
        assert_eq!(binder.listener_count(&"btn", "click"), 1);
    }

    #[test]
    fn test_detach_matches_listener_identity() {
        let sink = Arc::new(BufferedSink::new());
        let binder = InMemoryBinder::new();
        let a = listener(&sink);
        let b = listener(&sink);

        binder.attach(&"btn", "click", &a).unwrap();
        binder.attach(&"btn", "click", &b).unwrap();
        binder.detach(&"btn", "click", &a).unwrap();

        assert_eq!(binder.listener_count(&"btn", "click"), 1);
        assert_eq!(binder.fire(&"btn", NativeEvent::new("click", "btn")), 1);
    }

    #[test]
    fn test_detach_all_only_touches_one_target_and_listener() {
        let sink = Arc::new(BufferedSink::new());
        let binder = InMemoryBinder::new();
        let a = listener(&sink);
        let b = listener(&sink);

        binder.attach(&"btn", "click", &a).unwrap();
        binder.attach(&"btn", "keydown", &a).unwrap();
        binder.attach(&"btn", "keydown", &b).unwrap();
        binder.attach(&"link", "click", &a).unwrap();

        binder.detach_all(&"btn", &a).unwrap();

        assert_eq!(binder.listener_count(&"btn", "click"), 0);
        assert_eq!(binder.listener_count(&"btn", "keydown"), 1);
        assert_eq!(binder.listener_count(&"link", "click"), 1);
        assert_eq!(binder.bound_pairs(), 2);
    }

    #[test]
    fn test_fire_without_listeners() {
        let binder: InMemoryBinder<&str> = InMemoryBinder::new();
        assert_eq!(binder.fire(&"btn", NativeEvent::new("click", "btn")), 0);
    }

    #[test]
    fn test_unsupported_target_rejects_attach() {
        let sink = Arc::new(BufferedSink::new());
        let binder = InMemoryBinder::new();
        binder.mark_unsupported(&"text");

        assert!(!binder.supports_listeners(&"text"));
        let err = binder.attach(&"text", "click", &listener(&sink)).unwrap_err();
        assert!(matches!(err, BindError::Unsupported { .. }));
    }

    #[test]
    fn test_bounded_sink_rejects_overflow() {
        let sink = BufferedSink::bounded(1);
        let ctx = ContextId::new();

        sink.accept(LogRecord::new(NativeEvent::new("click", "btn"), ctx), ctx).unwrap();
        let err = sink
            .accept(LogRecord::new(NativeEvent::new("click", "btn"), ctx), ctx)
            .unwrap_err();

        assert!(matches!(err, SinkError::Rejected { .. }));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.is_empty());
    }
}
