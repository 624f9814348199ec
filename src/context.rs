//! Monitoring contexts.

use std::hash::Hash;
use std::sync::Arc;

use crate::binder::Listener;
use crate::dispatch::EventDispatcher;
use crate::registry::SubscriptionRegistry;
use crate::sink::EventSink;
use crate::types::ContextId;

/// State of one debugging session.
///
/// Owns the session's subscription registry and its single dispatch
/// listener. Before a context is dropped, pass it to
/// [`MonitorController::destroy_context`](crate::controller::MonitorController::destroy_context)
/// or listeners stay bound on the platform.
#[derive(Debug)]
pub struct MonitoringContext<T> {
    id: ContextId,
    label: String,
    dispatcher: Option<Listener>,
    registry: SubscriptionRegistry<T>,
}

impl<T: Clone + Eq + Hash> MonitoringContext<T> {
    /// Starts a new session.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: ContextId::new(),
            label: label.into(),
            dispatcher: None,
            registry: SubscriptionRegistry::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> ContextId {
        self.id
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The dispatch listener, if one has been created.
    #[must_use]
    pub const fn dispatcher(&self) -> Option<&Listener> {
        self.dispatcher.as_ref()
    }

    /// Returns the dispatch listener, creating it on first use.
    pub fn ensure_dispatcher(&mut self, sink: &Arc<dyn EventSink>) -> Listener {
        let id = self.id;
        Arc::clone(
            self.dispatcher
                .get_or_insert_with(|| Arc::new(EventDispatcher::new(id, Arc::clone(sink)))),
        )
    }

    pub(crate) fn take_dispatcher(&mut self) -> Option<Listener> {
        self.dispatcher.take()
    }

    #[must_use]
    pub const fn registry(&self) -> &SubscriptionRegistry<T> {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut SubscriptionRegistry<T> {
        &mut self.registry
    }

    /// Returns true if any pair is monitored in this context.
    #[must_use]
    pub fn has_subscriptions(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Returns true if `event_type` is monitored for `target`.
    #[must_use]
    pub fn is_monitored(&self, target: &T, event_type: &str) -> bool {
        self.registry.is_monitored(target, event_type)
    }
}
