//! Listener primitives of the observable platform.

use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use crate::dispatch::EventDispatcher;
use crate::error::BindError;

/// Handle passed to the platform when a listener is attached.
///
/// Every pair monitored in one context shares the same handle, so
/// [`ListenerBinder::detach`] can match on [`EventDispatcher::id`].
pub type Listener = Arc<EventDispatcher>;

/// Attach/detach operations on native observable objects.
///
/// Implementations own the mapping from a [`Listener`] to whatever the host
/// platform registers; the monitor never calls these speculatively, so
/// `detach` is only invoked for pairs that were attached through `attach`.
pub trait ListenerBinder {
    /// Handle identifying an observable object.
    type Target: Clone + Eq + Hash + fmt::Debug;

    /// Returns false for objects that cannot carry listeners.
    fn supports_listeners(&self, target: &Self::Target) -> bool;

    /// Registers `listener` for `event_type` on `target`.
    fn attach(&self, target: &Self::Target, event_type: &str, listener: &Listener) -> Result<(), BindError>;

    /// Removes the registration made by `attach`.
    fn detach(&self, target: &Self::Target, event_type: &str, listener: &Listener) -> Result<(), BindError>;

    /// Removes every registration of `listener` on `target`.
    fn detach_all(&self, target: &Self::Target, listener: &Listener) -> Result<(), BindError>;
}

impl<B: ListenerBinder + ?Sized> ListenerBinder for &B {
    type Target = B::Target;

    fn supports_listeners(&self, target: &Self::Target) -> bool {
        (**self).supports_listeners(target)
    }

    fn attach(&self, target: &Self::Target, event_type: &str, listener: &Listener) -> Result<(), BindError> {
        (**self).attach(target, event_type, listener)
    }

    fn detach(&self, target: &Self::Target, event_type: &str, listener: &Listener) -> Result<(), BindError> {
        (**self).detach(target, event_type, listener)
    }

    fn detach_all(&self, target: &Self::Target, listener: &Listener) -> Result<(), BindError> {
        (**self).detach_all(target, listener)
    }
}

impl<B: ListenerBinder + ?Sized> ListenerBinder for Arc<B> {
    type Target = B::Target;

    fn supports_listeners(&self, target: &Self::Target) -> bool {
        (**self).supports_listeners(target)
    }

    fn attach(&self, target: &Self::Target, event_type: &str, listener: &Listener) -> Result<(), BindError> {
        (**self).attach(target, event_type, listener)
    }

    fn detach(&self, target: &Self::Target, event_type: &str, listener: &Listener) -> Result<(), BindError> {
        (**self).detach(target, event_type, listener)
    }

    fn detach_all(&self, target: &Self::Target, listener: &Listener) -> Result<(), BindError> {
        (**self).detach_all(target, listener)
    }
}
