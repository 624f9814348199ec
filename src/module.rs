//! Host integration.
//!
//! The host composes [`EventMonitor`] through two narrow traits: [`Module`]
//! for session lifecycle and [`UiListener`] for context-menu contributions.

use crate::binder::ListenerBinder;
use crate::catalog::EventTypeResolver;
use crate::context::MonitoringContext;
use crate::controller::{MonitorController, TeardownReport};
use crate::menu::MenuItem;

/// Where the host keeps the UI listeners it notifies.
pub trait UiListenerRegistry {
    fn register_ui_listener(&mut self, name: &'static str);
    fn unregister_ui_listener(&mut self, name: &'static str);
}

/// Session lifecycle hooks called by the host.
pub trait Module {
    /// Target handle type of the sessions this module tracks.
    type Target;

    /// Name the host uses to route notifications.
    fn dispatch_name(&self) -> &'static str;

    fn initialize(&mut self, host: &mut dyn UiListenerRegistry);

    fn shutdown(&mut self, host: &mut dyn UiListenerRegistry);

    /// Called once when a session ends, before its context is dropped.
    fn destroy_context(&self, context: &mut MonitoringContext<Self::Target>) -> TeardownReport<Self::Target>;
}

/// UI notifications the host forwards to registered listeners.
pub trait UiListener {
    type Target;

    /// Entries to add to the context menu opened on `target` in `panel`.
    fn on_context_menu(
        &self,
        target: &Self::Target,
        panel: &str,
        context: &MonitoringContext<Self::Target>,
    ) -> Vec<MenuItem>;
}

/// The event monitor as a host component.
#[derive(Debug)]
pub struct EventMonitor<R, B> {
    controller: MonitorController<R, B>,
    registered: bool,
}

impl<R, B> EventMonitor<R, B>
where
    R: EventTypeResolver,
    B: ListenerBinder,
{
    pub const DISPATCH_NAME: &'static str = "eventMonitor";

    #[must_use]
    pub const fn new(controller: MonitorController<R, B>) -> Self {
        Self {
            controller,
            registered: false,
        }
    }

    /// Returns true between `initialize` and `shutdown`.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        self.registered
    }

    #[must_use]
    pub const fn controller(&self) -> &MonitorController<R, B> {
        &self.controller
    }
}

impl<R, B> Module for EventMonitor<R, B>
where
    R: EventTypeResolver,
    B: ListenerBinder,
{
    type Target = B::Target;

    fn dispatch_name(&self) -> &'static str {
        Self::DISPATCH_NAME
    }

    fn initialize(&mut self, host: &mut dyn UiListenerRegistry) {
        if !self.registered {
            host.register_ui_listener(Self::DISPATCH_NAME);
            self.registered = true;
        }
    }

    fn shutdown(&mut self, host: &mut dyn UiListenerRegistry) {
        if self.registered {
            host.unregister_ui_listener(Self::DISPATCH_NAME);
            self.registered = false;
        }
    }

    fn destroy_context(&self, context: &mut MonitoringContext<B::Target>) -> TeardownReport<B::Target> {
        self.controller.destroy_context(context)
    }
}

impl<R, B> UiListener for EventMonitor<R, B>
where
    R: EventTypeResolver,
    B: ListenerBinder,
{
    type Target = B::Target;

    fn on_context_menu(
        &self,
        target: &B::Target,
        panel: &str,
        context: &MonitoringContext<B::Target>,
    ) -> Vec<MenuItem> {
        self.controller.context_menu(target, panel, context)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::EventCatalog;
    use crate::memory::{BufferedSink, InMemoryBinder};

    #[derive(Default)]
    struct Host {
        listeners: Vec<&'static str>,
    }

    impl UiListenerRegistry for Host {
        fn register_ui_listener(&mut self, name: &'static str) {
            self.listeners.push(name);
        }

        fn unregister_ui_listener(&mut self, name: &'static str) {
            self.listeners.retain(|n| *n != name);
        }
    }

    fn monitor() -> EventMonitor<EventCatalog, InMemoryBinder<&'static str>> {
        EventMonitor::new(MonitorController::new(
            EventCatalog::default(),
            InMemoryBinder::new(),
            Arc::new(BufferedSink::new()),
        ))
    }

    #[test]
    fn test_lifecycle_registers_once() {
        let mut host = Host::default();
        let mut module = monitor();

        module.initialize(&mut host);
        module.initialize(&mut host);
        assert_eq!(host.listeners, vec!["eventMonitor"]);
        assert!(module.is_registered());

        module.shutdown(&mut host);
        assert!(host.listeners.is_empty());
        assert!(!module.is_registered());
    }

    #[test]
    fn test_destroy_context_through_module() {
        let module = monitor();
        let mut ctx = MonitoringContext::new("t");
        module.controller().monitor_events(Some(&"btn"), "mouse", &mut ctx).unwrap();

        let report = module.destroy_context(&mut ctx);

        assert!(report.is_clean());
        assert!(!ctx.has_subscriptions());
        assert_eq!(module.controller().binder().bound_pairs(), 0);
    }

    #[test]
    fn test_context_menu_through_ui_listener() {
        let module = monitor();
        let ctx = MonitoringContext::new("t");
        let items = module.on_context_menu(&"btn", "html", &ctx);
        assert_eq!(items.len(), 1);
        assert!(!items[0].checked);
    }
}
