//! Monitor / unmonitor / query operations.
//!
//! Every registry change is made right next to the matching attach or detach
//! call, so "recorded" and "actually bound" cannot diverge. Expected
//! conditions (absent target, empty context, unknown literal type) degrade to
//! no-ops or `false`; only failures of the listener primitives propagate.

use std::fmt;
use std::sync::Arc;

use crate::binder::ListenerBinder;
use crate::catalog::{resolve_event_types, EventTypeResolver};
use crate::config::MonitorConfig;
use crate::context::MonitoringContext;
use crate::error::{BindError, MonitorResult};
use crate::registry::SubscriptionRegistry;
use crate::sink::EventSink;
use crate::types::EventTypes;

/// Public operation surface of the event monitor.
pub struct MonitorController<R, B> {
    resolver: R,
    binder: B,
    sink: Arc<dyn EventSink>,
    cfg: MonitorConfig,
}

/// One detach that failed during [`MonitorController::destroy_context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownFailure<T> {
    pub target: T,
    /// `None` when the failed call was a detach-all.
    pub event_type: Option<String>,
    pub error: BindError,
}

/// Outcome of [`MonitorController::destroy_context`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownReport<T> {
    /// Targets that had recorded pairs.
    pub targets: usize,
    /// Pairs removed from the platform, individually or through detach-all.
    pub detached_pairs: usize,
    pub detach_all_calls: usize,
    pub failures: Vec<TeardownFailure<T>>,
}

impl<T> TeardownReport<T> {
    fn empty() -> Self {
        Self {
            targets: 0,
            detached_pairs: 0,
            detach_all_calls: 0,
            failures: Vec::new(),
        }
    }

    /// Returns true if every detach succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl<R, B> MonitorController<R, B>
where
    R: EventTypeResolver,
    B: ListenerBinder,
{
    /// Creates a controller with the default configuration.
    pub fn new(resolver: R, binder: B, sink: Arc<dyn EventSink>) -> Self {
        Self::with_config(resolver, binder, sink, MonitorConfig::default())
    }

    pub fn with_config(resolver: R, binder: B, sink: Arc<dyn EventSink>, cfg: MonitorConfig) -> Self {
        Self {
            resolver,
            binder,
            sink,
            cfg,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &MonitorConfig {
        &self.cfg
    }

    #[must_use]
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    #[must_use]
    pub const fn binder(&self) -> &B {
        &self.binder
    }

    /// Resolves a selector into concrete event types.
    #[must_use]
    pub fn resolve(&self, types: &EventTypes) -> Vec<String> {
        let resolved = resolve_event_types(&self.resolver, types);
        if self.cfg.trace_events {
            log::trace!("resolved {types:?} to {resolved:?}");
        }
        resolved
    }

    /// Starts logging `types` fired on `target`.
    ///
    /// Absent targets and targets that cannot carry listeners are ignored.
    /// Pairs that are already monitored are skipped, so repeated calls never
    /// bind the same pair twice.
    ///
    /// # Errors
    /// Returns [`MonitorError::Bind`](crate::error::MonitorError::Bind) if the
    /// platform rejects an attach. Pairs attached before the failure stay
    /// monitored.
    pub fn monitor_events(
        &self,
        target: Option<&B::Target>,
        types: impl Into<EventTypes>,
        ctx: &mut MonitoringContext<B::Target>,
    ) -> MonitorResult<()> {
        let Some(target) = target else {
            log::debug!("monitor_events: no target");
            return Ok(());
        };
        if !self.binder.supports_listeners(target) {
            log::debug!("monitor_events: {target:?} does not accept listeners");
            return Ok(());
        }

        let types = types.into();
        let listener = ctx.ensure_dispatcher(&self.sink);
        let resolved = self.resolve(&types);
        log::debug!("monitor_events: {target:?} {} type(s) in context {}", resolved.len(), ctx.id());

        for event_type in &resolved {
            if ctx.is_monitored(target, event_type) {
                continue;
            }
            self.binder.attach(target, event_type, &listener)?;
            ctx.registry_mut().record(target, event_type);
        }

        if types.is_all() {
            ctx.registry_mut().mark_all_types(target);
        }
        Ok(())
    }

    /// Stops logging `types` fired on `target`.
    ///
    /// Only recorded pairs are detached. With [`EventTypes::All`] every pair
    /// recorded for the target is removed, including literal types outside
    /// the catalog.
    ///
    /// # Errors
    /// Returns [`MonitorError::Bind`](crate::error::MonitorError::Bind) if the
    /// platform rejects a detach. That pair stays monitored.
    pub fn unmonitor_events(
        &self,
        target: Option<&B::Target>,
        types: impl Into<EventTypes>,
        ctx: &mut MonitoringContext<B::Target>,
    ) -> MonitorResult<()> {
        if !ctx.has_subscriptions() {
            return Ok(());
        }
        let Some(target) = target else {
            return Ok(());
        };
        let Some(listener) = ctx.dispatcher().cloned() else {
            return Ok(());
        };

        let types = types.into();
        let mut resolved = self.resolve(&types);
        if types.is_all() {
            let mut extra: Vec<String> = ctx
                .registry()
                .entries_for(target)
                .into_iter()
                .filter(|t| !resolved.contains(t))
                .collect();
            extra.sort();
            resolved.extend(extra);
        }
        log::debug!("unmonitor_events: {target:?} {} type(s) in context {}", resolved.len(), ctx.id());

        for event_type in &resolved {
            if !ctx.is_monitored(target, event_type) {
                continue;
            }
            self.binder.detach(target, event_type, &listener)?;
            ctx.registry_mut().forget(target, event_type);
        }
        Ok(())
    }

    /// Monitors when `monitor` is true, unmonitors otherwise.
    ///
    /// # Errors
    /// Propagates binder failures from either direction.
    pub fn toggle_monitor_events(
        &self,
        target: Option<&B::Target>,
        types: impl Into<EventTypes>,
        monitor: bool,
        ctx: &mut MonitoringContext<B::Target>,
    ) -> MonitorResult<()> {
        if monitor {
            self.monitor_events(target, types, ctx)
        } else {
            self.unmonitor_events(target, types, ctx)
        }
    }

    /// Queries monitoring state.
    ///
    /// With `require_all`, every resolved type must be monitored (an empty
    /// resolution counts as monitored). Otherwise one monitored type is
    /// enough. A context with no subscriptions, or a target that was never
    /// monitored, always yields `false`.
    #[must_use]
    pub fn are_events_monitored(
        &self,
        target: Option<&B::Target>,
        types: impl Into<EventTypes>,
        ctx: &MonitoringContext<B::Target>,
        require_all: bool,
    ) -> bool {
        if !ctx.has_subscriptions() {
            if self.cfg.trace_events {
                log::trace!("are_events_monitored: no events monitored in context {}", ctx.id());
            }
            return false;
        }
        let Some(target) = target else {
            return false;
        };
        if ctx.registry().target_id(target).is_none() {
            return false;
        }

        let resolved = self.resolve(&types.into());
        for event_type in &resolved {
            let monitored = ctx.is_monitored(target, event_type);
            if self.cfg.trace_events {
                log::trace!("are_events_monitored: '{event_type}' monitored={monitored}");
            }
            if monitored && !require_all {
                return true;
            }
            if !monitored && require_all {
                return false;
            }
        }
        require_all
    }

    /// Detaches every recorded pair of the context and empties it.
    ///
    /// Teardown is best-effort: a failed detach is logged and reported, and
    /// the remaining pairs are still detached. Targets monitored with
    /// [`EventTypes::All`] get a single detach-all; if that fails, their pairs
    /// are detached one by one.
    pub fn destroy_context(&self, ctx: &mut MonitoringContext<B::Target>) -> TeardownReport<B::Target> {
        let mut report = TeardownReport::empty();

        let Some(listener) = ctx.take_dispatcher() else {
            *ctx.registry_mut() = SubscriptionRegistry::new();
            return report;
        };

        for target in ctx.registry().targets() {
            let Some(entry) = ctx.registry_mut().clear(&target) else {
                continue;
            };
            report.targets += 1;

            if entry.all_types {
                report.detach_all_calls += 1;
                match self.binder.detach_all(&entry.target, &listener) {
                    Ok(()) => {
                        report.detached_pairs += entry.types.len();
                        continue;
                    }
                    Err(e) => {
                        log::warn!("detach_all failed for {:?} in context {}: {}", entry.target, ctx.id(), e);
                        report.failures.push(TeardownFailure {
                            target: entry.target.clone(),
                            event_type: None,
                            error: e,
                        });
                    }
                }
            }

            let mut types: Vec<String> = entry.types.into_iter().collect();
            types.sort();
            for event_type in types {
                match self.binder.detach(&entry.target, &event_type, &listener) {
                    Ok(()) => report.detached_pairs += 1,
                    Err(e) => {
                        log::warn!(
                            "detach of '{}' failed for {:?} in context {}: {}",
                            event_type,
                            entry.target,
                            ctx.id(),
                            e
                        );
                        report.failures.push(TeardownFailure {
                            target: entry.target.clone(),
                            event_type: Some(event_type),
                            error: e,
                        });
                    }
                }
            }
        }

        log::debug!(
            "destroyed context {}: {} target(s), {} pair(s) detached, {} failure(s)",
            ctx.id(),
            report.targets,
            report.detached_pairs,
            report.failures.len()
        );
        report
    }
}

impl<R: fmt::Debug, B: fmt::Debug> fmt::Debug for MonitorController<R, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorController")
            .field("resolver", &self.resolver)
            .field("binder", &self.binder)
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}
