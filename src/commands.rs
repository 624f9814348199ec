//! Console command surface.
//!
//! `monitorEvents(object, types)` and `unmonitorEvents(object, types)` as
//! invocable from a console command line. Argument parsing belongs to the
//! host; handlers get already-evaluated [`CommandArgs`].

use serde::{Deserialize, Serialize};

use crate::binder::ListenerBinder;
use crate::catalog::EventTypeResolver;
use crate::config::MonitorConfig;
use crate::context::MonitoringContext;
use crate::controller::MonitorController;
use crate::error::MonitorResult;
use crate::types::EventTypes;

pub const MONITOR_EVENTS: &str = "monitorEvents";
pub const UNMONITOR_EVENTS: &str = "unmonitorEvents";

/// Value a command hands back to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsoleValue {
    /// The "no useful value" marker; the console prints nothing for it.
    Default,
}

/// Registration data for one console command.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub name: String,
    pub help_url: String,
    /// Locale key of the help text.
    pub description: String,
}

/// Evaluated arguments of `monitorEvents` / `unmonitorEvents`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgs<T> {
    pub target: Option<T>,
    pub types: EventTypes,
}

impl<T> CommandArgs<T> {
    #[must_use]
    pub fn new(target: Option<T>, types: impl Into<EventTypes>) -> Self {
        Self {
            target,
            types: types.into(),
        }
    }
}

/// Commands provided by the event monitor.
#[must_use]
pub fn command_specs(cfg: &MonitorConfig) -> Vec<CommandSpec> {
    [MONITOR_EVENTS, UNMONITOR_EVENTS]
        .into_iter()
        .map(|name| CommandSpec {
            name: name.to_string(),
            help_url: cfg.help_url(name),
            description: format!("console.cmd.help.{name}"),
        })
        .collect()
}

impl<R, B> MonitorController<R, B>
where
    R: EventTypeResolver,
    B: ListenerBinder,
{
    /// Handler of `monitorEvents`.
    ///
    /// # Errors
    /// Propagates binder failures.
    pub fn monitor_events_command(
        &self,
        ctx: &mut MonitoringContext<B::Target>,
        args: CommandArgs<B::Target>,
    ) -> MonitorResult<ConsoleValue> {
        self.monitor_events(args.target.as_ref(), args.types, ctx)?;
        Ok(ConsoleValue::Default)
    }

    /// Handler of `unmonitorEvents`.
    ///
    /// # Errors
    /// Propagates binder failures.
    pub fn unmonitor_events_command(
        &self,
        ctx: &mut MonitoringContext<B::Target>,
        args: CommandArgs<B::Target>,
    ) -> MonitorResult<ConsoleValue> {
        self.unmonitor_events(args.target.as_ref(), args.types, ctx)?;
        Ok(ConsoleValue::Default)
    }

    /// Runs a command by name; `None` if the name is not one of ours.
    ///
    /// # Errors
    /// Propagates binder failures.
    pub fn run_command(
        &self,
        name: &str,
        ctx: &mut MonitoringContext<B::Target>,
        args: CommandArgs<B::Target>,
    ) -> MonitorResult<Option<ConsoleValue>> {
        match name {
            MONITOR_EVENTS => self.monitor_events_command(ctx, args).map(Some),
            UNMONITOR_EVENTS => self.unmonitor_events_command(ctx, args).map(Some),
            _ => Ok(None),
        }
    }
}
