//! Context-menu integration.
//!
//! Supplies the state of the "log events" menu for a target: one master
//! checkbox for all events with one sub-item per event family. Rendering is
//! left to the host; it gets descriptors back and reports clicks through
//! [`MonitorController::apply_menu_command`].

use serde::{Deserialize, Serialize};

use crate::binder::ListenerBinder;
use crate::catalog::EventTypeResolver;
use crate::context::MonitoringContext;
use crate::controller::MonitorController;
use crate::error::MonitorResult;
use crate::types::EventTypes;

/// Id of the master "log all events" entry.
pub const LOG_ALL_MENU_ID: &str = "fbShowEventsInConsole";

/// Action carried by a menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuCommand {
    /// Monitor or unmonitor every known event type.
    ToggleAll,
    /// Monitor or unmonitor one family.
    ToggleFamily { family: String },
}

/// A checkbox entry of the context menu.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub tooltip: String,
    pub checked: bool,
    pub command: MenuCommand,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<MenuItem>,
}

impl<R, B> MonitorController<R, B>
where
    R: EventTypeResolver,
    B: ListenerBinder,
{
    /// Builds the event-logging entries for `target` shown in `panel`.
    ///
    /// Panels other than the configured one get no entries. The master entry
    /// is checked when any event is monitored; a family entry is checked when
    /// the whole family is.
    #[must_use]
    pub fn context_menu(
        &self,
        target: &B::Target,
        panel: &str,
        ctx: &MonitoringContext<B::Target>,
    ) -> Vec<MenuItem> {
        if panel != self.config().menu_panel {
            return Vec::new();
        }

        let families = self
            .resolver()
            .families()
            .into_iter()
            .map(|family| MenuItem {
                id: format!("monitor{family}Events"),
                label: family.clone(),
                tooltip: format!("Monitor {family} events"),
                checked: self.are_events_monitored(Some(target), family.as_str(), ctx, true),
                command: MenuCommand::ToggleFamily { family },
                items: Vec::new(),
            })
            .collect();

        vec![MenuItem {
            id: LOG_ALL_MENU_ID.to_string(),
            label: self.config().log_all_label.clone(),
            tooltip: self.config().log_all_tooltip.clone(),
            checked: self.are_events_monitored(Some(target), EventTypes::All, ctx, false),
            command: MenuCommand::ToggleAll,
            items: families,
        }]
    }

    /// Applies a menu click; `checked` is the entry's new state.
    ///
    /// Returns the refreshed checked state of the master entry.
    ///
    /// # Errors
    /// Propagates binder failures.
    pub fn apply_menu_command(
        &self,
        target: &B::Target,
        command: &MenuCommand,
        checked: bool,
        ctx: &mut MonitoringContext<B::Target>,
    ) -> MonitorResult<bool> {
        match command {
            MenuCommand::ToggleAll => self.toggle_monitor_events(Some(target), EventTypes::All, checked, ctx)?,
            MenuCommand::ToggleFamily { family } => {
                self.toggle_monitor_events(Some(target), family.as_str(), checked, ctx)?;
            }
        }
        Ok(self.are_events_monitored(Some(target), EventTypes::All, ctx, false))
    }
}
