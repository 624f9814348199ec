//! Monitor configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Settings for [`MonitorController`](crate::controller::MonitorController)
/// and its UI integration.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Emit trace-level logs for type resolution and per-type checks.
    pub trace_events: bool,
    /// Panel whose context menu gets the event-logging entries.
    pub menu_panel: String,
    pub log_all_label: String,
    pub log_all_tooltip: String,
    /// Prefix of the help URLs attached to console commands.
    pub help_base_url: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            trace_events: false,
            menu_panel: "html".to_string(),
            log_all_label: "ShowEventsInConsole".to_string(),
            log_all_tooltip: "html.tip.Show_Events_In_Console".to_string(),
            help_base_url: "http://getfirebug.com/wiki/index.php/".to_string(),
        }
    }
}

impl MonitorConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.menu_panel.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "menu_panel".to_string(),
                reason: "cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Help URL for a console command.
    #[must_use]
    pub fn help_url(&self, command: &str) -> String {
        format!("{}{}", self.help_base_url, command)
    }
}
