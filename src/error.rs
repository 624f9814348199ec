//! Error types for eventwatch.
//!
//! Expected conditions (absent targets, empty contexts, unknown literal event
//! types) are never errors. Only failures of the listener primitives, bad
//! configuration and internal invariant violations surface here.

use thiserror::Error;

/// Failures reported by a [`ListenerBinder`](crate::binder::ListenerBinder).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("Target {target} does not accept event listeners")]
    Unsupported {
        target: String,
    },

    #[error("Listener for '{event_type}' rejected by {target}: {reason}")]
    Rejected {
        target: String,
        event_type: String,
        reason: String,
    },

    #[error("Listener platform error: {message}")]
    Platform {
        message: String,
    },
}

/// Failures reported by an [`EventSink`](crate::sink::EventSink).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Log record rejected: {reason}")]
    Rejected {
        reason: String,
    },

    #[error("Event sink is closed")]
    Closed,
}

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to parse monitor config: {message}")]
    Parse {
        message: String,
    },

    #[error("Invalid value for '{field}': {reason}")]
    Invalid {
        field: String,
        reason: String,
    },
}

/// Top-level error type for eventwatch.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Listener binding failed: {0}")]
    Bind(#[from] BindError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl MonitorError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if a listener primitive failed.
    #[must_use]
    pub const fn is_bind(&self) -> bool {
        matches!(self, Self::Bind(_))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

/// Result type alias for eventwatch operations.
pub type MonitorResult<T> = Result<T, MonitorError>;
