//! # eventwatch - Event monitoring for debugging tools
//!
//! eventwatch attaches logging listeners to observable objects on behalf of a
//! debugger, per debugging session, and removes exactly the listeners it
//! added. Every fired event is wrapped in a [`LogRecord`] and handed to an
//! [`EventSink`].
//!
//! ## Core Concepts
//!
//! - **Context**: one debugging session; owns its subscriptions and its
//!   single dispatch listener
//! - **Family**: a named group of event types ("mouse", "key", ...)
//! - **Monitored pair**: an (object, event type) with a bound listener
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use eventwatch::memory::{BufferedSink, InMemoryBinder};
//! use eventwatch::{EventCatalog, MonitorController, MonitoringContext, NativeEvent};
//!
//! let sink = Arc::new(BufferedSink::new());
//! let monitor = MonitorController::new(EventCatalog::default(), InMemoryBinder::new(), sink.clone());
//! let mut ctx = MonitoringContext::new("tab-1");
//!
//! monitor.monitor_events(Some(&"btn"), "mouse", &mut ctx)?;
//! assert!(monitor.are_events_monitored(Some(&"btn"), "mouse", &ctx, true));
//!
//! monitor.binder().fire(&"btn", NativeEvent::new("click", "btn"));
//! assert_eq!(sink.len(), 1);
//!
//! let report = monitor.destroy_context(&mut ctx);
//! assert!(report.is_clean());
//! # Ok::<(), eventwatch::MonitorError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core types
pub mod error;
pub mod event;
pub mod types;

// Collaborator contracts
pub mod binder;
pub mod catalog;
pub mod sink;

// Subscription tracking
pub mod context;
pub mod controller;
pub mod dispatch;
pub mod registry;

// Host integration
pub mod commands;
pub mod config;
pub mod menu;
pub mod module;

// In-memory backends
pub mod memory;

// Re-export primary types at crate root for convenience
pub use binder::{Listener, ListenerBinder};
pub use catalog::{resolve_event_types, EventCatalog, EventTypeResolver};
pub use commands::{CommandArgs, CommandSpec, ConsoleValue};
pub use config::MonitorConfig;
pub use context::MonitoringContext;
pub use controller::{MonitorController, TeardownFailure, TeardownReport};
pub use dispatch::EventDispatcher;
pub use error::{BindError, ConfigError, MonitorError, MonitorResult, SinkError};
pub use event::{LogRecord, NativeEvent};
pub use menu::{MenuCommand, MenuItem};
pub use module::{EventMonitor, Module, UiListener, UiListenerRegistry};
pub use registry::{ClearedEntry, SubscriptionRegistry};
pub use sink::{ConsoleSink, EventSink};
pub use types::{ContextId, EventTypes, ListenerId, TargetId};
