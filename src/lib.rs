//! Logging bridge: facade calls in, observable sink containers out.
//!
//! # Architecture Overview
//!
//! ```text
//!   Logger::log / info!(..)            tracing::info!(..)
//!          │                                  │
//!          │                        observability::FacadeLayer
//!          ▼                                  │
//!   ┌──────────────┐   factory(label)         │
//!   │ LoggingSystem│◀─────────────────────────┘
//!   │  (facade)    │── installed by bootstrap::bootstrap(level, metadata, container)
//!   └──────┬───────┘
//!          ▼
//!   ContainerLogHandler ── level filter ── LogRecord::new
//!          │
//!          ▼
//!   Container<S: LogSink> ── lock → sink.write(record) → notify → unlock
//!          │                                            │
//!          ▼                                            ▼
//!   read() / field()                         Subscription<S> (Stream)
//! ```
//!
//! Sinks: `Vec<LogRecord>` (sequence), `Option<LogRecord>` / `LogRecord`
//! (slot), [`FileSink`] and [`CallbackSink`] (side effects).

// Data model
pub mod record;

// Facade and handlers
pub mod facade;
pub mod handler;

// Sinks and containers
pub mod container;
pub mod sink;

// Wiring
pub mod bootstrap;
pub mod config;
pub mod observability;

pub use bootstrap::{
    bootstrap, bootstrap_for_testing, bootstrap_from_config, bootstrap_from_config_file,
    bootstrap_from_config_for_testing, bootstrap_latest, BootstrapError, ConfiguredSink,
};
pub use config::{load_config, ConfigError, LoggingConfig};
pub use container::{Container, FieldRef, Subscription};
pub use facade::{Location, LogHandler, Loggable, Logger, LoggingSystem};
pub use handler::{ContainerLogHandler, TracingLogHandler};
pub use record::{Level, LogRecord, Message, Metadata, MetadataValue};
pub use sink::{CallbackSink, FileSink, LogSink, SinkError};
