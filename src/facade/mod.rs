//! Logging facade.
//!
//! # Data Flow
//! ```text
//! Logger::new(label)
//!     → LoggingSystem::make_handler(label)
//!         → installed factory, or TracingLogHandler if none
//!
//! logger.log(level, || message, metadata, location)
//!     → level < handler threshold? drop (message never built)
//!     → handler.log(...)
//! ```
//!
//! # Design Decisions
//! - Seven severities, ordered trace → critical
//! - The factory slot and its install-once guard live here, not in handlers
//! - Per-type loggers come from an explicit registry with release/clear

pub mod handler;
pub mod logger;
pub mod registry;
pub mod system;

pub use handler::LogHandler;
pub use logger::{Location, Logger, UNKNOWN_FUNCTION};
pub use registry::{Loggable, LoggerRegistry};
pub use system::{AlreadyInstalled, LoggingSystem};
