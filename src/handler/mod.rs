//! Log handlers.
//!
//! # Data Flow
//! ```text
//! handler.log(level, message, metadata, location)
//!     → level < threshold? return (no record, no lock, no notification)
//!     → LogRecord::new(... handler metadata ...)
//!     → container.update(|sink| sink.write(record))   // lock held
//!         → subscribers notified in registration order
//! ```
//!
//! # Design Decisions
//! - Filtering happens before any allocation or locking
//! - The lock lives in the container so every handler sharing it is serialized
//! - `TracingLogHandler` is the fallback before anything is bootstrapped

pub mod container;
pub mod forward;

pub use container::ContainerLogHandler;
pub use forward::{TracingLogHandler, FORWARD_TARGET};
