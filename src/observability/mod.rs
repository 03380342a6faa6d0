//! Diagnostics and the `tracing` bridge.
//!
//! # Data Flow
//! ```text
//! tracing::info!(target: "app::db", ...)
//!     → registry
//!         → fmt layer (stderr, EnvFilter)          logging.rs
//!         → FacadeLayer → LoggingSystem handler     bridge.rs
//!
//! crate diagnostics (target "loggingkit::...")
//!     → fmt layer only; the bridge skips them
//! ```
//!
//! # Design Decisions
//! - The crate never installs a subscriber on its own; binaries call `init_diagnostics`
//! - The bridge only forwards while a handler factory is installed

pub mod bridge;
pub mod logging;

pub use bridge::FacadeLayer;
pub use logging::init_diagnostics;
