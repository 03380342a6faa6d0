//! Structured diagnostics.
//!
//! # Responsibilities
//! - Initialize the `tracing` subscriber for binaries
//! - Optionally route `tracing` events into the facade
//!
//! # Design Decisions
//! - Human-readable fmt output on stderr so stdout stays free for records
//! - Filter from `RUST_LOG`, falling back to the caller's default
//! - The filter applies to the fmt layer only; the bridge sees everything

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::observability::bridge::FacadeLayer;

/// Install the global `tracing` subscriber.
///
/// With `bridge`, events are also forwarded to the global logging facade.
/// Returns `false` if a subscriber was already set.
pub fn init_diagnostics(default_filter: &str, bridge: bool) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(filter))
        .with(bridge.then(FacadeLayer::global))
        .try_init()
        .is_ok()
}
