//! Log record model.
//!
//! # Data Flow
//! ```text
//! facade call (level, message, call-site metadata, location)
//!     → handler filters by level
//!     → LogRecord::new (fresh id + timestamp, handler metadata attached)
//!     → sink
//! ```
//!
//! # Design Decisions
//! - Records are immutable once built; fields are read through accessors
//! - Identity is a random UUID; equality ignores content
//! - Handler and call-site metadata are stored separately and merged on demand

pub mod level;
pub mod log_record;
pub mod message;
pub mod metadata;

pub use level::{Level, ParseLevelError};
pub use log_record::LogRecord;
pub use message::Message;
pub use metadata::{Metadata, MetadataValue};

/// Overlay `overrides` on top of `base`; keys present in both take the override.
pub fn merge_metadata(base: &Metadata, overrides: Option<&Metadata>) -> Metadata {
    let mut merged = base.clone();
    if let Some(overrides) = overrides {
        for (key, value) in overrides {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
