//! Sinks: where a handler's records end up.
//!
//! A sink is a plain value stored in a [`Container`](crate::Container).
//! `write` mutates it in place; the container takes care of locking and
//! notifying subscribers afterwards.
//!
//! # Design Decisions
//! - `write` is infallible; sinks that can fail at runtime record the
//!   failure themselves
//! - Sinks never log through the facade or `tracing` while writing, since
//!   they run under the container lock

pub mod callback;
pub mod file;

use crate::record::LogRecord;

pub use callback::CallbackSink;
pub use file::{FileSink, SinkError};

/// Something a [`LogRecord`] can be written into.
pub trait LogSink: Send {
    fn write(&mut self, record: LogRecord);
}

/// Keeps every record, oldest first.
impl LogSink for Vec<LogRecord> {
    fn write(&mut self, record: LogRecord) {
        self.push(record);
    }
}

/// Keeps the latest record.
impl LogSink for Option<LogRecord> {
    fn write(&mut self, record: LogRecord) {
        *self = Some(record);
    }
}

/// Slot that is replaced by every write. Lossy: only the last record
/// survives, earlier ones are only visible to subscribers.
impl LogSink for LogRecord {
    fn write(&mut self, record: LogRecord) {
        *self = record;
    }
}
