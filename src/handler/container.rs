//! Handler that writes records into a shared [`Container`].

use crate::container::Container;
use crate::facade::{Location, LogHandler};
use crate::record::{Level, LogRecord, Message, Metadata};
use crate::sink::LogSink;

/// Per-label handler writing into a container shared with other handlers.
///
/// All handlers cloned from one container serialize their writes through
/// the container lock, so a sequence sink receives records in the order
/// that lock was acquired.
#[derive(Clone)]
pub struct ContainerLogHandler<S> {
    label: String,
    metadata: Metadata,
    log_level: Level,
    output: Container<S>,
}

impl<S> ContainerLogHandler<S>
where
    S: LogSink + Clone + 'static,
{
    /// Handler at `Level::Info` with no metadata.
    pub fn new(label: impl Into<String>, output: Container<S>) -> Self {
        Self {
            label: label.into(),
            metadata: Metadata::new(),
            log_level: Level::default(),
            output,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn output(&self) -> &Container<S> {
        &self.output
    }
}

impl<S> LogHandler for ContainerLogHandler<S>
where
    S: LogSink + Clone + 'static,
{
    fn log(&self, level: Level, message: Message, metadata: Option<Metadata>, location: Location<'_>) {
        if level < self.log_level {
            return;
        }
        let record = LogRecord::new(
            level,
            message,
            &self.label,
            metadata,
            self.metadata.clone(),
            location,
        );
        self.output.update(|sink| sink.write(record));
    }

    fn log_level(&self) -> Level {
        self.log_level
    }

    fn set_log_level(&mut self, level: Level) {
        self.log_level = level;
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    fn box_clone(&self) -> Box<dyn LogHandler> {
        Box::new(self.clone())
    }
}
