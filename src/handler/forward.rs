//! Default handler: re-emit facade calls as `tracing` events.

use crate::facade::{Location, LogHandler};
use crate::record::{merge_metadata, Level, Message, Metadata};

/// Target of every forwarded event. The tracing bridge ignores it.
pub const FORWARD_TARGET: &str = "loggingkit::forwarded";

/// Used by the facade until a handler factory is installed.
#[derive(Debug, Clone)]
pub struct TracingLogHandler {
    label: String,
    metadata: Metadata,
    log_level: Level,
}

impl TracingLogHandler {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            metadata: Metadata::new(),
            log_level: Level::default(),
        }
    }
}

macro_rules! forward {
    ($macro:ident, $label:ident, $severity:ident, $message:ident, $metadata:ident, $function:ident, $file:ident, $line:ident) => {
        tracing::$macro!(
            target: FORWARD_TARGET,
            label = %$label,
            severity = %$severity,
            metadata = ?$metadata,
            function = $function,
            file = $file,
            line = $line,
            "{}",
            $message
        )
    };
}

impl LogHandler for TracingLogHandler {
    fn log(&self, level: Level, message: Message, metadata: Option<Metadata>, location: Location<'_>) {
        if level < self.log_level {
            return;
        }
        let merged = merge_metadata(&self.metadata, metadata.as_ref());
        let label = self.label.as_str();
        let Location { function, file, line } = location;
        match level {
            Level::Trace => forward!(trace, label, level, message, merged, function, file, line),
            Level::Debug => forward!(debug, label, level, message, merged, function, file, line),
            Level::Info | Level::Notice => {
                forward!(info, label, level, message, merged, function, file, line)
            }
            Level::Warning => forward!(warn, label, level, message, merged, function, file, line),
            Level::Error | Level::Critical => {
                forward!(error, label, level, message, merged, function, file, line)
            }
        }
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
