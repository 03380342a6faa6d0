//! Logger front-end and call-site capture.

use std::any::type_name;
use std::fmt;

use crate::facade::{LogHandler, LoggingSystem};
use crate::record::{Level, Message, Metadata, MetadataValue};

/// Function name recorded when only file and line are known.
pub const UNKNOWN_FUNCTION: &str = "<unknown>";

/// Where a log call was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub function: &'a str,
    pub file: &'a str,
    pub line: u32,
}

impl Location<'static> {
    /// File and line of the caller; the function is unknown.
    #[track_caller]
    pub fn caller() -> Self {
        let caller = std::panic::Location::caller();
        Self {
            function: UNKNOWN_FUNCTION,
            file: caller.file(),
            line: caller.line(),
        }
    }
}

/// A labelled entry point into the logging facade.
///
/// Each logger owns its own handler, produced by the factory installed in
/// [`LoggingSystem`] at the time the logger was created. Level and metadata
/// changes on one logger do not affect clones made earlier.
#[derive(Clone)]
pub struct Logger {
    label: String,
    handler: Box<dyn LogHandler>,
}

impl Logger {
    /// Create a logger through the process-wide [`LoggingSystem`].
    pub fn new(label: impl Into<String>) -> Self {
        LoggingSystem::global().logger(label)
    }

    /// Logger labelled `"<type path>.logger"`.
    pub fn for_type<T: ?Sized>() -> Self {
        Self::new(type_label::<T>())
    }

    pub fn with_handler(label: impl Into<String>, handler: Box<dyn LogHandler>) -> Self {
        Self {
            label: label.into(),
            handler,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn handler(&self) -> &dyn LogHandler {
        self.handler.as_ref()
    }

    pub fn log_level(&self) -> Level {
        self.handler.log_level()
    }

    pub fn set_log_level(&mut self, level: Level) {
        self.handler.set_log_level(level);
    }

    pub fn metadata_value(&self, key: &str) -> Option<&MetadataValue> {
        self.handler.metadata_value(key)
    }

    pub fn set_metadata_value(&mut self, key: &str, value: Option<MetadataValue>) {
        self.handler.set_metadata_value(key, value);
    }

    /// Log at `level`. The message closure only runs if the level passes.
    pub fn log<F, M>(&self, level: Level, message: F, metadata: Option<Metadata>, location: Location<'_>)
    where
        F: FnOnce() -> M,
        M: Into<Message>,
    {
        if level < self.handler.log_level() {
            return;
        }
        self.handler.log(level, message().into(), metadata, location);
    }

    #[track_caller]
    pub fn trace(&self, message: impl Into<Message>) {
        self.log(Level::Trace, || message, None, Location::caller());
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<Message>) {
        self.log(Level::Debug, || message, None, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<Message>) {
        self.log(Level::Info, || message, None, Location::caller());
    }

    #[track_caller]
    pub fn notice(&self, message: impl Into<Message>) {
        self.log(Level::Notice, || message, None, Location::caller());
    }

    #[track_caller]
    pub fn warning(&self, message: impl Into<Message>) {
        self.log(Level::Warning, || message, None, Location::caller());
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<Message>) {
        self.log(Level::Error, || message, None, Location::caller());
    }

    #[track_caller]
    pub fn critical(&self, message: impl Into<Message>) {
        self.log(Level::Critical, || message, None, Location::caller());
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("label", &self.label)
            .field("log_level", &self.handler.log_level())
            .finish()
    }
}

pub(crate) fn type_label<T: ?Sized>() -> String {
    format!("{}.logger", type_name::<T>())
}

/// The [`Location`] of the macro call site.
#[macro_export]
macro_rules! location {
    () => {
        $crate::Location {
            function: ::std::module_path!(),
            file: ::std::file!(),
            line: ::std::line!(),
        }
    };
}

/// Log through a [`Logger`](crate::Logger) with `format!` arguments.
///
/// ```
/// use loggingkit::{log, metadata, Level, Logger};
///
/// let logger = Logger::new("docs");
/// log!(logger, Level::Notice, "cache warmed in {}ms", 12);
/// log!(logger, Level::Warning, metadata: metadata! { "shard" => 3 }, "slow shard");
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, metadata: $metadata:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            || ::std::format!($($arg)+),
            ::std::option::Option::Some($metadata),
            $crate::location!(),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            || ::std::format!($($arg)+),
            ::std::option::Option::None,
            $crate::location!(),
        )
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($rest:tt)+) => { $crate::log!($logger, $crate::Level::Trace, $($rest)+) };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => { $crate::log!($logger, $crate::Level::Debug, $($rest)+) };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => { $crate::log!($logger, $crate::Level::Info, $($rest)+) };
}

#[macro_export]
macro_rules! notice {
    ($logger:expr, $($rest:tt)+) => { $crate::log!($logger, $crate::Level::Notice, $($rest)+) };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($rest:tt)+) => { $crate::log!($logger, $crate::Level::Warning, $($rest)+) };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => { $crate::log!($logger, $crate::Level::Error, $($rest)+) };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($rest:tt)+) => { $crate::log!($logger, $crate::Level::Critical, $($rest)+) };
}
