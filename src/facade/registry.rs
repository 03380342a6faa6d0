//! Shared per-type loggers.

use std::any::TypeId;

use dashmap::DashMap;

use crate::facade::{Logger, LoggingSystem};

/// Per-key logger cache with explicit release.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    loggers: DashMap<TypeId, Logger>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the logger stored under `key`, creating it with `make` if absent.
    ///
    /// `make` runs without any registry lock held.
    pub fn get_or_create<F>(&self, key: TypeId, make: F) -> Logger
    where
        F: FnOnce() -> Logger,
    {
        if let Some(logger) = self.loggers.get(&key) {
            return logger.clone();
        }
        let created = make();
        self.loggers.entry(key).or_insert(created).clone()
    }

    pub fn release(&self, key: &TypeId) -> Option<Logger> {
        self.loggers.remove(key).map(|(_, logger)| logger)
    }

    /// Drop every cached logger.
    pub fn clear(&self) {
        self.loggers.clear();
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }
}

/// Gives a type one shared logger, labelled `"<type path>.logger"`.
///
/// ```
/// use loggingkit::Loggable;
///
/// struct PaymentService;
/// impl Loggable for PaymentService {}
///
/// PaymentService::logger().info("ready");
/// ```
pub trait Loggable: 'static {
    fn logger() -> Logger
    where
        Self: Sized,
    {
        LoggingSystem::global().logger_for::<Self>()
    }

    /// Forget the shared logger; the next `logger()` call builds a new one.
    fn release_logger()
    where
        Self: Sized,
    {
        LoggingSystem::global().release_logger_for::<Self>();
    }
}
