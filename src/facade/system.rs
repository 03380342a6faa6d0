//! The handler-factory slot.
//!
//! # Design Decisions
//! - One factory active at a time, swapped atomically (`ArcSwapOption`)
//! - `install` succeeds once per system; later calls get `AlreadyInstalled`
//! - The slot is filled before the installed flag is raised, so anyone who
//!   sees the flag also sees the factory
//! - `install_for_testing` replaces the factory unconditionally
//! - Loggers created before an install keep the handler they were built with

use std::any::TypeId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwapOption;
use thiserror::Error;

use crate::facade::logger::type_label;
use crate::facade::{LogHandler, Logger, LoggerRegistry};
use crate::handler::TracingLogHandler;

/// Returned by [`LoggingSystem::install`] when a factory is already in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("logging system was already bootstrapped; use the testing entry point to replace the handler factory")]
pub struct AlreadyInstalled;

struct Factory(Box<dyn Fn(&str) -> Box<dyn LogHandler> + Send + Sync>);

struct SystemState {
    factory: ArcSwapOption<Factory>,
    installed: AtomicBool,
    registry: LoggerRegistry,
}

/// Owns the handler factory, the install guard and the per-type logger registry.
///
/// Cloning yields another handle to the same system.
#[derive(Clone)]
pub struct LoggingSystem {
    state: Arc<SystemState>,
}

impl LoggingSystem {
    /// A fresh, uninstalled system.
    pub fn new() -> Self {
        Self {
            state: Arc::new(SystemState {
                factory: ArcSwapOption::empty(),
                installed: AtomicBool::new(false),
                registry: LoggerRegistry::new(),
            }),
        }
    }

    /// The process-wide system used by [`Logger::new`]. Created on first access.
    pub fn global() -> &'static LoggingSystem {
        static GLOBAL: OnceLock<LoggingSystem> = OnceLock::new();
        GLOBAL.get_or_init(LoggingSystem::new)
    }

    /// Install `factory`. Fails if a factory was installed before.
    ///
    /// The factory is in the slot before the system reports itself installed.
    pub fn install<F>(&self, factory: F) -> Result<(), AlreadyInstalled>
    where
        F: Fn(&str) -> Box<dyn LogHandler> + Send + Sync + 'static,
    {
        if self.is_installed() {
            return Err(AlreadyInstalled);
        }
        let factory = Arc::new(Factory(Box::new(factory)));
        let previous = self
            .state
            .factory
            .compare_and_swap(&None::<Arc<Factory>>, Some(factory));
        if previous.is_some() {
            return Err(AlreadyInstalled);
        }
        self.state.installed.store(true, Ordering::Release);
        Ok(())
    }

    /// Install `factory`, replacing any previous one.
    pub fn install_for_testing<F>(&self, factory: F)
    where
        F: Fn(&str) -> Box<dyn LogHandler> + Send + Sync + 'static,
    {
        self.state.factory.store(Some(Arc::new(Factory(Box::new(factory)))));
        self.state.installed.store(true, Ordering::Release);
    }

    /// True once a factory is in place.
    pub fn is_installed(&self) -> bool {
        self.state.installed.load(Ordering::Acquire)
    }

    /// Build a handler for `label`, falling back to [`TracingLogHandler`]
    /// when nothing is installed.
    pub fn make_handler(&self, label: &str) -> Box<dyn LogHandler> {
        match self.state.factory.load().as_ref() {
            Some(factory) => (factory.0)(label),
            None => Box::new(TracingLogHandler::new(label)),
        }
    }

    pub fn logger(&self, label: impl Into<String>) -> Logger {
        let label = label.into();
        let handler = self.make_handler(&label);
        Logger::with_handler(label, handler)
    }

    pub fn registry(&self) -> &LoggerRegistry {
        &self.state.registry
    }

    /// The shared logger for `T`, created on first use.
    pub fn logger_for<T: ?Sized + 'static>(&self) -> Logger {
        self.state
            .registry
            .get_or_create(TypeId::of::<T>(), || self.logger(type_label::<T>()))
    }

    /// Drop the shared logger for `T`; the next [`logger_for`](Self::logger_for) rebuilds it.
    pub fn release_logger_for<T: ?Sized + 'static>(&self) -> Option<Logger> {
        self.state.registry.release(&TypeId::of::<T>())
    }
}

impl Default for LoggingSystem {
    fn default() -> Self {
        Self::new()
    }
}
