//! Bootstrap: wire a container into the logging facade.
//!
//! # Data Flow
//! ```text
//! bootstrap(level, metadata, container)
//!     → handler_factory: label → ContainerLogHandler(label, level, metadata, container)
//!     → LoggingSystem::global().install(factory)
//!
//! Logger::new(label)
//!     → factory(label) → handler writing into the shared container
//! ```
//!
//! # Design Decisions
//! - Every label gets its own handler; all of them share one container
//! - The production path installs once; the testing path replaces freely
//! - Sinks are built before installing, so a sink error installs nothing

pub mod configured;

use thiserror::Error;

use crate::config::ConfigError;
use crate::container::Container;
use crate::facade::{AlreadyInstalled, LogHandler, LoggingSystem};
use crate::handler::ContainerLogHandler;
use crate::record::{Level, LogRecord, Metadata};
use crate::sink::{LogSink, SinkError};

pub use configured::{
    bootstrap_from_config, bootstrap_from_config_file, bootstrap_from_config_for_testing,
    install_from_config, install_from_config_file, ConfiguredSink,
};

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    AlreadyInstalled(#[from] AlreadyInstalled),

    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Factory producing one [`ContainerLogHandler`] per label, all writing into
/// `output` with the given threshold and handler metadata.
pub fn handler_factory<S>(
    level: Level,
    metadata: Metadata,
    output: Container<S>,
) -> impl Fn(&str) -> Box<dyn LogHandler> + Send + Sync + 'static
where
    S: LogSink + Clone + 'static,
{
    move |label: &str| -> Box<dyn LogHandler> {
        Box::new(
            ContainerLogHandler::new(label, output.clone())
                .with_level(level)
                .with_metadata(metadata.clone()),
        )
    }
}

/// Install `output` as the destination of every logger created from now on.
///
/// Fails with [`BootstrapError::AlreadyInstalled`] if the process-wide
/// system was bootstrapped before.
pub fn bootstrap<S>(level: Level, metadata: Metadata, output: Container<S>) -> Result<(), BootstrapError>
where
    S: LogSink + Clone + 'static,
{
    LoggingSystem::global().install(handler_factory(level, metadata, output))?;
    tracing::info!(%level, "logging system bootstrapped");
    Ok(())
}

/// Like [`bootstrap`] but replaces any factory already installed.
pub fn bootstrap_for_testing<S>(level: Level, metadata: Metadata, output: Container<S>)
where
    S: LogSink + Clone + 'static,
{
    LoggingSystem::global().install_for_testing(handler_factory(level, metadata, output));
}

/// Bootstrap into a fresh slot holding the latest record, and return it.
pub fn bootstrap_latest(
    level: Level,
    metadata: Metadata,
) -> Result<Container<Option<LogRecord>>, BootstrapError> {
    let output = Container::default();
    bootstrap(level, metadata, output.clone())?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata;

    #[test]
    fn test_factory_builds_configured_handlers() {
        let output = Container::<Vec<LogRecord>>::default();
        let factory = handler_factory(Level::Notice, metadata! { "env" => "test" }, output.clone());

        let api = factory("api");
        let db = factory("db");
        assert_eq!(api.log_level(), Level::Notice);
        assert_eq!(db.metadata_value("env").and_then(|v| v.as_str()), Some("test"));

        api.log(Level::Info, "dropped".into(), None, crate::location!());
        api.log(Level::Error, "kept".into(), None, crate::location!());
        db.log(Level::Critical, "also kept".into(), None, crate::location!());

        let records = output.read();
        let labels: Vec<_> = records.iter().map(|r| r.label().to_string()).collect();
        assert_eq!(labels, vec!["api", "db"]);
        assert!(records.iter().all(|r| r.handler_metadata().contains_key("env")));
    }

    #[test]
    fn test_factory_on_private_system() {
        let system = LoggingSystem::new();
        let slot = Container::<Option<LogRecord>>::default();
        system.install(handler_factory(Level::Trace, Metadata::new(), slot.clone())).unwrap();

        system.logger("one").trace("first");
        system.logger("two").debug("second");

        let latest = slot.read().unwrap();
        assert_eq!(latest.label(), "two");
        assert_eq!(latest.message().as_str(), "second");
    }
}
