//! Configuration-driven bootstrap.

use std::path::Path;

use crate::bootstrap::{handler_factory, BootstrapError};
use crate::config::{load_config, LoggingConfig, SinkConfig, SinkKind};
use crate::container::Container;
use crate::facade::LoggingSystem;
use crate::record::LogRecord;
use crate::sink::FileSink;

/// The container installed by a config-driven bootstrap.
#[derive(Debug, Clone)]
pub enum ConfiguredSink {
    Memory(Container<Vec<LogRecord>>),
    Latest(Container<Option<LogRecord>>),
    File(Container<FileSink>),
}

impl ConfiguredSink {
    /// Build the container described by `config`. Opens the file for file sinks.
    pub fn build(config: &SinkConfig) -> Result<Self, BootstrapError> {
        Ok(match config.kind {
            SinkKind::Memory => Self::Memory(Container::default()),
            SinkKind::Latest => Self::Latest(Container::default()),
            SinkKind::File => {
                let path = config.path.as_deref().unwrap_or_default();
                let sink = FileSink::open(Path::new(path))?.with_echo(config.echo);
                Self::File(Container::new(sink))
            }
        })
    }

    pub fn kind(&self) -> SinkKind {
        match self {
            Self::Memory(_) => SinkKind::Memory,
            Self::Latest(_) => SinkKind::Latest,
            Self::File(_) => SinkKind::File,
        }
    }
}

fn install(system: &LoggingSystem, config: &LoggingConfig, sink: &ConfiguredSink, force: bool) -> Result<(), BootstrapError> {
    let level = config.level;
    let metadata = config.metadata.clone();
    macro_rules! install_with {
        ($output:expr) => {{
            let factory = handler_factory(level, metadata, $output.clone());
            if force {
                system.install_for_testing(factory);
            } else {
                system.install(factory)?;
            }
        }};
    }
    match sink {
        ConfiguredSink::Memory(output) => install_with!(output),
        ConfiguredSink::Latest(output) => install_with!(output),
        ConfiguredSink::File(output) => install_with!(output),
    }
    Ok(())
}

/// Build the sink described by `config` and install it into `system`.
///
/// Nothing is installed if the sink cannot be built.
pub fn install_from_config(system: &LoggingSystem, config: &LoggingConfig) -> Result<ConfiguredSink, BootstrapError> {
    let sink = ConfiguredSink::build(&config.sink)?;
    install(system, config, &sink, false)?;
    tracing::info!(level = %config.level, sink = ?sink.kind(), "logging system bootstrapped from config");
    Ok(sink)
}

/// Load, validate and install the config file at `path`.
pub fn install_from_config_file(system: &LoggingSystem, path: &Path) -> Result<ConfiguredSink, BootstrapError> {
    let config = load_config(path)?;
    tracing::info!(path = %path.display(), "Configuration loaded");
    install_from_config(system, &config)
}

/// [`install_from_config_file`] on the process-wide system.
pub fn bootstrap_from_config_file(path: &Path) -> Result<ConfiguredSink, BootstrapError> {
    install_from_config_file(LoggingSystem::global(), path)
}

/// [`install_from_config`] on the process-wide system.
pub fn bootstrap_from_config(config: &LoggingConfig) -> Result<ConfiguredSink, BootstrapError> {
    install_from_config(LoggingSystem::global(), config)
}

/// Like [`bootstrap_from_config`] but replaces any factory already installed.
pub fn bootstrap_from_config_for_testing(config: &LoggingConfig) -> Result<ConfiguredSink, BootstrapError> {
    let sink = ConfiguredSink::build(&config.sink)?;
    install(LoggingSystem::global(), config, &sink, true)?;
    Ok(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_str, ConfigError};
    use crate::record::Level;

    #[test]
    fn test_memory_config_installs() {
        let system = LoggingSystem::new();
        let config = load_config_str("level = \"debug\"\n[sink]\nkind = \"memory\"").unwrap();
        let sink = install_from_config(&system, &config).unwrap();

        system.logger("cfg").debug("hello");
        system.logger("cfg").trace("filtered");

        match sink {
            ConfiguredSink::Memory(output) => {
                let records = output.read();
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].level(), Level::Debug);
            }
            other => panic!("unexpected sink {other:?}"),
        }
    }

    #[test]
    fn test_bad_file_path_installs_nothing() {
        let system = LoggingSystem::new();
        let dir = std::env::temp_dir().join(format!("loggingkit-missing-{}", uuid::Uuid::new_v4()));
        let config = LoggingConfig {
            sink: SinkConfig {
                kind: SinkKind::File,
                path: Some(dir.join("app.log").display().to_string()),
                echo: false,
            },
            ..Default::default()
        };

        let err = install_from_config(&system, &config).unwrap_err();
        assert!(matches!(err, BootstrapError::Sink(_)));
        assert!(!system.is_installed());
    }

    #[test]
    fn test_config_file_errors_install_nothing() {
        let system = LoggingSystem::new();
        let missing = std::env::temp_dir().join(format!("loggingkit-{}.toml", uuid::Uuid::new_v4()));
        let err = install_from_config_file(&system, &missing).unwrap_err();
        assert!(matches!(err, BootstrapError::Config(ConfigError::Io(_))));

        let invalid = std::env::temp_dir().join(format!("loggingkit-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&invalid, "[sink]\nkind = \"file\"\n").unwrap();
        let err = install_from_config_file(&system, &invalid).unwrap_err();
        assert!(matches!(err, BootstrapError::Config(ConfigError::Validation(_))));
        assert!(err.to_string().starts_with("config error: Validation failed"));
        assert!(!system.is_installed());

        std::fs::remove_file(&invalid).unwrap();
    }

    #[test]
    fn test_config_file_installs() {
        let system = LoggingSystem::new();
        let path = std::env::temp_dir().join(format!("loggingkit-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "level = \"error\"\n[sink]\nkind = \"latest\"\n").unwrap();

        let sink = install_from_config_file(&system, &path).unwrap();
        assert_eq!(sink.kind(), SinkKind::Latest);
        assert_eq!(system.logger("file.cfg").log_level(), Level::Error);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_second_install_rejected() {
        let system = LoggingSystem::new();
        let config = LoggingConfig::default();
        install_from_config(&system, &config).unwrap();
        let err = install_from_config(&system, &config).unwrap_err();
        assert!(matches!(err, BootstrapError::AlreadyInstalled(_)));
    }
}
