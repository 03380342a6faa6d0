//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::record::{Level, Metadata};

/// Root configuration for a bootstrapped logging system.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Threshold of every installed handler.
    pub level: Level,

    /// Handler-level metadata attached to every record.
    pub metadata: Metadata,

    /// Where records go.
    pub sink: SinkConfig,
}

/// Kind of container installed by bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Keep every record in memory.
    Memory,
    /// Keep only the latest record.
    #[default]
    Latest,
    /// Append dumps to a file.
    File,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SinkConfig {
    pub kind: SinkKind,

    /// Log file; required when `kind = "file"`.
    pub path: Option<String>,

    /// File sink only: also print each dump to stdout.
    pub echo: bool,
}
