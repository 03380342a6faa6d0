//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - File sinks name a path
//! - Metadata keys are non-empty, at every nesting level
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggingConfig → Result<(), Vec<ValidationError>>
//! - Does not touch the filesystem; unwritable paths surface when the sink opens

use thiserror::Error;

use crate::config::schema::{LoggingConfig, SinkKind};
use crate::record::{Metadata, MetadataValue};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("sink.path is required for a file sink")]
    MissingFilePath,

    #[error("sink.path is set but sink.kind is not \"file\"")]
    UnusedFilePath,

    #[error("metadata key at {0:?} is empty")]
    EmptyMetadataKey(String),
}

pub fn validate_config(config: &LoggingConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match (config.sink.kind, config.sink.path.as_deref()) {
        (SinkKind::File, None) => errors.push(ValidationError::MissingFilePath),
        (SinkKind::File, Some(path)) if path.trim().is_empty() => {
            errors.push(ValidationError::MissingFilePath)
        }
        (SinkKind::Memory | SinkKind::Latest, Some(_)) => {
            errors.push(ValidationError::UnusedFilePath)
        }
        _ => {}
    }

    check_keys(&config.metadata, "metadata", &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_keys(metadata: &Metadata, path: &str, errors: &mut Vec<ValidationError>) {
    for (key, value) in metadata {
        if key.is_empty() {
            errors.push(ValidationError::EmptyMetadataKey(path.to_string()));
        }
        check_value(value, &format!("{path}.{key}"), errors);
    }
}

fn check_value(value: &MetadataValue, path: &str, errors: &mut Vec<ValidationError>) {
    match value {
        MetadataValue::Dictionary(inner) => check_keys(inner, path, errors),
        MetadataValue::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                check_value(item, &format!("{path}[{i}]"), errors);
            }
        }
        MetadataValue::String(_) | MetadataValue::Stringable(_) => {}
    }
}
