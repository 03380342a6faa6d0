//! The immutable log record.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::facade::{Location, LogHandler};
use crate::record::message::render;
use crate::record::{merge_metadata, Level, Message, Metadata};

/// Width of the `»`/`«` rules framing the message in a dump.
const DELIMITER_WIDTH: usize = 44;

/// Timestamp layout in the dump header, e.g. `2024-05-01 09:30:00 +0000`.
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// One log event.
///
/// Records are only built by handlers. Equality and hashing use the random
/// `id` alone, so two records with identical content are still distinct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    id: Uuid,
    date: DateTime<Utc>,
    level: Level,
    message: Message,
    label: String,
    metadata: Option<Metadata>,
    handler_metadata: Metadata,
    function: String,
    file: String,
    line: u32,
}

impl LogRecord {
    pub(crate) fn new(
        level: Level,
        message: Message,
        label: &str,
        metadata: Option<Metadata>,
        handler_metadata: Metadata,
        location: Location<'_>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: Utc::now(),
            level,
            message,
            label: label.to_string(),
            metadata,
            handler_metadata,
            function: location.function.to_string(),
            file: location.file.to_string(),
            line: location.line,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Metadata passed with this particular call, if any.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Metadata attached to the handler that produced this record.
    pub fn handler_metadata(&self) -> &Metadata {
        &self.handler_metadata
    }

    /// Handler metadata overlaid with call-site metadata (call site wins).
    pub fn merged_metadata(&self) -> Metadata {
        merge_metadata(&self.handler_metadata, self.metadata.as_ref())
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn location(&self) -> Location<'_> {
        Location {
            function: &self.function,
            file: &self.file,
            line: self.line,
        }
    }

    /// Replay this record through a handler obtained from `factory`.
    ///
    /// The target handler applies its own threshold and metadata; the
    /// replayed record gets a fresh id and timestamp.
    pub fn redirect<F>(&self, factory: F)
    where
        F: FnOnce(&str) -> Box<dyn LogHandler>,
    {
        let handler = factory(&self.label);
        if self.level < handler.log_level() {
            return;
        }
        handler.log(
            self.level,
            self.message.clone(),
            self.metadata.clone(),
            self.location(),
        );
    }

    /// Human-readable multi-line rendering.
    pub fn dump(&self) -> String {
        self.to_string()
    }

    pub fn dump_to<W: io::Write>(&self, target: &mut W) -> io::Result<()> {
        target.write_all(self.dump().as_bytes())
    }

    fn metadata_sections(&self) -> String {
        let mut output = String::new();
        if !self.handler_metadata.is_empty() {
            output.push_str("\n# logger.metadata\n");
            output.push_str(&render(&self.handler_metadata));
        }
        if let Some(metadata) = &self.metadata {
            output.push_str("\n# logging.metadata\n");
            output.push_str(&render(metadata));
        }
        if output.ends_with('\n') {
            output.pop();
        }
        output
    }
}

impl PartialEq for LogRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LogRecord {}

impl Hash for LogRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = self.level.as_str().to_uppercase();
        writeln!(f, "{} {} [{}]", self.level.emoji(), self.label, level)?;
        writeln!(f, "# startlog({})", self.id)?;
        writeln!(f, "# {}", self.date.format(DATE_FORMAT))?;
        writeln!(f, "# function: \"{}\"", self.function)?;
        writeln!(f, "# file: {}", self.file)?;
        writeln!(f, "# line {}{}", self.line, self.metadata_sections())?;
        writeln!(f, "# message:")?;
        writeln!(f, ":{}:", "»".repeat(DELIMITER_WIDTH))?;
        writeln!(f, "{}", self.message)?;
        writeln!(f, ":{}:", "«".repeat(DELIMITER_WIDTH))?;
        writeln!(f, "# endlog({})", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata;
    use crate::record::MetadataValue;

    fn location() -> Location<'static> {
        Location {
            function: "billing::charge",
            file: "src/billing.rs",
            line: 42,
        }
    }

    #[test]
    fn test_identity_equality() {
        let a = LogRecord::new(Level::Info, "same".into(), "app", None, Metadata::new(), location());
        let b = LogRecord::new(Level::Info, "same".into(), "app", None, Metadata::new(), location());
        assert_ne!(a, b);
        assert_eq!(a, a.clone());

        let set: std::collections::HashSet<_> = [a.clone(), b, a].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_merged_metadata_prefers_call_site() {
        let record = LogRecord::new(
            Level::Warning,
            "disk slow".into(),
            "storage",
            Some(metadata! { "disk" => "sdb", "region" => "eu" }),
            metadata! { "region" => "us", "service" => "api" },
            location(),
        );
        let merged = record.merged_metadata();
        assert_eq!(merged["region"], MetadataValue::from("eu"));
        assert_eq!(merged["service"], MetadataValue::from("api"));
        assert_eq!(merged["disk"], MetadataValue::from("sdb"));
        // The stored layers stay as they were given.
        assert_eq!(record.handler_metadata()["region"], MetadataValue::from("us"));
    }

    #[test]
    fn test_dump_format() {
        let record = LogRecord::new(
            Level::Error,
            "charge failed".into(),
            "billing",
            None,
            Metadata::new(),
            location(),
        );
        let expected = format!(
            "❌ billing [ERROR]\n\
             # startlog({id})\n\
             # {date}\n\
             # function: \"billing::charge\"\n\
             # file: src/billing.rs\n\
             # line 42\n\
             # message:\n\
             :{open}:\n\
             charge failed\n\
             :{close}:\n\
             # endlog({id})\n",
            id = record.id(),
            date = record.date().format(DATE_FORMAT),
            open = "»".repeat(44),
            close = "«".repeat(44),
        );
        assert_eq!(record.dump(), expected);
    }

    #[test]
    fn test_dump_includes_metadata_sections() {
        let record = LogRecord::new(
            Level::Critical,
            "x".into(),
            "app",
            Some(metadata! { "Some" => "MTD" }),
            metadata! { "service" => "api" },
            location(),
        );
        let dump = record.dump();
        assert!(dump.contains(
            "# line 42\n# logger.metadata\n{\n    \"service\": \"api\",\n}\n\
             # logging.metadata\n{\n    \"Some\": \"MTD\",\n}\n# message:\n"
        ));
    }

    #[test]
    fn test_redirect_replays_through_factory() {
        use crate::container::Container;
        use crate::handler::ContainerLogHandler;

        let original = LogRecord::new(
            Level::Warning,
            "disk slow".into(),
            "storage",
            Some(metadata! { "disk" => "sdb" }),
            Metadata::new(),
            location(),
        );
        let output = Container::<Vec<LogRecord>>::default();
        let target = output.clone();
        original.redirect(move |label| -> Box<dyn LogHandler> {
            Box::new(ContainerLogHandler::new(label, target.clone()))
        });
        let strict = output.clone();
        original.redirect(move |label| -> Box<dyn LogHandler> {
            Box::new(ContainerLogHandler::new(label, strict.clone()).with_level(Level::Error))
        });

        let records = output.read();
        assert_eq!(records.len(), 1);
        let replayed = &records[0];
        assert_ne!(replayed, &original);
        assert_eq!(replayed.label(), "storage");
        assert_eq!(replayed.level(), Level::Warning);
        assert_eq!(replayed.message(), original.message());
        assert_eq!(replayed.metadata(), original.metadata());
        assert_eq!(replayed.location(), original.location());
    }

    #[test]
    fn test_dump_to_writer() {
        let record = LogRecord::new(Level::Debug, "bytes".into(), "io", None, Metadata::new(), location());
        let mut buffer = Vec::new();
        record.dump_to(&mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), record.dump());
    }

    #[test]
    fn test_record_serialization() {
        let record = LogRecord::new(Level::Notice, "hi".into(), "app", None, Metadata::new(), location());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["level"], "notice");
        assert_eq!(json["message"]["value"], "hi");

        let decoded: LogRecord = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.line(), 42);
    }
}
