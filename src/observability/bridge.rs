//! `tracing` → facade bridge.

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::facade::{Location, LoggingSystem, UNKNOWN_FUNCTION};
use crate::record::{Level, Message, Metadata, MetadataValue};

const OWN_TARGET: &str = "loggingkit";

/// Layer that replays `tracing` events through a [`LoggingSystem`].
///
/// Event target becomes the logger label, the `message` field the message,
/// every other field call-site metadata. Events from this crate are skipped
/// so the default tracing handler cannot feed back into itself.
#[derive(Clone)]
pub struct FacadeLayer {
    system: LoggingSystem,
}

impl FacadeLayer {
    pub fn new(system: LoggingSystem) -> Self {
        Self { system }
    }

    /// Layer over [`LoggingSystem::global`].
    pub fn global() -> Self {
        Self::new(LoggingSystem::global().clone())
    }
}

fn is_own_target(target: &str) -> bool {
    target == OWN_TARGET
        || target
            .strip_prefix(OWN_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

fn level_of(level: &tracing::Level) -> Level {
    match *level {
        tracing::Level::TRACE => Level::Trace,
        tracing::Level::DEBUG => Level::Debug,
        tracing::Level::INFO => Level::Info,
        tracing::Level::WARN => Level::Warning,
        _ => Level::Error,
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    metadata: Metadata,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: MetadataValue) {
        self.metadata.insert(field.name().to_string(), value);
    }
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.insert(field, value.into());
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, value.into());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(rendered);
        } else {
            self.insert(field, rendered.into());
        }
    }
}

impl<S: Subscriber> Layer<S> for FacadeLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        if is_own_target(meta.target()) || !self.system.is_installed() {
            return;
        }
        let handler = self.system.make_handler(meta.target());
        let level = level_of(meta.level());
        if level < handler.log_level() {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        let metadata = (!visitor.metadata.is_empty()).then_some(visitor.metadata);
        let location = Location {
            function: meta.module_path().unwrap_or(UNKNOWN_FUNCTION),
            file: meta.file().unwrap_or("<unknown>"),
            line: meta.line().unwrap_or(0),
        };
        handler.log(
            level,
            Message::new(visitor.message.unwrap_or_default()),
            metadata,
            location,
        );
    }
}
