//! The handler boundary between `Logger` and whatever consumes records.

use crate::facade::Location;
use crate::record::{Level, Message, Metadata, MetadataValue};

/// Receives log calls from a [`Logger`](crate::Logger).
///
/// One handler exists per logger label. Implementations must make `log`
/// total: it cannot fail and must not panic.
pub trait LogHandler: Send + Sync {
    /// Handle one call. `metadata` is the call-site metadata, if any.
    fn log(&self, level: Level, message: Message, metadata: Option<Metadata>, location: Location<'_>);

    /// Calls below this level are discarded.
    fn log_level(&self) -> Level;

    fn set_log_level(&mut self, level: Level);

    /// Metadata attached to every record this handler emits.
    fn metadata(&self) -> &Metadata;

    fn metadata_mut(&mut self) -> &mut Metadata;

    fn metadata_value(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata().get(key)
    }

    /// Set or (with `None`) remove one handler metadata entry.
    fn set_metadata_value(&mut self, key: &str, value: Option<MetadataValue>) {
        match value {
            Some(value) => {
                self.metadata_mut().insert(key.to_string(), value);
            }
            None => {
                self.metadata_mut().shift_remove(key);
            }
        }
    }

    fn box_clone(&self) -> Box<dyn LogHandler>;
}

impl Clone for Box<dyn LogHandler> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}
