//! Rendered log messages.

use std::fmt::{self, Write as _};
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

/// Placeholder appended when a value's `Debug` output fails part way.
const UNRENDERABLE: &str = "<unrenderable>";

/// The text of one log event.
///
/// Serialized as `{"value": "<text>"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    value: String,
}

impl Message {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Render each value's full structure (pretty `Debug`), separated by a blank line.
    ///
    /// Never panics: output from a failing or panicking `Debug` impl is kept up
    /// to the failure point and marked `<unrenderable>`.
    pub fn dump(values: &[&dyn fmt::Debug]) -> Self {
        let rendered: Vec<String> = values.iter().map(|v| render(*v)).collect();
        Self::new(rendered.join("\n\n"))
    }
}

/// Pretty-print one value, trimming a single trailing newline.
pub(crate) fn render(value: &dyn fmt::Debug) -> String {
    let mut output = String::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        write!(output, "{:#?}", value)
    }));
    if !matches!(outcome, Ok(Ok(()))) {
        output.push_str(UNRENDERABLE);
    }
    if output.ends_with('\n') {
        output.pop();
    }
    output
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for Message {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Message {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<fmt::Arguments<'_>> for Message {
    fn from(args: fmt::Arguments<'_>) -> Self {
        Self::new(args.to_string())
    }
}
