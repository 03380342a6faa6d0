//! Structured metadata attached to log records.
//!
//! # Encoding
//! - `String` → JSON string
//! - `Dictionary` → JSON object (insertion order kept)
//! - `Array` → JSON array
//! - `Stringable` → JSON string of its `Display` form
//!
//! Decoding tries string, then object, then array. A stringable scalar
//! therefore comes back as a plain `String`.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Insertion-ordered key/value annotations.
pub type Metadata = IndexMap<String, MetadataValue>;

/// A single metadata value.
#[derive(Clone)]
pub enum MetadataValue {
    String(String),
    /// Any scalar rendered through `Display` (numbers, flags, ids).
    Stringable(Arc<dyn fmt::Display + Send + Sync>),
    Dictionary(Metadata),
    Array(Vec<MetadataValue>),
}

impl MetadataValue {
    /// Wrap any displayable value.
    pub fn stringable<T>(value: T) -> Self
    where
        T: fmt::Display + Send + Sync + 'static,
    {
        MetadataValue::Stringable(Arc::new(value))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            MetadataValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for MetadataValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MetadataValue::String(a), MetadataValue::String(b)) => a == b,
            (MetadataValue::Stringable(a), MetadataValue::Stringable(b)) => {
                a.to_string() == b.to_string()
            }
            (MetadataValue::Dictionary(a), MetadataValue::Dictionary(b)) => a == b,
            (MetadataValue::Array(a), MetadataValue::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => fmt::Debug::fmt(s, f),
            MetadataValue::Stringable(v) => fmt::Display::fmt(v, f),
            MetadataValue::Dictionary(map) => f.debug_map().entries(map.iter()).finish(),
            MetadataValue::Array(items) => f.debug_list().entries(items.iter()).finish(),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => f.write_str(s),
            MetadataValue::Stringable(v) => fmt::Display::fmt(v, f),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

impl Serialize for MetadataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetadataValue::String(s) => serializer.serialize_str(s),
            MetadataValue::Stringable(v) => serializer.collect_str(v),
            MetadataValue::Dictionary(map) => map.serialize(serializer),
            MetadataValue::Array(items) => items.serialize(serializer),
        }
    }
}

/// Decoding attempts, in order.
#[derive(Deserialize)]
#[serde(untagged)]
enum Encoded {
    String(String),
    Dictionary(Metadata),
    Array(Vec<MetadataValue>),
}

impl<'de> Deserialize<'de> for MetadataValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Encoded::deserialize(deserializer)? {
            Encoded::String(s) => MetadataValue::String(s),
            Encoded::Dictionary(map) => MetadataValue::Dictionary(map),
            Encoded::Array(items) => MetadataValue::Array(items),
        })
    }
}

impl From<&str> for MetadataValue {
    fn from(s: &str) -> Self {
        MetadataValue::String(s.to_string())
    }
}

impl From<String> for MetadataValue {
    fn from(s: String) -> Self {
        MetadataValue::String(s)
    }
}

impl From<Metadata> for MetadataValue {
    fn from(map: Metadata) -> Self {
        MetadataValue::Dictionary(map)
    }
}

impl From<Vec<MetadataValue>> for MetadataValue {
    fn from(items: Vec<MetadataValue>) -> Self {
        MetadataValue::Array(items)
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for MetadataValue {
                fn from(value: $ty) -> Self {
                    MetadataValue::stringable(value)
                }
            }
        )*
    };
}

impl_from_scalar!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Build a [`Metadata`] map from `key => value` pairs.
///
/// ```
/// let md = loggingkit::metadata! { "user" => "ada", "attempt" => 3 };
/// assert_eq!(md.len(), 2);
/// ```
#[macro_export]
macro_rules! metadata {
    () => {
        $crate::Metadata::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Metadata::new();
        $(
            map.insert(::std::string::String::from($key), $crate::MetadataValue::from($value));
        )+
        map
    }};
}
