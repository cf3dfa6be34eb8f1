//! Order-normalizing compact serialization.
//!
//! Canonical text is compact JSON with every object's members enumerated in
//! ascending code-point order of their keys. Array order is preserved.
//!
//! Strings escape `"` and `\`, and control characters below U+0020 (`\b`, `\t`,
//! `\n`, `\f`, `\r`, otherwise `\u00XX` in lowercase hex). All other characters,
//! including non-ASCII, are written as literal UTF-8.
//!
//! Numbers follow a fixed grammar: integers that fit in `i64`/`u64` are written
//! in base 10, everything else is an `f64` written as the shortest decimal that
//! round-trips and always carries a `.` or an exponent (`1.0`, `0.5`, `1e20`).

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Number, Value};
use std::fmt;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CanonicalizationError {
    /// The value has a shape outside null/bool/number/string/array/object.
    #[error("unsupported value type {kind} at {path}")]
    UnsupportedType {
        /// Serde data model kind that was refused.
        kind: String,
        /// Location of the offending value.
        path: ErrorPath,
    },
    /// NaN, infinities, or integers outside the 64-bit range.
    #[error("unrepresentable number {value} at {path}")]
    UnrepresentableNumber {
        /// The number as written by Rust.
        value: String,
        /// Location of the offending value.
        path: ErrorPath,
    },
    /// A mapping key that is not a string.
    #[error("mapping key must be a string, found {kind} at {path}")]
    InvalidKeyType {
        /// Serde data model kind of the key.
        kind: String,
        /// Location of the mapping holding the key.
        path: ErrorPath,
    },
    /// Generic failure.
    #[error("other error: {0}")]
    Other(String),
}

impl CanonicalizationError {
    pub(crate) fn unsupported(kind: impl Into<String>) -> Self {
        Self::UnsupportedType {
            kind: kind.into(),
            path: ErrorPath::default(),
        }
    }

    pub(crate) fn unrepresentable(value: impl fmt::Display) -> Self {
        Self::UnrepresentableNumber {
            value: value.to_string(),
            path: ErrorPath::default(),
        }
    }

    pub(crate) fn invalid_key(kind: impl Into<String>) -> Self {
        Self::InvalidKeyType {
            kind: kind.into(),
            path: ErrorPath::default(),
        }
    }

    /// Records that the error happened below `segment`.
    pub(crate) fn within(mut self, segment: String) -> Self {
        if let Some(path) = self.path_mut() {
            path.segments.insert(0, segment);
        }
        self
    }

    /// Location of the offending value, if the error has one.
    pub fn path(&self) -> Option<&ErrorPath> {
        match self {
            Self::UnsupportedType { path, .. }
            | Self::UnrepresentableNumber { path, .. }
            | Self::InvalidKeyType { path, .. } => Some(path),
            Self::Other(_) => None,
        }
    }

    fn path_mut(&mut self) -> Option<&mut ErrorPath> {
        match self {
            Self::UnsupportedType { path, .. }
            | Self::UnrepresentableNumber { path, .. }
            | Self::InvalidKeyType { path, .. } => Some(path),
            Self::Other(_) => None,
        }
    }
}

/// Dotted location inside a value, e.g. `items.[2].id`.
///
/// Built while an error unwinds, so successful calls never pay for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorPath {
    segments: Vec<String>,
}

impl ErrorPath {
    /// Field names and `[index]` segments from the outermost value inward.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ErrorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Borrowed view of a [`Value`] whose mappings enumerate their keys in sorted order.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized<'a> {
    /// JSON `null`.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON number, unchanged.
    Number(&'a Number),
    /// JSON string, unchanged.
    String(&'a str),
    /// Array elements in their original order.
    Sequence(Vec<Normalized<'a>>),
    /// Object members sorted by key.
    Mapping(Vec<(&'a str, Normalized<'a>)>),
}

impl Serialize for Normalized<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Normalized::Null => serializer.serialize_unit(),
            Normalized::Bool(b) => serializer.serialize_bool(*b),
            Normalized::Number(n) => n.serialize(serializer),
            Normalized::String(s) => serializer.serialize_str(s),
            Normalized::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Normalized::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

/// Rewrites `value` so that every mapping enumerates its keys in ascending order.
///
/// Arrays keep their element order and scalars are returned as-is. The result
/// borrows from `value`; nothing is copied except the entry vectors. Every
/// `serde_json::Value` has a normalized form, so this cannot fail.
pub fn normalize(value: &Value) -> Normalized<'_> {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<_> = map
                .iter()
                .map(|(key, child)| (key.as_str(), normalize(child)))
                .collect();
            // Keys are unique, and UTF-8 byte order equals code-point order.
            entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
            Normalized::Mapping(entries)
        }
        Value::Array(items) => Normalized::Sequence(items.iter().map(normalize).collect()),
        Value::Number(num) => Normalized::Number(num),
        Value::String(s) => Normalized::String(s),
        Value::Bool(b) => Normalized::Bool(*b),
        Value::Null => Normalized::Null,
    }
}

/// Writes a normalized value as compact canonical UTF-8 bytes.
pub fn serialize(normalized: &Normalized<'_>) -> Result<Vec<u8>, CanonicalizationError> {
    serde_json::to_vec(normalized).map_err(|err| CanonicalizationError::Other(err.to_string()))
}

/// Canonical bytes for `value`: `serialize(normalize(value))`.
pub fn canonical_bytes(value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
    let normalized = normalize(value);
    let bytes = serialize(&normalized)?;
    tracing::trace!(len = bytes.len(), "canonicalized value");
    Ok(bytes)
}

/// Canonical text for `value`.
pub fn stable_stringify(value: &Value) -> Result<String, CanonicalizationError> {
    let bytes = canonical_bytes(value)?;
    String::from_utf8(bytes).map_err(|err| CanonicalizationError::Other(err.to_string()))
}
