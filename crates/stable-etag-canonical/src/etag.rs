//! Weak entity tags derived from canonical bytes.
//!
//! A tag is `W/"` + base64(sha256(canonical_bytes(value))) + `"`. Equal values
//! produce identical tags regardless of object key order.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::canonicalizer::{canonical_bytes, CanonicalizationError};
use crate::digest::Sha256Digest;
use crate::serializer::to_canonical_value;
use crate::validation::ValidationError;

const WEAK_PREFIX: &str = "W/\"";

fn etag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"^W/"[A-Za-z0-9+/]{43}="$"#).expect("invalid regex"))
}

/// Weak entity tag of the form `W/"<base64 sha-256>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeakETag(String);

impl WeakETag {
    /// Wraps a digest in the weak validator syntax.
    pub fn from_digest(digest: &Sha256Digest) -> Self {
        Self(format!("{}{}\"", WEAK_PREFIX, digest.to_base64()))
    }

    /// Parses a tag, requiring the exact `W/"` + 44 base64 chars + `"` shape.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !etag_pattern().is_match(&s) {
            return Err(ValidationError::PatternMismatch {
                field: "etag",
                value: s,
            });
        }
        Ok(Self(s))
    }

    /// Full tag text, including prefix and quotes.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The base64 digest between the quotes.
    pub fn encoded_digest(&self) -> &str {
        &self.0[WEAK_PREFIX.len()..self.0.len() - 1]
    }
}

impl fmt::Display for WeakETag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for WeakETag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WeakETag {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<WeakETag> for String {
    fn from(tag: WeakETag) -> Self {
        tag.0
    }
}

impl AsRef<str> for WeakETag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Computes the weak tag for a JSON value.
///
/// # Example
///
/// ```rust
/// use stable_etag_canonical::compute_identifier_from_value;
/// use serde_json::json;
///
/// let a = compute_identifier_from_value(&json!({"b": 1, "a": 2}))?;
/// let b = compute_identifier_from_value(&json!({"a": 2, "b": 1}))?;
/// assert_eq!(a, b);
/// assert!(a.as_str().starts_with("W/\""));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`CanonicalizationError`] if the value has no canonical form.
pub fn compute_identifier_from_value(value: &Value) -> Result<WeakETag, CanonicalizationError> {
    let bytes = canonical_bytes(value)?;
    let etag = WeakETag::from_digest(&Sha256Digest::of(&bytes));
    tracing::debug!(canonical_len = bytes.len(), etag = %etag, "computed weak etag");
    Ok(etag)
}

/// Computes the weak tag for any serializable value.
///
/// The value is first captured with [`to_canonical_value`], so NaN, non-string
/// map keys and byte buffers fail instead of being coerced.
///
/// # Errors
///
/// Returns [`CanonicalizationError`] if capture or canonicalization fails.
pub fn compute_identifier<T>(value: &T) -> Result<WeakETag, CanonicalizationError>
where
    T: Serialize + ?Sized,
{
    let value = to_canonical_value(value)?;
    compute_identifier_from_value(&value)
}

/// Checks whether `claimed` is the tag of `value`.
///
/// # Errors
///
/// Returns [`CanonicalizationError`] if computing the tag fails.
pub fn verify_identifier<T>(value: &T, claimed: &WeakETag) -> Result<bool, CanonicalizationError>
where
    T: Serialize + ?Sized,
{
    let computed = compute_identifier(value)?;
    Ok(&computed == claimed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_has_known_tag() {
        let etag = compute_identifier_from_value(&json!({})).unwrap();
        assert_eq!(
            etag.as_str(),
            r#"W/"RBNvo1WzZ4oRRq0W9+hknpT7T8If536DEMBg9hyq/4o=""#
        );
        assert_eq!(
            etag.encoded_digest(),
            "RBNvo1WzZ4oRRq0W9+hknpT7T8If536DEMBg9hyq/4o="
        );
    }

    #[test]
    fn parse_accepts_computed_tags() {
        let etag = compute_identifier_from_value(&json!([1, 2, 3])).unwrap();
        assert_eq!(WeakETag::parse(etag.to_string()).unwrap(), etag);
        assert_eq!(etag.as_str().parse::<WeakETag>().unwrap(), etag);
    }

    #[test]
    fn parse_rejects_malformed_tags() {
        let body = "RBNvo1WzZ4oRRq0W9+hknpT7T8If536DEMBg9hyq/4o=";
        for bad in [
            body.to_string(),
            format!("\"{}\"", body),
            format!("W/{}", body),
            format!("w/\"{}\"", body),
            format!("W/\"{}=\"", &body[..42]),
            format!("W/\"{}\"", body.replace('+', "-")),
            format!("W/\"{}\" ", body),
            String::new(),
        ] {
            assert!(
                matches!(
                    WeakETag::parse(bad.clone()),
                    Err(ValidationError::PatternMismatch { field: "etag", .. })
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn serde_uses_plain_string() {
        let etag = compute_identifier_from_value(&json!({})).unwrap();
        let encoded = serde_json::to_string(&etag).unwrap();
        assert_eq!(encoded, serde_json::to_string(etag.as_str()).unwrap());
        let decoded: WeakETag = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, etag);
        assert!(serde_json::from_str::<WeakETag>(r#""not-a-tag""#).is_err());
    }

    #[test]
    fn verify_matches_only_equal_content() {
        let etag = compute_identifier(&json!({"a": 1})).unwrap();
        assert!(verify_identifier(&json!({"a": 1}), &etag).unwrap());
        assert!(!verify_identifier(&json!({"a": 2}), &etag).unwrap());
    }

    #[test]
    fn serializable_and_value_paths_agree() {
        let tuple = ("x", 1u8, Some(true));
        let from_value = compute_identifier_from_value(&json!(["x", 1, true])).unwrap();
        assert_eq!(compute_identifier(&tuple).unwrap(), from_value);
    }
}
