//! Deterministic JSON canonicalization and weak entity tag derivation.
//!
//! Two values that differ only in object key order canonicalize to the same
//! bytes and therefore share the same `W/"<base64 sha-256>"` tag. The crate
//! is pure: no I/O, no shared state, safe to call from any thread.
//!
#![deny(missing_docs)]

/// Order-normalizing canonical serialization.
pub mod canonicalizer;
/// SHA-256 digests and base64 encoding.
pub mod digest;
/// Weak entity tags.
pub mod etag;
/// Strict capture of `Serialize` types into JSON values.
pub mod serializer;
/// Validation helpers used by canonical types.
pub mod validation;

pub use canonicalizer::{
    canonical_bytes, normalize, serialize, stable_stringify, CanonicalizationError, ErrorPath,
    Normalized,
};
pub use digest::{encode_base64, Sha256Digest, DIGEST_LEN};
pub use etag::{compute_identifier, compute_identifier_from_value, verify_identifier, WeakETag};
pub use serializer::to_canonical_value;
pub use validation::ValidationError;
