use base64::Engine;
use sha2::{Digest as _, Sha256};
use std::fmt;

/// Length in bytes of a SHA-256 digest.
pub const DIGEST_LEN: usize = 32;

/// SHA-256 digest of canonical bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Digest([u8; DIGEST_LEN]);

impl Sha256Digest {
    /// Hashes `bytes` with SHA-256.
    pub fn of(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Standard padded base64 of the digest (always 44 characters).
    pub fn to_base64(&self) -> String {
        encode_base64(&self.0)
    }
}

impl From<[u8; DIGEST_LEN]> for Sha256Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256Digest({})", self.to_base64())
    }
}

/// Encodes `bytes` as base64 with the standard alphabet and `=` padding.
pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
