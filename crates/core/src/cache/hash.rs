//! Content hashing for the dedup key.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of raw image bytes.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
