//! Key Codec Module
//!
//! Maps arbitrary cache keys to fixed-length, filesystem-safe identifiers.

use sha2::{Digest, Sha256};

// == Encode ==
/// Hashes a cache key into a lowercase hex SHA-256 digest.
///
/// The mapping is one-way. Separators, `..` and any other characters that
/// are unsafe in a filename never reach the filesystem.
pub fn encode(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}
