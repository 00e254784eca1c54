//! One-way hashing with no secret.

use sha2::{Digest, Sha256, Sha384, Sha512};

use crate::algorithm::HashAlgorithm;

/// Digest the UTF-8 bytes of `data` and return lowercase hex.
pub fn hash(data: &str, algorithm: HashAlgorithm) -> String {
    let bytes = data.as_bytes();
    match algorithm {
        HashAlgorithm::Sha256 => hex::encode(Sha256::digest(bytes)),
        HashAlgorithm::Sha384 => hex::encode(Sha384::digest(bytes)),
        HashAlgorithm::Sha512 => hex::encode(Sha512::digest(bytes)),
    }
}

/// Recompute the digest of `plain_text` and compare it to `hashed_value`.
///
/// No secret is involved, so ordinary string equality is used.
pub fn verify_hash(plain_text: &str, hashed_value: &str, algorithm: HashAlgorithm) -> bool {
    hash(plain_text, algorithm) == hashed_value
}
