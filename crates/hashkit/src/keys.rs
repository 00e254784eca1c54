//! Symmetric key generation and decoding.
//!
//! Keys travel as standard base64 text. [`KeyBytes`] holds the decoded form and
//! wipes it on drop.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithm::EncryptionAlgorithm;
use crate::error::CryptoError;
use crate::random::{OsRandom, RandomSource};

/// Default key size in bytes, matching AES-256.
pub const DEFAULT_KEY_SIZE: usize = 32;

/// Decoded key material, zeroed when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyBytes(Vec<u8>);

impl KeyBytes {
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for KeyBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyBytes([REDACTED])")
    }
}

/// Generate `size` random bytes from the OS CSPRNG and return them base64-encoded.
///
/// # Errors
///
/// Returns [`CryptoError::Entropy`] if the OS random source is unavailable.
pub fn generate_key(size: usize) -> Result<String, CryptoError> {
    generate_key_with(&OsRandom, size)
}

pub(crate) fn generate_key_with<R: RandomSource>(rng: &R, size: usize) -> Result<String, CryptoError> {
    let mut buf = vec![0u8; size];
    rng.fill_bytes(&mut buf)?;
    let encoded = STANDARD.encode(&buf);
    buf.zeroize();
    Ok(encoded)
}

/// Decode a base64 key and check its length against `algorithm`.
///
/// # Errors
///
/// Returns [`CryptoError::Configuration`] if `key` is not valid base64 or does
/// not decode to [`EncryptionAlgorithm::key_len`] bytes.
pub fn decode_key(key: &str, algorithm: EncryptionAlgorithm) -> Result<KeyBytes, CryptoError> {
    let bytes = KeyBytes(
        STANDARD
            .decode(key)
            .map_err(|_| CryptoError::Configuration("key is not valid base64".into()))?,
    );
    if bytes.len() != algorithm.key_len() {
        return Err(CryptoError::Configuration(format!(
            "{algorithm} requires a {}-byte key, got {} bytes",
            algorithm.key_len(),
            bytes.len()
        )));
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::MockRandomSource;

    #[test]
    fn default_key_is_44_chars() {
        let key = generate_key(DEFAULT_KEY_SIZE).unwrap();
        assert_eq!(key.len(), 44);
        assert_eq!(STANDARD.decode(&key).unwrap().len(), 32);
    }

    #[test]
    fn keys_differ() {
        assert_ne!(generate_key(32).unwrap(), generate_key(32).unwrap());
    }

    #[test]
    fn custom_size() {
        let key = generate_key(16).unwrap();
        assert_eq!(STANDARD.decode(key).unwrap().len(), 16);
    }

    #[test]
    fn entropy_failure_propagates() {
        let mut rng = MockRandomSource::new();
        rng.expect_fill_bytes()
            .returning(|_| Err(CryptoError::Entropy("exhausted".into())));
        let err = generate_key_with(&rng, 32).unwrap_err();
        assert_eq!(err.kind(), "entropy");
    }

    #[test]
    fn uses_injected_source() {
        let mut rng = MockRandomSource::new();
        rng.expect_fill_bytes().times(1).returning(|dest| {
            dest.fill(0xAB);
            Ok(())
        });
        let key = generate_key_with(&rng, 3).unwrap();
        assert_eq!(key, STANDARD.encode([0xAB, 0xAB, 0xAB]));
    }

    #[test]
    fn decode_accepts_generated_key() {
        let key = generate_key(32).unwrap();
        let bytes = decode_key(&key, EncryptionAlgorithm::Aes256Cbc).unwrap();
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn decode_rejects_short_key() {
        let key = generate_key(16).unwrap();
        let err = decode_key(&key, EncryptionAlgorithm::Aes256Cbc).unwrap_err();
        assert!(matches!(err, CryptoError::Configuration(_)));
        assert!(err.to_string().contains("got 16 bytes"));
    }

    #[test]
    fn decode_rejects_bad_base64() {
        let err = decode_key("not base64!!", EncryptionAlgorithm::Aes256Cbc).unwrap_err();
        assert!(matches!(err, CryptoError::Configuration(_)));
    }

    #[test]
    fn key_bytes_redacted_in_debug() {
        let key = decode_key(&generate_key(32).unwrap(), EncryptionAlgorithm::Aes256Cbc).unwrap();
        assert!(format!("{key:?}").contains("REDACTED"));
    }
}
