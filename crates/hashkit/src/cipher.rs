//! AES-256-CBC encryption with an HMAC-SHA256 tag (encrypt-then-MAC).
//!
//! **Key forms:** the cipher uses the decoded key bytes, while the MAC is keyed
//! with the bytes of the base64 key *string* exactly as the caller supplied it.
//! Existing tokens depend on this; changing either side breaks decryption of
//! everything already issued.
//!
//! **Order of checks in [`HashKit::decrypt`]:** the tag is verified before any
//! cipher operation runs. Padding errors are only reachable with a valid tag.

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::algorithm::EncryptionAlgorithm;
use crate::error::CryptoError;
use crate::keys::{decode_key, generate_key_with};
use crate::payload::EncryptedPayload;
use crate::random::{OsRandom, RandomSource};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Entry point for operations that need randomness.
///
/// Generic over the [`RandomSource`] so tests can inject a deterministic one.
/// Holds no other state; share freely across threads.
#[derive(Debug, Clone, Default)]
pub struct HashKit<R = OsRandom> {
    rng: R,
}

impl HashKit<OsRandom> {
    /// A kit backed by the OS CSPRNG.
    pub fn new() -> Self {
        Self { rng: OsRandom }
    }
}

impl<R: RandomSource> HashKit<R> {
    /// A kit backed by `rng`.
    pub fn with_random(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a base64 key of `size` random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Entropy`] if the random source fails.
    pub fn generate_key(&self, size: usize) -> Result<String, CryptoError> {
        generate_key_with(&self.rng, size)
    }

    /// Encrypt `data` under the base64 `key` and return an opaque token.
    ///
    /// A fresh IV is drawn on every call, so encrypting the same input twice
    /// yields different tokens.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Configuration`] if `key` is not base64 or has the
    /// wrong length, and [`CryptoError::Entropy`] if no IV could be drawn.
    pub fn encrypt(
        &self,
        data: &str,
        key: &str,
        algorithm: EncryptionAlgorithm,
    ) -> Result<String, CryptoError> {
        let mut iv = vec![0u8; algorithm.iv_len()];
        self.rng.fill_bytes(&mut iv)?;

        let key_bytes = decode_key(key, algorithm)?;
        let ciphertext = match algorithm {
            EncryptionAlgorithm::Aes256Cbc => Aes256CbcEnc::new_from_slices(key_bytes.as_slice(), &iv)
                .map_err(|_| CryptoError::Configuration("cipher rejected key or IV length".into()))?
                .encrypt_padded_vec_mut::<Pkcs7>(data.as_bytes()),
        };

        let mut payload = EncryptedPayload::new(STANDARD.encode(&iv), STANDARD.encode(&ciphertext));
        payload.seal(key.as_bytes());

        debug!(%algorithm, ciphertext_len = ciphertext.len(), "encrypted payload");
        Ok(payload.to_token())
    }

    /// Verify and decrypt a token produced by [`HashKit::encrypt`].
    ///
    /// # Errors
    ///
    /// - [`CryptoError::Format`] if the token or its fields cannot be decoded.
    /// - [`CryptoError::Authentication`] if the tag does not match; nothing is decrypted.
    /// - [`CryptoError::Configuration`] if `key` is not a valid key.
    /// - [`CryptoError::Decryption`] on bad padding or non-UTF-8 plaintext.
    pub fn decrypt(
        &self,
        encrypted: &str,
        key: &str,
        algorithm: EncryptionAlgorithm,
    ) -> Result<String, CryptoError> {
        decrypt_token(encrypted, key, algorithm)
    }
}

fn decrypt_token(
    encrypted: &str,
    key: &str,
    algorithm: EncryptionAlgorithm,
) -> Result<String, CryptoError> {
    let payload = EncryptedPayload::from_token(encrypted)?;

    if let Err(e) = payload.verify(key.as_bytes()) {
        warn!("rejected payload with invalid MAC");
        return Err(e);
    }

    let iv = STANDARD
        .decode(&payload.iv)
        .map_err(|_| CryptoError::Format("iv is not valid base64".into()))?;
    if iv.len() != algorithm.iv_len() {
        return Err(CryptoError::Format(format!(
            "iv must be {} bytes, got {}",
            algorithm.iv_len(),
            iv.len()
        )));
    }
    let ciphertext = STANDARD
        .decode(&payload.value)
        .map_err(|_| CryptoError::Format("value is not valid base64".into()))?;
    let key_bytes = decode_key(key, algorithm)?;

    let plaintext = Zeroizing::new(match algorithm {
        EncryptionAlgorithm::Aes256Cbc => Aes256CbcDec::new_from_slices(key_bytes.as_slice(), &iv)
            .map_err(|_| CryptoError::Configuration("cipher rejected key or IV length".into()))?
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| CryptoError::Decryption)?,
    });

    String::from_utf8(plaintext.to_vec()).map_err(|_| CryptoError::Decryption)
}

/// [`HashKit::encrypt`] with OS randomness.
pub fn encrypt(data: &str, key: &str, algorithm: EncryptionAlgorithm) -> Result<String, CryptoError> {
    HashKit::new().encrypt(data, key, algorithm)
}

/// [`HashKit::decrypt`] without needing a kit; decryption draws no randomness.
pub fn decrypt(encrypted: &str, key: &str, algorithm: EncryptionAlgorithm) -> Result<String, CryptoError> {
    decrypt_token(encrypted, key, algorithm)
}
