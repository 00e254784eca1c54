//! Error taxonomy for the crypto layer.

use thiserror::Error;

/// Errors produced by key handling, encryption, and decryption.
///
/// Messages never include key material, ciphertext, or plaintext.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The supplied key is not valid base64 or has the wrong decoded length.
    #[error("invalid key: {0}")]
    Configuration(String),

    /// The encrypted token is not valid base64 or not a parseable payload.
    #[error("malformed payload: {0}")]
    Format(String),

    /// The recomputed MAC does not match the one carried by the payload.
    #[error("MAC verification failed")]
    Authentication,

    /// The cipher rejected the ciphertext (bad padding) or the plaintext is not UTF-8.
    #[error("decryption failed")]
    Decryption,

    /// The secure random source could not produce bytes.
    #[error("random source unavailable: {0}")]
    Entropy(String),
}

impl CryptoError {
    /// Short machine-readable name of the error kind, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            CryptoError::Configuration(_) => "configuration",
            CryptoError::Format(_) => "format",
            CryptoError::Authentication => "authentication",
            CryptoError::Decryption => "decryption",
            CryptoError::Entropy(_) => "entropy",
        }
    }
}
