//! Shared application state injected into every Axum handler.

use hashkit::{HashAlgorithm, HashKit};

use crate::keys::ServiceKeys;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable so that Axum can clone the state for each
/// request without copying key material.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Encryption key and signing secret.
    pub keys: ServiceKeys,
    /// Key generation and encryption backed by the OS CSPRNG.
    pub kit: HashKit,
    /// Digest used when a request omits `algorithm`.
    pub default_algorithm: HashAlgorithm,
}

impl AppState {
    /// Create a new [`AppState`] with the provided keys and default digest.
    pub fn new(keys: ServiceKeys, default_algorithm: HashAlgorithm) -> Self {
        Self {
            keys,
            kit: HashKit::new(),
            default_algorithm,
        }
    }

    /// The request's algorithm, or the configured default.
    pub fn algorithm(&self, requested: Option<HashAlgorithm>) -> HashAlgorithm {
        requested.unwrap_or(self.default_algorithm)
    }
}

#[cfg(test)]
impl AppState {
    /// State with a fresh random key and a fixed signing secret.
    pub fn for_tests() -> Self {
        let key = hashkit::generate_key(hashkit::DEFAULT_KEY_SIZE).unwrap();
        Self::new(
            ServiceKeys::new(key, "test-signing-secret".into()).unwrap(),
            HashAlgorithm::default(),
        )
    }
}
