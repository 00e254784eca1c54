//! [`ServiceKeys`]: the secrets the service encrypts and signs with.
//!
//! Both secrets are loaded once from configuration and live only in memory.
//! They are wiped when the last reference is dropped and never appear in
//! `Debug` output, logs, or error bodies.

use std::sync::Arc;

use anyhow::{Context, Result};
use hashkit::EncryptionAlgorithm;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::Config;

#[derive(Zeroize, ZeroizeOnDrop)]
struct Secrets {
    encryption_key: String,
    signing_secret: String,
}

/// Shared, read-only handle to the service secrets.
#[derive(Clone)]
pub struct ServiceKeys {
    inner: Arc<Secrets>,
}

impl ServiceKeys {
    /// Build from already-validated secrets.
    ///
    /// # Errors
    ///
    /// Returns an error if `encryption_key` is not a valid AES-256 key.
    pub fn new(encryption_key: String, signing_secret: String) -> Result<Self> {
        hashkit::keys::decode_key(&encryption_key, EncryptionAlgorithm::default())
            .context("invalid encryption key")?;
        Ok(Self {
            inner: Arc::new(Secrets {
                encryption_key,
                signing_secret,
            }),
        })
    }

    /// Copy the secrets out of `cfg`.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(cfg.encryption_key.clone(), cfg.signing_secret.clone())
    }

    /// Base64 encryption key, in the form `hashkit` expects.
    pub fn encryption_key(&self) -> &str {
        &self.inner.encryption_key
    }

    pub fn signing_secret(&self) -> &str {
        &self.inner.signing_secret
    }
}

impl std::fmt::Debug for ServiceKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("ServiceKeys([REDACTED])")
    }
}
