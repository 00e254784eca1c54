//! Configuration loading and validation for the service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use std::time::Duration;

use anyhow::{Context, Result};
use hashkit::{EncryptionAlgorithm, HashAlgorithm};
use serde::Deserialize;

/// Validated service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base64 AES-256 key used by `/encrypt` and `/decrypt`. **Required.**
    pub encryption_key: String,

    /// HMAC secret used by `/sign` and `/sign/verify`. **Required.**
    pub signing_secret: String,

    /// TCP port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Digest used when a request does not name one.
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_request_timeout() -> u64 {
    crate::server::middleware::REQUEST_TIMEOUT.as_secs()
}
fn default_log_level() -> String {
    "info".into()
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("encryption_key", &"[REDACTED]")
            .field("signing_secret", &"[REDACTED]")
            .field("listen_port", &self.listen_port)
            .field("hash_algorithm", &self.hash_algorithm)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.encryption_key, "ENCRYPTION_KEY")?;
        ensure_non_empty(&self.signing_secret, "SIGNING_SECRET")?;

        // Only the length is reported; the key itself never reaches an error message.
        hashkit::keys::decode_key(&self.encryption_key, EncryptionAlgorithm::default())
            .context("ENCRYPTION_KEY must be a base64-encoded 32-byte key")?;

        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be > 0");
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            encryption_key: hashkit::generate_key(32).unwrap(),
            signing_secret: "s3cret".into(),
            listen_port: default_listen_port(),
            hash_algorithm: HashAlgorithm::default(),
            request_timeout_secs: default_request_timeout(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_listen_port(), 8080);
        assert_eq!(default_request_timeout(), 10);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_signing_secret() {
        let cfg = Config {
            signing_secret: "  ".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_short_encryption_key() {
        let cfg = Config {
            encryption_key: hashkit::generate_key(16).unwrap(),
            ..valid()
        };
        let err = cfg.validate().unwrap_err();
        assert!(format!("{err:#}").contains("got 16 bytes"));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let cfg = Config {
            request_timeout_secs: 0,
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn debug_redacts_secrets() {
        let cfg = valid();
        let out = format!("{cfg:?}");
        assert!(!out.contains(&cfg.encryption_key));
        assert!(!out.contains("s3cret"));
    }
}
