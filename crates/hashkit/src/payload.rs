//! The encrypted payload and its canonical serialisation.
//!
//! # Wire format (v1)
//!
//! The payload serialises to compact JSON with keys in a fixed order and no
//! whitespace:
//!
//! ```text
//! {"iv":"<base64(iv)>","value":"<base64(ciphertext)>","mac":"<hex(tag)>"}
//! ```
//!
//! The token handed to callers is the standard base64 encoding of that JSON.
//! The MAC is computed over the base64 encoding of the same JSON with `mac`
//! set to the empty string. Producer and consumer must build these bytes
//! identically, so both go through [`EncryptedPayload::authenticated_data`].

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::algorithm::HashAlgorithm;
use crate::error::CryptoError;
use crate::signing::{constant_time_eq, hmac_bytes};

/// Logical contents of an encrypted token.
///
/// Field declaration order is the serialisation order; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPayload {
    /// Base64 IV.
    pub iv: String,
    /// Base64 ciphertext.
    pub value: String,
    /// Hex HMAC-SHA256 tag; empty while the tag itself is being computed.
    pub mac: String,
}

impl EncryptedPayload {
    /// Build an unsigned payload (empty `mac`).
    pub fn new(iv: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            iv: iv.into(),
            value: value.into(),
            mac: String::new(),
        }
    }

    /// Canonical JSON bytes of this payload.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self).expect("a struct of three strings always serialises to JSON")
    }

    /// The string the MAC is computed over: base64 of the canonical JSON with
    /// an empty `mac` field, regardless of the current `mac` value.
    pub fn authenticated_data(&self) -> String {
        let unsigned = Self::new(self.iv.as_str(), self.value.as_str());
        STANDARD.encode(unsigned.canonical_json())
    }

    /// Compute the hex tag for this payload under `mac_key`.
    pub fn compute_mac(&self, mac_key: &[u8]) -> String {
        hex::encode(hmac_bytes(
            mac_key,
            self.authenticated_data().as_bytes(),
            HashAlgorithm::Sha256,
        ))
    }

    /// Compute and store the tag.
    pub fn seal(&mut self, mac_key: &[u8]) {
        self.mac = self.compute_mac(mac_key);
    }

    /// Check the stored tag against a freshly computed one, in constant time.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Authentication`] on mismatch.
    pub fn verify(&self, mac_key: &[u8]) -> Result<(), CryptoError> {
        let expected = self.compute_mac(mac_key);
        if constant_time_eq(expected.as_bytes(), self.mac.as_bytes()) {
            Ok(())
        } else {
            Err(CryptoError::Authentication)
        }
    }

    /// Encode to the opaque token form.
    pub fn to_token(&self) -> String {
        STANDARD.encode(self.canonical_json())
    }

    /// Parse an opaque token.
    ///
    /// Unknown JSON keys are ignored; `iv`, `value`, and `mac` must all be strings.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Format`] if `token` is not base64 or does not
    /// contain a payload object.
    pub fn from_token(token: &str) -> Result<Self, CryptoError> {
        let json = STANDARD
            .decode(token.trim())
            .map_err(|_| CryptoError::Format("token is not valid base64".into()))?;
        serde_json::from_slice(&json)
            .map_err(|e| CryptoError::Format(format!("payload is not valid JSON: {e}")))
    }
}
