//! Request and response types exchanged over the HTTP API.
//!
//! All bodies are JSON. Optional `algorithm` fields fall back to the service's
//! configured default digest.

use hashkit::HashAlgorithm;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Request body for `POST /keys`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateKeyRequest {
    /// Number of random bytes; defaults to 32.
    #[serde(default)]
    pub size: Option<usize>,
}

/// Response body for `POST /keys`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateKeyResponse {
    /// Base64-encoded key.
    pub key: String,
}

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

/// Request body for `POST /hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashRequest {
    pub data: String,
    #[serde(default)]
    pub algorithm: Option<HashAlgorithm>,
}

/// Response body for `POST /hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashResponse {
    /// Lowercase hex digest.
    pub hash: String,
}

/// Request body for `POST /hash/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyHashRequest {
    pub data: String,
    pub hash: String,
    #[serde(default)]
    pub algorithm: Option<HashAlgorithm>,
}

// ---------------------------------------------------------------------------
// Sign
// ---------------------------------------------------------------------------

/// Request body for `POST /sign`. The secret is held by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignRequest {
    pub data: String,
    #[serde(default)]
    pub algorithm: Option<HashAlgorithm>,
}

/// Response body for `POST /sign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignResponse {
    /// Lowercase hex HMAC.
    pub signature: String,
}

/// Request body for `POST /sign/verify`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifySignRequest {
    pub data: String,
    pub signature: String,
    #[serde(default)]
    pub algorithm: Option<HashAlgorithm>,
}

/// Response body for both verify endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
}

// ---------------------------------------------------------------------------
// Encrypt / decrypt
// ---------------------------------------------------------------------------

/// Request body for `POST /encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptRequest {
    /// Plaintext to encrypt under the service key.
    pub data: String,
}

/// Response body for `POST /encrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptResponse {
    /// Opaque base64 token.
    pub payload: String,
}

/// Request body for `POST /decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptRequest {
    /// Token previously returned by `POST /encrypt`.
    pub payload: String,
}

/// Response body for `POST /decrypt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptResponse {
    pub data: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"bad_request"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(e: &crate::ServiceError) -> Self {
        Self::new(e.code(), e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` once the server is accepting requests.
    pub status: String,
    /// Crate version of the running service.
    pub version: String,
}
