//! Common error types shared across crates.

use hashkit::CryptoError;
use thiserror::Error;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::Integrity`] → 422
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed: bad JSON, unknown algorithm, or an unparseable token.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A token failed MAC verification or could not be decrypted.
    #[error("integrity failure: {0}")]
    Integrity(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::Integrity(_) => 422,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in [`ErrorResponse`](crate::protocol::ErrorResponse).
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::Integrity(_) => "integrity_failure",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

impl From<CryptoError> for ServiceError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::Format(_) => ServiceError::BadRequest(e.to_string()),
            CryptoError::Authentication | CryptoError::Decryption => {
                ServiceError::Integrity(e.to_string())
            }
            // Service keys are validated at startup, so a bad key here is our fault.
            CryptoError::Configuration(_) | CryptoError::Entropy(_) => {
                ServiceError::Internal(e.kind().into())
            }
        }
    }
}
