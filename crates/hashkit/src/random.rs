//! Injectable source of cryptographically secure random bytes.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::CryptoError;

/// Supplies random bytes for key and IV generation.
///
/// Implementations must be safe to share across threads. Production code uses
/// [`OsRandom`]; tests may substitute a deterministic source when checking
/// serialisation, never for security assertions.
#[cfg_attr(test, mockall::automock)]
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Entropy`] if the source cannot produce bytes.
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

/// The operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| CryptoError::Entropy(e.to_string()))
    }
}
