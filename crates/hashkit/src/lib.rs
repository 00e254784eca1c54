//! Hashing, keyed signing, and reversible encryption helpers.
//!
//! Three operation families built on two primitives (SHA-2 and AES-256-CBC):
//!
//! - [`hash`] / [`verify_hash`]: one-way digest, no secret.
//! - [`sign`] / [`verify_sign`]: HMAC with a shared secret, constant-time verification.
//! - [`HashKit::encrypt`] / [`HashKit::decrypt`]: AES-256-CBC with an HMAC-SHA256 tag
//!   over the serialised payload (encrypt-then-MAC).
//!
//! # Token format
//!
//! ```text
//! base64({"iv":"<base64(iv)>","value":"<base64(ciphertext)>","mac":"<hex(tag)>"})
//! ```
//!
//! See [`payload`] for the canonical serialisation rules.
//!
//! Every operation is a stateless transform. The only shared resource is the
//! [`RandomSource`] used for keys and IVs.

pub mod algorithm;
pub mod cipher;
pub mod digest;
pub mod error;
pub mod keys;
pub mod payload;
pub mod random;
pub mod signing;

pub use algorithm::{EncryptionAlgorithm, HashAlgorithm};
pub use cipher::{decrypt, encrypt, HashKit};
pub use digest::{hash, verify_hash};
pub use error::CryptoError;
pub use keys::{generate_key, DEFAULT_KEY_SIZE};
pub use payload::EncryptedPayload;
pub use random::{OsRandom, RandomSource};
pub use signing::{sign, verify_sign};
