//! HMAC signing with a shared secret.

use hmac::{digest::KeyInit, Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::algorithm::HashAlgorithm;

/// Compute `HMAC(secret, data)` under `algorithm` and return lowercase hex.
pub fn sign(data: &str, secret: &str, algorithm: HashAlgorithm) -> String {
    hex::encode(hmac_bytes(secret.as_bytes(), data.as_bytes(), algorithm))
}

/// Recompute the signature of `data` and compare it with `signature` in constant time.
///
/// A signature of the wrong length is reported as `false`, the same as any
/// other mismatch.
pub fn verify_sign(data: &str, signature: &str, secret: &str, algorithm: HashAlgorithm) -> bool {
    let expected = sign(data, secret, algorithm);
    constant_time_eq(expected.as_bytes(), signature.as_bytes())
}

/// Byte equality whose running time does not depend on where the inputs differ.
///
/// Unequal lengths return `false` without comparing contents.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

pub(crate) fn hmac_bytes(secret: &[u8], data: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => mac::<Hmac<Sha256>>(secret, data),
        HashAlgorithm::Sha384 => mac::<Hmac<Sha384>>(secret, data),
        HashAlgorithm::Sha512 => mac::<Hmac<Sha512>>(secret, data),
    }
}

fn mac<M: Mac + KeyInit>(secret: &[u8], data: &[u8]) -> Vec<u8> {
    let mut m = <M as KeyInit>::new_from_slice(secret).expect("HMAC accepts keys of any length");
    m.update(data);
    m.finalize().into_bytes().to_vec()
}
