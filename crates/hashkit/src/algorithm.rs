//! Algorithm selectors for hashing, signing, and encryption.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};

/// Digest function used by [`hash`](crate::hash) and [`sign`](crate::sign).
///
/// Has no effect on encryption, whose MAC is always HMAC-SHA256.
///
/// Deserialises through [`FromStr`], so names are case-insensitive in JSON and
/// environment config alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Digest length in bytes. The hex output is twice this.
    pub fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            _ => Err(UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Block cipher mode used by [`HashKit::encrypt`](crate::HashKit::encrypt).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum EncryptionAlgorithm {
    /// AES-256 in CBC mode with PKCS#7 padding.
    #[default]
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
}

impl EncryptionAlgorithm {
    /// Required decoded key length in bytes.
    pub fn key_len(&self) -> usize {
        match self {
            EncryptionAlgorithm::Aes256Cbc => 32,
        }
    }

    /// IV length in bytes (one cipher block).
    pub fn iv_len(&self) -> usize {
        match self {
            EncryptionAlgorithm::Aes256Cbc => 16,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EncryptionAlgorithm::Aes256Cbc => "aes-256-cbc",
        }
    }
}

impl fmt::Display for EncryptionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncryptionAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aes-256-cbc" => Ok(EncryptionAlgorithm::Aes256Cbc),
            _ => Err(UnknownAlgorithm(s.to_owned())),
        }
    }
}

fn deserialize_via_from_str<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = UnknownAlgorithm>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(de::Error::custom)
}

impl<'de> Deserialize<'de> for HashAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_via_from_str(deserializer)
    }
}

impl<'de> Deserialize<'de> for EncryptionAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_via_from_str(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(HashAlgorithm::default(), HashAlgorithm::Sha256);
        assert_eq!(EncryptionAlgorithm::default(), EncryptionAlgorithm::Aes256Cbc);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("SHA384".parse::<HashAlgorithm>().unwrap(), HashAlgorithm::Sha384);
        assert_eq!(
            "AES-256-CBC".parse::<EncryptionAlgorithm>().unwrap(),
            EncryptionAlgorithm::Aes256Cbc
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!("md5".parse::<HashAlgorithm>().is_err());
        assert!("aes-128-gcm".parse::<EncryptionAlgorithm>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&HashAlgorithm::Sha512).unwrap();
        assert_eq!(json, "\"sha512\"");
        let alg: EncryptionAlgorithm = serde_json::from_str("\"aes-256-cbc\"").unwrap();
        assert_eq!(alg, EncryptionAlgorithm::Aes256Cbc);
    }

    #[test]
    fn serde_and_from_str_agree_on_case() {
        let alg: HashAlgorithm = serde_json::from_str("\"SHA512\"").unwrap();
        assert_eq!(alg, "SHA512".parse::<HashAlgorithm>().unwrap());
        let alg: EncryptionAlgorithm = serde_json::from_str("\"AES-256-CBC\"").unwrap();
        assert_eq!(alg, EncryptionAlgorithm::Aes256Cbc);
    }

    #[test]
    fn serde_rejects_unknown_name() {
        let err = serde_json::from_str::<HashAlgorithm>("\"md5\"").unwrap_err();
        assert!(err.to_string().contains("unsupported algorithm: md5"));
    }

    #[test]
    fn cbc_sizes() {
        assert_eq!(EncryptionAlgorithm::Aes256Cbc.key_len(), 32);
        assert_eq!(EncryptionAlgorithm::Aes256Cbc.iv_len(), 16);
    }
}
