use derive_more::Display;
use std::str::FromStr;
use thiserror::Error;

/// Hash function underlying the HMAC used by PBKDF2.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-1 (20 byte digest). Only here for compatibility with existing keys.
    #[display("SHA-1")]
    Sha1,
    /// SHA-256 (32 byte digest), the hash RFC 7914 specifies for scrypt.
    #[default]
    #[display("SHA-256")]
    Sha256,
    /// SHA-384 (48 byte digest)
    #[display("SHA-384")]
    Sha384,
    /// SHA-512 (64 byte digest)
    #[display("SHA-512")]
    Sha512,
}

impl HashAlgorithm {
    /// All supported algorithms
    pub const ALL: [Self; 4] = [Self::Sha1, Self::Sha256, Self::Sha384, Self::Sha512];

    /// Length of the digest (and thus of one PBKDF2 output block) in bytes.
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

/// The name given to [`HashAlgorithm::from_str`] doesn't name a supported hash.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown hash algorithm '{0}'. Supported are SHA-1, SHA-256, SHA-384 and SHA-512")]
pub struct UnknownHashAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnknownHashAlgorithm;

    /// Accepts names like `SHA-256`, `sha256` or `Sha-256`.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(UnknownHashAlgorithm(name.to_string())),
        }
    }
}
