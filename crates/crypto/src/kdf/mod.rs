//! Key derivation functions (KDFs) for password-based encryption.
//!
//! This module provides key derivation functions that convert passwords into
//! cryptographic keys. KDFs are essential for password-based encryption as they:
//!
//! - Derive keys of the required length from passwords of any length
//! - Add computational cost to slow down brute-force attacks
//! - Use salt to prevent rainbow table attacks
//!
//! # Available KDFs
//!
//! - [`scrypt`]: Memory-hard KDF (RFC 7914), with a sequential and a parallel backend
//! - [`pbkdf2`](mod@pbkdf2): PBKDF2-HMAC (RFC 8018), used by scrypt as its stretching step
//!
//! # Example
//!
//! ```
//! use passkdf_crypto::kdf::scrypt::{Scrypt, ScryptSettings};
//! use passkdf_crypto::kdf::PasswordBasedKDF;
//!
//! // Generate parameters with a fresh random salt
//! let params = Scrypt::generate_parameters(&ScryptSettings::TEST).unwrap();
//!
//! // Derive a 32-byte key from a password
//! let key = Scrypt::derive_key(32, b"my_password", &params).unwrap();
//!
//! // The same password and parameters always produce the same key
//! let key2 = Scrypt::derive_key(32, b"my_password", &params).unwrap();
//! assert_eq!(key, key2);
//! ```

use anyhow::Result;
use std::fmt::Debug;

use crate::EncryptionKey;

mod hash_algorithm;
pub use hash_algorithm::{HashAlgorithm, UnknownHashAlgorithm};

pub mod pbkdf2;
pub mod scrypt;

/// A password-based key derivation function.
///
/// This trait defines the interface for deriving cryptographic keys from passwords.
/// Implementations should be memory-hard and computationally expensive to resist
/// brute-force attacks.
///
/// # Security
///
/// - Use appropriate settings for your security requirements (see [`scrypt::ScryptSettings`])
/// - Store parameters alongside encrypted data for decryption
/// - Never reuse a salt across different passwords
pub trait PasswordBasedKDF {
    /// Configuration for generating new parameters (e.g., memory cost)
    type Settings;
    /// The actual parameters used for key derivation (includes salt)
    type Parameters: Debug;
    /// Error returned when the parameters can't be used to derive a key
    type Error: std::error::Error + Send + Sync + 'static;

    /// Derives an encryption key from a password.
    ///
    /// # Arguments
    ///
    /// * `key_size` - The desired key size in bytes
    /// * `password` - The password to derive from
    /// * `kdf_parameters` - The KDF parameters (including salt)
    ///
    /// # Returns
    ///
    /// An encryption key of the requested size. The same password and parameters
    /// always produce the same key.
    fn derive_key(
        key_size: usize,
        password: &[u8],
        kdf_parameters: &Self::Parameters,
    ) -> Result<EncryptionKey, Self::Error>;

    /// Generates a new set of KDF parameters based on the given settings.
    ///
    /// This generates a random salt and creates parameters suitable for
    /// encrypting new data. The generated parameters cannot be used to
    /// decrypt existing data encrypted with different parameters.
    fn generate_parameters(settings: &Self::Settings) -> Result<Self::Parameters>;
}
