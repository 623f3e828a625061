//! scrypt password-based key derivation (RFC 7914).
//!
//! This crate turns a low-entropy password plus a random salt into a
//! high-entropy key. The memory-hard parts of scrypt (Salsa20/8, BlockMix,
//! ROMix) are implemented here; PBKDF2 and HMAC are delegated to the
//! `pbkdf2` and `hmac` crates.
//!
//! # Modules
//!
//! - [`kdf`]: the [`PasswordBasedKDF`](kdf::PasswordBasedKDF) trait, the
//!   PBKDF2 adapter and the scrypt construction with its backends
//!
//! # Example
//!
//! ```
//! use passkdf_crypto::kdf::HashAlgorithm;
//! use passkdf_crypto::kdf::scrypt::scrypt_bits;
//!
//! let key = scrypt_bits(b"password", b"NaCl", 1024, 8, 16, 512, HashAlgorithm::Sha256).unwrap();
//! assert_eq!(
//!     hex::encode(&key[..8]),
//!     "fdbabe1c9d347200",
//! );
//! ```
//!
//! # Security Considerations
//!
//! - Derived keys handed out through [`EncryptionKey`] live in page-locked memory
//!   when the OS allows it and are zeroed on drop
//! - Intermediate block groups and the ROMix memory table are zeroed on drop
//! - The crate never logs passwords, salts or key material
//! - This crate uses `#![forbid(unsafe_code)]`

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod kdf;

mod key;
pub use key::{EncryptionKey, KeyAllocationError};
