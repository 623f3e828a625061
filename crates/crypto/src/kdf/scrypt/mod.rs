//! Scrypt key derivation function (RFC 7914).
//!
//! Scrypt is a memory-hard password-based key derivation function designed to be
//! expensive to perform hardware attacks (ASICs and GPUs). It is particularly
//! well-suited for deriving encryption keys from passwords.
//!
//! The construction is layered, and each layer has its own module:
//!
//! - [`salsa`]: the Salsa20/8 core, a 64 byte to 64 byte mixing function
//! - [`block_mix`]: BlockMix, which runs Salsa20/8 over a group of `2r` blocks
//! - [`romix`]: ROMix, the memory-hard transform of one block group
//! - [`ScryptDeriver`]: PBKDF2 stretch into `p` groups, ROMix on each, PBKDF2 to the key
//!
//! # Parameters
//!
//! Scrypt has three main parameters that control its cost:
//!
//! - **N (log_n)**: CPU/memory cost parameter (as a power of 2). Higher values
//!   require more memory and time.
//! - **r**: Block size parameter. Affects memory and CPU usage.
//! - **p**: Parallelization parameter. Higher values allow more parallelism.
//!
//! # Preset Settings
//!
//! The module provides several preset configurations via [`ScryptSettings`]:
//!
//! - [`ScryptSettings::PARANOID`]: Maximum security (4GB memory when run in parallel)
//! - [`ScryptSettings::DEFAULT`]: Interactive logins (1MB memory)
//! - [`ScryptSettings::LOW_MEMORY`]: For memory-constrained environments (512kB per thread)
//! - [`ScryptSettings::TEST`]: Fast settings for testing only (a few kB)
//!
//! # Example
//!
//! ```
//! use passkdf_crypto::kdf::scrypt::{Scrypt, ScryptSettings};
//! use passkdf_crypto::kdf::PasswordBasedKDF;
//!
//! // Generate parameters with test settings (fast, for examples only)
//! let params = Scrypt::generate_parameters(&ScryptSettings::TEST).unwrap();
//!
//! // Derive a 32-byte encryption key
//! let key = Scrypt::derive_key(32, b"my_secure_password", &params).unwrap();
//! assert_eq!(key.num_bytes(), 32);
//! ```

mod error;
pub use error::{ParameterError, Phase, ScryptError};

pub mod block_mix;
pub mod romix;
pub mod salsa;
pub mod words;

mod derive;
pub use derive::{Parallelism, ScryptDeriver, scrypt, scrypt_bits};

mod params;
pub use params::{ScryptParams, generate_salt};

mod settings;
pub use settings::ScryptSettings;

pub mod backends;

/// Default scrypt implementation, mixing the block groups on the rayon thread pool.
pub type Scrypt = backends::parallel::ParallelScrypt;
