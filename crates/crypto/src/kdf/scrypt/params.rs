//! Scrypt parameter storage.

use anyhow::{Context, Result, ensure};
use rand::{RngCore, rng};
use std::fmt::Debug;

use super::derive::{Parallelism, ScryptDeriver};
use super::error::ScryptError;
use super::romix::try_with_capacity;
use super::salsa::BLOCK_BYTES;
use super::ScryptSettings;
use crate::kdf::HashAlgorithm;

/// Parameters for the scrypt key derivation function.
///
/// `ScryptParams` contains all the information needed to derive the same key
/// from a password: the cost parameters (N, r, p), the hash used by the PBKDF2
/// steps and the salt. These parameters must be stored alongside encrypted data
/// to enable decryption.
///
/// # Example
///
/// ```
/// use passkdf_crypto::kdf::HashAlgorithm;
/// use passkdf_crypto::kdf::scrypt::{ScryptParams, ScryptSettings};
///
/// // Generate new parameters with a random salt
/// let params = ScryptParams::generate(&ScryptSettings::TEST).unwrap();
/// assert_eq!(16, params.n());
///
/// // Or restore stored ones
/// let restored = ScryptParams::new(16, 1, 2, HashAlgorithm::Sha256, params.salt().to_vec()).unwrap();
/// assert_eq!(params, restored);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ScryptParams {
    deriver: ScryptDeriver,
    salt: Vec<u8>,
}

impl ScryptParams {
    /// Creates parameters from known values, e.g. ones stored next to encrypted data.
    ///
    /// Fails with [`ScryptError::InvalidParameter`] if `n`, `r`, `p` can't be used with `hash`.
    pub fn new(
        n: u64,
        r: u32,
        p: u32,
        hash: HashAlgorithm,
        salt: Vec<u8>,
    ) -> Result<Self, ScryptError> {
        Ok(Self {
            deriver: ScryptDeriver::new(n, r, p, hash)?,
            salt,
        })
    }

    /// Generates new scrypt parameters with a random salt.
    ///
    /// # Arguments
    ///
    /// * `settings` - The cost settings (log_n, r, p, salt_len, hash)
    ///
    /// # Returns
    ///
    /// New parameters with a randomly generated salt, or an error if
    /// the settings are invalid (e.g., log_n >= 64).
    pub fn generate(settings: &ScryptSettings) -> Result<Self> {
        ensure!(
            settings.log_n < 64,
            "Scrypt parameter log_n is {} but must be smaller than 64",
            settings.log_n,
        );
        let params = Self::new(
            1 << settings.log_n,
            settings.r,
            settings.p,
            settings.hash,
            generate_salt(settings.salt_len)?,
        )
        .with_context(|| format!("Invalid scrypt settings {settings:?}"))?;
        Ok(params)
    }

    /// Returns the CPU/memory cost parameter N.
    pub fn n(&self) -> u64 {
        self.deriver.n()
    }

    /// Returns the CPU/memory cost parameter as log2(N).
    pub fn log_n(&self) -> u8 {
        // N is a power of two below 2^64
        self.deriver.n().ilog2() as u8
    }

    /// Returns the block size parameter (r).
    pub fn r(&self) -> u32 {
        self.deriver.r()
    }

    /// Returns the parallelization parameter (p).
    pub fn p(&self) -> u32 {
        self.deriver.p()
    }

    /// Returns the hash used by the PBKDF2 steps.
    pub fn hash(&self) -> HashAlgorithm {
        self.deriver.hash()
    }

    /// Returns the salt used for key derivation.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// The validated cost parameters, for deriving keys with these parameters.
    pub fn deriver(&self) -> ScryptDeriver {
        self.deriver
    }

    /// Estimated peak memory in bytes for one derivation.
    ///
    /// Counts the stretch buffer (`128 * r * p`) plus, for every block group mixed
    /// at the same time, its ROMix table and two working groups (`128 * r * (N + 2)`).
    /// In parallel mode at most `min(p, worker threads)` groups are mixed at once.
    pub fn memory_usage(&self, parallelism: Parallelism) -> u128 {
        let concurrent_groups = match parallelism {
            Parallelism::Sequential => 1,
            Parallelism::Parallel => {
                u128::from(self.p()).min(rayon::current_num_threads() as u128)
            }
        };
        let group_bytes = 2 * BLOCK_BYTES as u128 * u128::from(self.r());
        group_bytes * (u128::from(self.p()) + concurrent_groups * (u128::from(self.n()) + 2))
    }
}

impl Debug for ScryptParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScryptParams")
            .field("n", &self.n())
            .field("r", &self.r())
            .field("p", &self.p())
            .field("hash", &self.hash())
            .field("salt", &hex::encode(&self.salt))
            .finish()
    }
}

/// Returns `len` bytes from the thread-local cryptographically secure RNG.
///
/// Fails with [`ScryptError::ResourceExhaustion`] if `len` bytes can't be allocated.
pub fn generate_salt(len: usize) -> Result<Vec<u8>, ScryptError> {
    let mut salt = try_with_capacity::<u8>(len)?;
    salt.resize(len, 0);
    rng().fill_bytes(&mut salt);
    Ok(salt)
}
