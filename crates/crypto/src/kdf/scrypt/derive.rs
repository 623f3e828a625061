use log::debug;
use rayon::prelude::*;
use zeroize::{Zeroize, Zeroizing};

use super::block_mix::BlockGroup;
use super::error::{ParameterError, Phase, ScryptError};
use super::romix::{romix, try_with_capacity, validate_cost};
use super::salsa::BLOCK_BYTES;
use crate::kdf::HashAlgorithm;
use crate::kdf::pbkdf2::{max_output_len, pbkdf2};

/// How the `p` independent block groups are mixed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parallelism {
    /// One group after the other. Peak memory is a single ROMix table.
    Sequential,
    /// On the rayon thread pool. Peak memory grows with the number of worker threads.
    #[default]
    Parallel,
}

/// Validated scrypt cost parameters, ready to derive keys.
///
/// Creating a [`ScryptDeriver`] checks everything that can be checked without
/// knowing the output length, so a derivation only fails on an invalid output
/// length, a failed allocation or a failure inside PBKDF2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScryptDeriver {
    n: u64,
    r: u32,
    p: u32,
    hash: HashAlgorithm,
    parallelism: Parallelism,
}

impl ScryptDeriver {
    /// Validates `n`, `r`, `p` for use with `hash`.
    pub fn new(n: u64, r: u32, p: u32, hash: HashAlgorithm) -> Result<Self, ParameterError> {
        validate_cost(n)?;
        if r == 0 {
            return Err(ParameterError::ZeroBlockSize);
        }
        if p == 0 {
            return Err(ParameterError::ZeroParallelization);
        }
        // N < 2^(128 * r / 8). Only restricts r < 4, larger r allow every u64.
        if r < 4 && n >> (16 * r) != 0 {
            return Err(ParameterError::CostTooLargeForBlockSize { n, r });
        }
        let stretch_len = u128::from(p) * 2 * BLOCK_BYTES as u128 * u128::from(r);
        if stretch_len > u128::from(max_output_len(hash)) || usize::try_from(stretch_len).is_err() {
            return Err(ParameterError::StretchTooLong { r, p });
        }
        Ok(Self {
            n,
            r,
            p,
            hash,
            parallelism: Parallelism::default(),
        })
    }

    /// Returns a copy that mixes the block groups with the given [`Parallelism`].
    pub fn with_parallelism(self, parallelism: Parallelism) -> Self {
        Self {
            parallelism,
            ..self
        }
    }

    /// CPU/memory cost factor `N`
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Block size factor `r`
    pub fn r(&self) -> u32 {
        self.r
    }

    /// Parallelization factor `p`
    pub fn p(&self) -> u32 {
        self.p
    }

    /// Hash used for both PBKDF2 steps
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// How the block groups are mixed
    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Largest key in bytes a single derivation can produce.
    pub fn max_key_len(&self) -> u64 {
        max_output_len(self.hash)
    }

    /// Fills `output` with scrypt(`password`, `salt`). The key length is `output.len()`.
    ///
    /// On error, `output` is zeroed.
    pub fn derive(&self, password: &[u8], salt: &[u8], output: &mut [u8]) -> Result<(), ScryptError> {
        self.validate_key_len(output.len() as u64)?;
        let result = self.derive_unchecked(password, salt, output);
        if result.is_err() {
            output.zeroize();
        }
        result
    }

    /// scrypt(`password`, `salt`) with a key length given in bits, which must be a positive multiple of 8.
    pub fn derive_bits(
        &self,
        password: &[u8],
        salt: &[u8],
        dk_len_bits: u64,
    ) -> Result<Vec<u8>, ScryptError> {
        if dk_len_bits == 0 || dk_len_bits % 8 != 0 {
            return Err(ParameterError::KeyLengthNotWholeBytes { bits: dk_len_bits }.into());
        }
        let bytes = dk_len_bits / 8;
        self.validate_key_len(bytes)?;
        let len = usize::try_from(bytes).map_err(|_| ParameterError::KeyTooLong {
            bytes,
            max: usize::MAX as u64,
        })?;
        let mut key = try_with_capacity::<u8>(len)?;
        key.resize(len, 0);
        self.derive(password, salt, &mut key)?;
        Ok(key)
    }

    /// Checks that a key of `bytes` bytes can be derived, without doing any work.
    ///
    /// [`derive`](Self::derive) runs this check itself. Call it before allocating
    /// the output buffer to reject oversized keys early.
    pub fn validate_key_len(&self, bytes: u64) -> Result<(), ParameterError> {
        if bytes == 0 {
            return Err(ParameterError::KeyLengthNotWholeBytes { bits: 0 });
        }
        let max = self.max_key_len();
        if bytes > max {
            return Err(ParameterError::KeyTooLong { bytes, max });
        }
        Ok(())
    }

    fn derive_unchecked(
        &self,
        password: &[u8],
        salt: &[u8],
        output: &mut [u8],
    ) -> Result<(), ScryptError> {
        // new() checked that this fits into usize
        let group_len = 2 * BLOCK_BYTES * self.r as usize;
        let stretch_len = group_len * self.p as usize;

        debug!(
            "scrypt: stretching into {} block groups (N={}, r={}, hash={})",
            self.p, self.n, self.r, self.hash,
        );
        let mut stretch = Zeroizing::new(try_with_capacity::<u8>(stretch_len)?);
        stretch.resize(stretch_len, 0);
        pbkdf2(password, salt, 1, self.hash, &mut stretch).map_err(|source| {
            ScryptError::PrimitiveFailure {
                phase: Phase::InitialStretch,
                source,
            }
        })?;

        let n = self.n;
        let mix_group = |chunk: &mut [u8]| -> Result<(), ScryptError> {
            let mut group = BlockGroup::from_le_bytes(chunk)?;
            romix(&mut group, n)?;
            group.write_le_bytes(chunk);
            Ok(())
        };
        match self.parallelism {
            Parallelism::Sequential => {
                debug!("scrypt: mixing block groups sequentially");
                stretch.chunks_mut(group_len).try_for_each(mix_group)?;
            }
            Parallelism::Parallel => {
                debug!(
                    "scrypt: mixing block groups on up to {} threads",
                    rayon::current_num_threads(),
                );
                stretch.par_chunks_mut(group_len).try_for_each(mix_group)?;
            }
        }

        debug!("scrypt: deriving {} byte key", output.len());
        pbkdf2(password, &stretch, 1, self.hash, output).map_err(|source| {
            ScryptError::PrimitiveFailure {
                phase: Phase::FinalDerivation,
                source,
            }
        })
    }
}

/// scrypt(`password`, `salt`, `n`, `r`, `p`) written into `output`, whose length is the key length.
pub fn scrypt(
    password: &[u8],
    salt: &[u8],
    n: u64,
    r: u32,
    p: u32,
    hash: HashAlgorithm,
    output: &mut [u8],
) -> Result<(), ScryptError> {
    ScryptDeriver::new(n, r, p, hash)?.derive(password, salt, output)
}

/// scrypt(`password`, `salt`, `n`, `r`, `p`) with a key of `dk_len_bits` bits.
///
/// ```
/// use passkdf_crypto::kdf::HashAlgorithm;
/// use passkdf_crypto::kdf::scrypt::scrypt_bits;
///
/// let key = scrypt_bits(b"", b"", 16, 1, 1, 512, HashAlgorithm::Sha256).unwrap();
/// assert_eq!(64, key.len());
/// assert_eq!("77d6576238657b20", hex::encode(&key[..8]));
/// ```
pub fn scrypt_bits(
    password: &[u8],
    salt: &[u8],
    n: u64,
    r: u32,
    p: u32,
    dk_len_bits: u64,
    hash: HashAlgorithm,
) -> Result<Vec<u8>, ScryptError> {
    ScryptDeriver::new(n, r, p, hash)?.derive_bits(password, salt, dk_len_bits)
}
