use derive_more::Display;
use thiserror::Error;

use crate::KeyAllocationError;
use crate::kdf::pbkdf2::Pbkdf2Error;

/// Errors from scrypt key derivation.
///
/// Parameter errors are reported before any memory-hard work starts. No
/// variant is ever accompanied by partial output.
#[derive(Error, Debug)]
pub enum ScryptError {
    /// The caller supplied parameters that violate the algorithm's constraints.
    #[error("Invalid scrypt parameters: {0}")]
    InvalidParameter(#[from] ParameterError),

    /// The PBKDF2 primitive failed. Retrying with the same inputs would fail the same way.
    #[error("PBKDF2 failed during the {phase}")]
    PrimitiveFailure {
        /// Which of the two PBKDF2 calls failed
        phase: Phase,
        /// The error reported by PBKDF2
        #[source]
        source: Pbkdf2Error,
    },

    /// A buffer (usually the ROMix memory table) couldn't be allocated.
    #[error("Couldn't allocate {bytes} bytes of memory for scrypt")]
    ResourceExhaustion {
        /// Size of the allocation that failed
        bytes: u128,
    },
}

impl From<KeyAllocationError> for ScryptError {
    fn from(err: KeyAllocationError) -> Self {
        Self::ResourceExhaustion {
            bytes: err.num_bytes as u128,
        }
    }
}

/// The two points at which scrypt calls into PBKDF2.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Stretching password and salt into the `p` block groups
    #[display("initial stretch")]
    InitialStretch,
    /// Condensing the mixed block groups into the derived key
    #[display("final derivation")]
    FinalDerivation,
}

/// Which parameter constraint was violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// `N` isn't a power of two
    #[error("cost factor N={n} must be a power of two")]
    CostNotPowerOfTwo {
        /// The rejected cost factor
        n: u64,
    },

    /// `N` is 0 or 1
    #[error("cost factor N={n} must be larger than 1")]
    CostTooSmall {
        /// The rejected cost factor
        n: u64,
    },

    /// RFC 7914 requires `N < 2^(128 * r / 8)`
    #[error("cost factor N={n} must be smaller than 2^(16 * r) for block size factor r={r}")]
    CostTooLargeForBlockSize {
        /// The rejected cost factor
        n: u64,
        /// The block size factor it was combined with
        r: u32,
    },

    /// `r` is 0
    #[error("block size factor r must be at least 1")]
    ZeroBlockSize,

    /// `p` is 0
    #[error("parallelization factor p must be at least 1")]
    ZeroParallelization,

    /// The initial stretch can't be produced by a single PBKDF2 call
    #[error("p * 128 * r = {p} * 128 * {r} bytes is more than one PBKDF2 call can produce")]
    StretchTooLong {
        /// Block size factor
        r: u32,
        /// Parallelization factor
        p: u32,
    },

    /// The requested key length is zero or not a whole number of bytes
    #[error("derived key length of {bits} bits must be a positive multiple of 8")]
    KeyLengthNotWholeBytes {
        /// Requested length in bits
        bits: u64,
    },

    /// The requested key is longer than the final PBKDF2 call can produce
    #[error("derived key length of {bytes} bytes exceeds the maximum of {max} bytes")]
    KeyTooLong {
        /// Requested length in bytes
        bytes: u64,
        /// Maximum length in bytes
        max: u64,
    },

    /// A byte buffer doesn't split into a valid block group
    #[error("a block group needs a positive, even number of 64 byte blocks, got {bytes} bytes")]
    MalformedBlockGroup {
        /// Length of the rejected buffer
        bytes: usize,
    },
}
