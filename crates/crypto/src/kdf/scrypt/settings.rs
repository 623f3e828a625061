use crate::kdf::HashAlgorithm;

/// Cost settings used to generate new [`ScryptParams`](super::ScryptParams).
///
/// Scrypt memory usage (see [`ScryptParams::memory_usage`](super::ScryptParams::memory_usage)):
/// * sequential
///   128 * r * (p + n + 2)
/// * parallel, with enough worker threads
///   128 * r * (p + p * (n + 2))
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScryptSettings {
    /// log2 of the CPU/memory cost N
    pub log_n: u8,
    /// Block size factor
    pub r: u32,
    /// Parallelization factor
    pub p: u32,
    /// Length of the random salt in bytes
    pub salt_len: usize,
    /// Hash used by the PBKDF2 steps
    pub hash: HashAlgorithm,
}

impl ScryptSettings {
    /// Memory usage: 4GB parallel, 1GB sequential (see formula in comment above)
    pub const PARANOID: Self = Self {
        log_n: 20,
        r: 8,
        p: 4,
        salt_len: 32,
        hash: HashAlgorithm::Sha512,
    };

    /// Memory usage: 1MB (see formula in comment above)
    pub const DEFAULT: Self = Self {
        log_n: 10,
        r: 8,
        p: 1,
        salt_len: 16,
        hash: HashAlgorithm::Sha256,
    };

    /// Memory usage: 1MB parallel, 512kB sequential (see formula in comment above)
    pub const LOW_MEMORY: Self = Self {
        log_n: 10,
        r: 4,
        p: 2,
        salt_len: 16,
        hash: HashAlgorithm::Sha256,
    };

    /// Memory usage: 5kB parallel, 3kB sequential (see formula in comment above)
    pub const TEST: Self = Self {
        log_n: 4,
        r: 1,
        // Use p != r so mixing up the two shows up in tests
        p: 2,
        salt_len: 16,
        hash: HashAlgorithm::Sha256,
    };
}

impl Default for ScryptSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}
