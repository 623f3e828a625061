//! Multi threaded scrypt implementation based on rayon.

use anyhow::Result;

use crate::EncryptionKey;
use crate::kdf::{
    PasswordBasedKDF,
    scrypt::{Parallelism, ScryptError, ScryptParams, ScryptSettings},
};

/// Scrypt implementation that mixes the `p` block groups concurrently on the
/// global rayon thread pool.
///
/// Each worker owns the ROMix table of the group it works on, so peak memory
/// grows with `min(p, number of worker threads)`.
pub struct ParallelScrypt;

impl PasswordBasedKDF for ParallelScrypt {
    type Settings = ScryptSettings;
    type Parameters = ScryptParams;
    type Error = ScryptError;

    fn derive_key(
        key_size: usize,
        password: &[u8],
        kdf_parameters: &ScryptParams,
    ) -> Result<EncryptionKey, ScryptError> {
        let deriver = kdf_parameters
            .deriver()
            .with_parallelism(Parallelism::Parallel);
        deriver.validate_key_len(key_size as u64)?;
        EncryptionKey::new(key_size, |key_data| {
            deriver.derive(password, kdf_parameters.salt(), key_data)
        })
    }

    fn generate_parameters(settings: &ScryptSettings) -> Result<ScryptParams> {
        ScryptParams::generate(settings)
    }
}
