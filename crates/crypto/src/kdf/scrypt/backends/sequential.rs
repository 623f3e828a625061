//! Single threaded scrypt implementation.

use anyhow::Result;

use crate::EncryptionKey;
use crate::kdf::{
    PasswordBasedKDF,
    scrypt::{Parallelism, ScryptError, ScryptParams, ScryptSettings},
};

/// Scrypt implementation that mixes the block groups one after the other.
///
/// Peak memory is a single ROMix table no matter how large `p` is, which makes
/// this the backend of choice on memory-constrained machines.
pub struct SequentialScrypt;

impl PasswordBasedKDF for SequentialScrypt {
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
            .with_parallelism(Parallelism::Sequential);
        deriver.validate_key_len(key_size as u64)?;
        EncryptionKey::new(key_size, |key_data| {
            deriver.derive(password, kdf_parameters.salt(), key_data)
        })
    }

    fn generate_parameters(settings: &ScryptSettings) -> Result<ScryptParams> {
        ScryptParams::generate(settings)
    }
}
