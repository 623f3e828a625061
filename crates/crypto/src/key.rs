use log::warn;
use thiserror::Error;
use zeroize::Zeroize;

/// The memory for an [`EncryptionKey`] couldn't be allocated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Couldn't allocate {num_bytes} bytes for the key")]
pub struct KeyAllocationError {
    /// Requested key length
    pub num_bytes: usize,
}

/// A key produced by a key derivation function. The key is stored in protected memory, i.e.
/// it shouldn't be swapped to disk and will be automatically zeroed on destruction.
/// Note that this is only a best-effort and not guaranteed. There's still scenarios
/// (say when the PC is suspended to disk) where the key will end up on the disk.
pub struct EncryptionKey {
    // Declared first so the pages get unlocked before the buffer is freed
    _lock_guard: Option<region::LockGuard>,
    key_data: Box<[u8]>,
}

impl EncryptionKey {
    /// Allocates a key of `num_bytes` bytes and lets `init` fill it in place.
    ///
    /// Fails with [`KeyAllocationError`] if the buffer can't be allocated. If `init`
    /// fails, the partially written buffer is zeroed and the error is returned.
    pub fn new<E>(
        num_bytes: usize,
        init: impl FnOnce(&mut [u8]) -> Result<(), E>,
    ) -> Result<Self, E>
    where
        E: From<KeyAllocationError>,
    {
        let mut key_data = Vec::new();
        key_data
            .try_reserve_exact(num_bytes)
            .map_err(|_| KeyAllocationError { num_bytes })?;
        key_data.resize(num_bytes, 0u8);
        let key_data = key_data.into_boxed_slice();
        let lock_guard = if key_data.is_empty() {
            None
        } else {
            match region::lock(key_data.as_ptr(), key_data.len()) {
                Ok(lock_guard) => Some(lock_guard),
                Err(err) => {
                    warn!(
                        "Couldn't protect the RAM page storing the derived key, which means it could get swapped to the disk if your operating system chooses to. This does not hinder any functionality though. Error: {}",
                        err
                    );
                    None
                }
            }
        };
        let mut key = Self {
            _lock_guard: lock_guard,
            key_data,
        };
        init(&mut key.key_data)?;
        Ok(key)
    }

    /// Create an uppercase hex string with the key data. This copies the key into
    /// unprotected memory, so only use it where the key is meant to be shown.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(&self.key_data)
    }

    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.key_data
    }

    /// Length of the key in bytes.
    pub fn num_bytes(&self) -> usize {
        self.key_data.len()
    }

    /// Copies the first `num_bytes` bytes of the [EncryptionKey] into a new [EncryptionKey]
    pub fn take_bytes(&self, num_bytes: usize) -> Result<EncryptionKey, KeyAllocationError> {
        Self::new(num_bytes, |data| {
            data.copy_from_slice(&self.key_data[..num_bytes]);
            Ok(())
        })
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EncryptionKey(len={})", self.key_data.len())
    }
}

impl Drop for EncryptionKey {
    fn drop(&mut self) {
        self.key_data.zeroize();
    }
}

impl PartialEq for EncryptionKey {
    fn eq(&self, other: &Self) -> bool {
        self.key_data == other.key_data
    }
}

impl Eq for EncryptionKey {}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(bytes: &[u8]) -> EncryptionKey {
        EncryptionKey::new::<KeyAllocationError>(bytes.len(), |data| {
            data.copy_from_slice(bytes);
            Ok(())
        })
        .unwrap()
    }

    #[derive(Debug, PartialEq)]
    enum InitError {
        Alloc(KeyAllocationError),
        Init(&'static str),
    }

    impl From<KeyAllocationError> for InitError {
        fn from(err: KeyAllocationError) -> Self {
            Self::Alloc(err)
        }
    }

    #[test]
    fn test_to_hex_is_uppercase() {
        let key = key(&[0x00, 0xff, 0x10, 0xab]);
        assert_eq!(4, key.num_bytes());
        assert_eq!(&[0x00, 0xff, 0x10, 0xab], key.as_bytes());
        assert_eq!("00FF10AB", key.to_hex());
    }

    #[test]
    fn test_new_starts_zeroed() {
        let key = EncryptionKey::new::<KeyAllocationError>(16, |_| Ok(())).unwrap();
        assert_eq!(&[0; 16], key.as_bytes());
    }

    #[test]
    fn test_take_bytes() {
        let key = key(&[1, 2, 3, 4, 5]);
        assert_eq!("0102", key.take_bytes(2).unwrap().to_hex());
        assert_eq!("", key.take_bytes(0).unwrap().to_hex());
        assert_eq!(key, key.take_bytes(5).unwrap());
    }

    #[test]
    fn test_init_error_is_propagated() {
        let result = EncryptionKey::new(8, |_| Err(InitError::Init("init failed")));
        assert_eq!(Some(InitError::Init("init failed")), result.err());
    }

    #[test]
    fn test_unallocatable_key_is_an_error() {
        let mut init_called = false;
        let result = EncryptionKey::new(usize::MAX, |_| {
            init_called = true;
            Ok::<(), InitError>(())
        });
        assert_eq!(
            Some(InitError::Alloc(KeyAllocationError {
                num_bytes: usize::MAX
            })),
            result.err()
        );
        assert!(!init_called);
    }

    #[test]
    fn test_debug_does_not_show_key_data() {
        let key = key(&[0xde, 0xad, 0xbe, 0xef]);
        let debug = format!("{key:?}");
        assert_eq!("EncryptionKey(len=4)", debug);
        assert!(!debug.to_lowercase().contains("deadbeef"));
    }

    #[test]
    fn test_equality() {
        let a = key(&[0x00, 0x11]);
        let b = key(&[0x00, 0x11]);
        let c = key(&[0x00, 0x12]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
