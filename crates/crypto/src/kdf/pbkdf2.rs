//! PBKDF2-HMAC (RFC 8018) for the hash algorithms in [`HashAlgorithm`].
//!
//! The actual PRF iteration is done by the `pbkdf2` crate; this module picks
//! the HMAC instantiation and enforces the limits RFC 8018 puts on the inputs.

use hmac::Hmac;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use thiserror::Error;

use super::HashAlgorithm;

/// Errors from [`pbkdf2`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Pbkdf2Error {
    /// PBKDF2 is only defined for a positive iteration count.
    #[error("PBKDF2 needs at least one iteration")]
    ZeroIterations,

    /// PBKDF2 can't produce an empty key.
    #[error("PBKDF2 output must not be empty")]
    EmptyOutput,

    /// RFC 8018 limits the output to `(2^32 - 1) * hLen` bytes.
    #[error("PBKDF2-HMAC-{hash} can produce at most {max} bytes but {requested} were requested")]
    OutputTooLong {
        /// The hash in use
        hash: HashAlgorithm,
        /// Requested output length in bytes
        requested: u64,
        /// Maximum output length in bytes
        max: u64,
    },

    /// The HMAC implementation refused the password as its key.
    #[error("HMAC-{0} rejected the password as key")]
    InvalidKey(HashAlgorithm),
}

/// Maximum number of bytes a single PBKDF2 call can produce with `hash`.
pub const fn max_output_len(hash: HashAlgorithm) -> u64 {
    u32::MAX as u64 * hash.output_len() as u64
}

/// Fills `output` with PBKDF2-HMAC-`hash`(`password`, `salt`, `iterations`).
pub fn pbkdf2(
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    hash: HashAlgorithm,
    output: &mut [u8],
) -> Result<(), Pbkdf2Error> {
    if iterations == 0 {
        return Err(Pbkdf2Error::ZeroIterations);
    }
    if output.is_empty() {
        return Err(Pbkdf2Error::EmptyOutput);
    }
    let requested = output.len() as u64;
    let max = max_output_len(hash);
    if requested > max {
        return Err(Pbkdf2Error::OutputTooLong {
            hash,
            requested,
            max,
        });
    }

    match hash {
        HashAlgorithm::Sha1 => ::pbkdf2::pbkdf2::<Hmac<Sha1>>(password, salt, iterations, output),
        HashAlgorithm::Sha256 => {
            ::pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, output)
        }
        HashAlgorithm::Sha384 => {
            ::pbkdf2::pbkdf2::<Hmac<Sha384>>(password, salt, iterations, output)
        }
        HashAlgorithm::Sha512 => {
            ::pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, iterations, output)
        }
    }
    .map_err(|_| Pbkdf2Error::InvalidKey(hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn derive(password: &[u8], salt: &[u8], iterations: u32, hash: HashAlgorithm, len: usize) -> String {
        let mut output = vec![0; len];
        pbkdf2(password, salt, iterations, hash, &mut output).unwrap();
        hex::encode(output)
    }

    #[test]
    fn rfc6070_sha1() {
        assert_eq!(
            "0c60c80f961f0e71f3a9b524af6012062fe037a6",
            derive(b"password", b"salt", 1, HashAlgorithm::Sha1, 20),
        );
    }

    #[test]
    fn rfc7914_sha256() {
        // RFC 7914 §11
        assert_eq!(
            "55ac046e56e3089fec1691c22544b605f94185216dde0465e68b9d57c20dacbc49ca9cccf179b645991664b39d77ef317c71b845b1e30bd509112041d3a19783",
            derive(b"passwd", b"salt", 1, HashAlgorithm::Sha256, 64),
        );
    }

    #[test]
    fn sha384() {
        assert_eq!(
            "c0e14f06e49e32d73f9f52ddf1d0c5c7191609233631dadd76a567db42b78676b38fc800cc53ddb642f5c74442e62be4",
            derive(b"password", b"salt", 1, HashAlgorithm::Sha384, 48),
        );
    }

    #[test]
    fn sha512() {
        assert_eq!(
            "867f70cf1ade02cff3752599a3a53dc4af34c7a669815ae5d513554e1c8cf252c02d470a285a0501bad999bfe943c08f050235d7d68b1da55e63f73b60a57fce",
            derive(b"password", b"salt", 1, HashAlgorithm::Sha512, 64),
        );
    }

    #[test]
    fn zero_iterations() {
        let mut output = [0; 32];
        assert_eq!(
            Err(Pbkdf2Error::ZeroIterations),
            pbkdf2(b"password", b"salt", 0, HashAlgorithm::Sha256, &mut output),
        );
    }

    #[rstest]
    fn empty_output(
        #[values(
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512
        )]
        hash: HashAlgorithm,
    ) {
        assert_eq!(
            Err(Pbkdf2Error::EmptyOutput),
            pbkdf2(b"password", b"salt", 1, hash, &mut []),
        );
    }

    #[test]
    fn max_output_len_per_hash() {
        assert_eq!(85_899_345_900, max_output_len(HashAlgorithm::Sha1));
        assert_eq!(137_438_953_440, max_output_len(HashAlgorithm::Sha256));
        assert_eq!(274_877_906_880, max_output_len(HashAlgorithm::Sha512));
    }

    #[test]
    fn output_is_prefix_stable() {
        // Longer outputs only append blocks, the first bytes stay the same
        let short = derive(b"password", b"salt", 2, HashAlgorithm::Sha256, 16);
        let long = derive(b"password", b"salt", 2, HashAlgorithm::Sha256, 100);
        assert_eq!(short.as_str(), &long[..32]);
    }
}
