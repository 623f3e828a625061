use anyhow::{Context, Result, bail};
use base64::{Engine, prelude::BASE64_STANDARD};
use clap::{Parser, ValueEnum};

use passkdf_crypto::kdf::{HashAlgorithm, scrypt::ScryptSettings};

/// Derive a key from a password with scrypt (RFC 7914).
///
/// Logging is configured through the RUST_LOG environment variable.
#[derive(Parser, Debug)]
#[command(name = "passkdf", version)]
pub struct PasskdfArgs {
    /// The password. Read as a single line from stdin if omitted.
    #[arg(short = 'P', long)]
    pub password: Option<String>,

    /// How the password is encoded.
    #[arg(long, value_enum, default_value_t = Encoding::Utf8)]
    pub password_encoding: Encoding,

    /// The salt.
    #[arg(short, long, required_unless_present = "random_salt")]
    pub salt: Option<String>,

    /// How the salt is encoded.
    #[arg(long, value_enum, default_value_t = Encoding::Utf8)]
    pub salt_encoding: Encoding,

    /// Generate a random salt of this many bytes instead of passing one in. It is printed along with the key.
    #[arg(long, value_name = "BYTES", conflicts_with = "salt")]
    pub random_salt: Option<usize>,

    /// CPU/memory cost N. Must be a power of two larger than 1.
    #[arg(short = 'N', long = "cost", default_value_t = 1 << ScryptSettings::DEFAULT.log_n)]
    pub n: u64,

    /// Block size factor r.
    #[arg(short, long = "block-size", default_value_t = ScryptSettings::DEFAULT.r)]
    pub r: u32,

    /// Parallelization factor p.
    #[arg(short, long = "parallelization", default_value_t = ScryptSettings::DEFAULT.p)]
    pub p: u32,

    /// Length of the derived key in bytes.
    #[arg(short, long, default_value_t = 32)]
    pub length: usize,

    /// Hash used by the PBKDF2 steps. One of SHA-1, SHA-256, SHA-384, SHA-512.
    #[arg(long, default_value_t = ScryptSettings::DEFAULT.hash)]
    pub hash: HashAlgorithm,

    /// Mix the block groups one after the other instead of on all cores. Needs less memory when p > 1.
    #[arg(long)]
    pub sequential: bool,
}

/// Text encoding of a password or salt given on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// The bytes of the UTF-8 string
    Utf8,
    /// The bytes of the string, which must only contain ASCII characters
    Ascii,
    /// Hex string, upper or lower case. Whitespace is ignored.
    Hex,
    /// Standard base64 with padding. Whitespace is ignored.
    Base64,
}

impl Encoding {
    pub fn decode(self, input: &str) -> Result<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(input.as_bytes().to_vec()),
            Self::Ascii => {
                if let Some(position) = input.bytes().position(|byte| !byte.is_ascii()) {
                    bail!("'{input}' has a non-ASCII character at byte {position}");
                }
                Ok(input.as_bytes().to_vec())
            }
            Self::Hex => hex::decode(strip_whitespace(input))
                .with_context(|| format!("'{input}' isn't valid hex")),
            Self::Base64 => BASE64_STANDARD
                .decode(strip_whitespace(input))
                .with_context(|| format!("'{input}' isn't valid base64")),
        }
    }
}

fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}
