use derive_more::Display;
use std::{error::Error, process::ExitCode};

use passkdf_crypto::kdf::scrypt::ScryptError;

// Don't derive `Error` for `CliError` because we don't want a thrown CliError to be converted back to `anyhow::Error`, that might swallow the exit code.
#[derive(Display, Debug)]
#[display("{error}")]
pub struct CliError {
    pub kind: CliErrorKind,
    pub error: anyhow::Error,
}

/// An extension trait to map a Result with an anyhow::Error error type into a Result with a `CliError` error type.
pub trait CliResultExt {
    type T;
    fn map_cli_error(self, kind: CliErrorKind) -> Result<Self::T, CliError>;
}
impl<T> CliResultExt for Result<T, anyhow::Error> {
    type T = T;
    fn map_cli_error(self, kind: CliErrorKind) -> Result<T, CliError> {
        self.map_err(|error| CliError { kind, error })
    }
}

/// An extension trait to map a Result with an arbitrary `impl Error` type into a Result with a `CliError` error type.
pub trait CliResultExtFn {
    type T;
    type E;
    fn map_cli_error(
        self,
        kind: impl FnOnce(&Self::E) -> CliErrorKind,
    ) -> Result<Self::T, CliError>;
}
impl<T, E> CliResultExtFn for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    type T = T;
    type E = E;
    fn map_cli_error(self, kind: impl FnOnce(&E) -> CliErrorKind) -> Result<T, CliError> {
        self.map_err(|error| CliError {
            kind: kind(&error),
            error: anyhow::Error::from(error),
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CliErrorKind {
    /// No error happened, everything is ok
    Success,

    /// Password or salt couldn't be decoded with the given encoding, or couldn't be read from stdin.
    InvalidInput,

    /// The scrypt parameters violate the algorithm's constraints, e.g. N isn't a power of two.
    InvalidParameters,

    /// Not enough memory for the ROMix table. Try a smaller N or r, or --sequential.
    OutOfMemory,

    /// PBKDF2 failed during the derivation.
    DerivationFailed,
}

impl CliErrorKind {
    /// Exit code to report to the shell
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(match self {
            Self::Success => 0,
            Self::InvalidInput => 10,
            Self::InvalidParameters => 11,
            Self::OutOfMemory => 12,
            Self::DerivationFailed => 13,
        })
    }

    /// Error kind for a failed scrypt call
    pub fn for_scrypt_error(error: &ScryptError) -> Self {
        match error {
            ScryptError::InvalidParameter(_) => Self::InvalidParameters,
            ScryptError::ResourceExhaustion { .. } => Self::OutOfMemory,
            ScryptError::PrimitiveFailure { .. } => Self::DerivationFailed,
        }
    }
}
