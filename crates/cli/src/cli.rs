use anyhow::{Context, Result, bail};
use base64::{Engine, prelude::BASE64_STANDARD};
use clap::Parser;
use log::info;
use std::io::BufRead;
use std::process::ExitCode;

use passkdf_crypto::EncryptionKey;
use passkdf_crypto::kdf::{
    PasswordBasedKDF,
    scrypt::{
        Parallelism, ScryptError, ScryptParams,
        backends::{parallel::ParallelScrypt, sequential::SequentialScrypt},
        generate_salt,
    },
};

use crate::args::PasskdfArgs;
use crate::error::{CliError, CliErrorKind, CliResultExt, CliResultExtFn};

/// Entry point of the `passkdf` binary.
pub fn run() -> ExitCode {
    env_logger::init();

    let args = PasskdfArgs::parse();
    match derive(&args) {
        Ok(()) => CliErrorKind::Success.exit_code(),
        Err(err) => {
            eprintln!("Error: {:?}", err.error);
            err.kind.exit_code()
        }
    }
}

fn derive(args: &PasskdfArgs) -> Result<(), CliError> {
    let password = read_password(args).map_cli_error(CliErrorKind::InvalidInput)?;
    let salt = match (args.random_salt, &args.salt) {
        (Some(len), _) => generate_salt(len).map_cli_error(CliErrorKind::for_scrypt_error)?,
        (None, Some(salt)) => args
            .salt_encoding
            .decode(salt)
            .context("Couldn't decode salt")
            .map_cli_error(CliErrorKind::InvalidInput)?,
        (None, None) => {
            return Err(anyhow::anyhow!("Either --salt or --random-salt is required"))
                .map_cli_error(CliErrorKind::InvalidInput);
        }
    };

    let params = ScryptParams::new(args.n, args.r, args.p, args.hash, salt)
        .map_cli_error(CliErrorKind::for_scrypt_error)?;
    let parallelism = if args.sequential {
        Parallelism::Sequential
    } else {
        Parallelism::Parallel
    };
    info!(
        "Deriving {} byte key with N={}, r={}, p={}, hash={}, needing about {} bytes of memory",
        args.length,
        params.n(),
        params.r(),
        params.p(),
        params.hash(),
        params.memory_usage(parallelism),
    );

    let key = derive_key(args.length, &password, &params, parallelism)
        .map_cli_error(CliErrorKind::for_scrypt_error)?;

    if args.random_salt.is_some() {
        println!("salt: {}", hex::encode(params.salt()));
    }
    println!("hex: {}", hex::encode(key.as_bytes()));
    println!("base64: {}", BASE64_STANDARD.encode(key.as_bytes()));
    Ok(())
}

fn derive_key(
    key_size: usize,
    password: &[u8],
    params: &ScryptParams,
    parallelism: Parallelism,
) -> Result<EncryptionKey, ScryptError> {
    match parallelism {
        Parallelism::Sequential => SequentialScrypt::derive_key(key_size, password, params),
        Parallelism::Parallel => ParallelScrypt::derive_key(key_size, password, params),
    }
}

fn read_password(args: &PasskdfArgs) -> Result<Vec<u8>> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => {
            let mut line = String::new();
            let num_read = std::io::stdin()
                .lock()
                .read_line(&mut line)
                .context("Couldn't read password from stdin")?;
            if num_read == 0 {
                bail!("No password given. Pass --password or write it to stdin.");
            }
            line.trim_end_matches(['\r', '\n']).to_owned()
        }
    };
    args.password_encoding
        .decode(&password)
        .context("Couldn't decode password")
}
