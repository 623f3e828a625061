mod args;
mod cli;
mod error;

pub use args::{Encoding, PasskdfArgs};
pub use cli::run;
pub use error::{CliError, CliErrorKind};
