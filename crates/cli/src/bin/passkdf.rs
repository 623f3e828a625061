use std::process::ExitCode;

fn main() -> ExitCode {
    passkdf_cli::run()
}
