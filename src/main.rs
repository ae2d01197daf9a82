//! primeimg - Command-line tool for assigning digits to pixelated images

use std::process::ExitCode;

use primeimg::cli;

fn main() -> ExitCode {
    cli::run()
}
