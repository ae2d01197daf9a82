//! Import command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::PrimeConfig;
use crate::import::{import_png, ImportError};

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the import command
pub fn run_import(input: &PathBuf, output: Option<&Path>, config: &PrimeConfig) -> ExitCode {
    let result = match import_png(input, config.import.max_colors) {
        Ok(r) => r,
        Err(ImportError::Image(e)) => {
            eprintln!("Error: Cannot open input file '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let document = result.to_document();

    let Some(output_path) = output else {
        match document.to_json_pretty() {
            Ok(json) => {
                print!("{}", json);
                return ExitCode::from(EXIT_SUCCESS);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    };

    if let Err(e) = document.save(output_path) {
        eprintln!("Error: Failed to write '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!(
        "Imported: {} ({}x{}, {} colors)",
        output_path.display(),
        result.width,
        result.height,
        result.palette.len()
    );

    ExitCode::from(EXIT_SUCCESS)
}
