//! Digits command implementation

use std::path::PathBuf;
use std::process::ExitCode;

use super::{load_editor, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the digits command - print the image's number
pub fn run_digits(input: &PathBuf) -> ExitCode {
    let editor = match load_editor(input) {
        Ok(editor) => editor,
        Err(code) => return code,
    };

    match editor.digit_string() {
        Some(digits) => {
            if !editor.is_valid() {
                eprintln!("Warning: digits repeat or start with 0 (run `primeimg validate`)");
            }
            println!("{}", digits);
            ExitCode::from(EXIT_SUCCESS)
        }
        None => {
            let missing = editor.mapping().unassigned_colors(editor.palette());
            let names: Vec<&str> = missing.iter().map(|c| c.as_str()).collect();
            eprintln!("Error: No digit assigned to {}", names.join(", "));
            ExitCode::from(EXIT_ERROR)
        }
    }
}
