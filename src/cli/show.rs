//! Show command implementation (terminal display)

use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::PrimeConfig;
use crate::terminal::{render_digit_grid, render_issues, render_swatches};
use crate::validate::validate_editor;

use super::{load_editor, EXIT_SUCCESS};

/// Execute the show command - display the digit image with colored terminal output
pub fn run_show(input: &PathBuf, json: bool, config: &PrimeConfig) -> ExitCode {
    let mut editor = match load_editor(input) {
        Ok(editor) => editor,
        Err(code) => return code,
    };
    editor.set_colorized(config.display.colorized);

    let grid = editor.project();
    let blank = config.display.blank_char();
    let issues = validate_editor(&editor, config.digits.max_digits);

    if json {
        let rows: Vec<String> = grid.to_text(blank).lines().map(String::from).collect();
        let output = serde_json::json!({
            "rows": grid.rows(),
            "cols": grid.cols(),
            "colorized": grid.is_colorized(),
            "grid": rows,
            "swatches": editor.swatches(),
            "issues": issues,
            "digit_string": editor.digit_string(),
            "valid": editor.is_valid(),
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
        return ExitCode::from(EXIT_SUCCESS);
    }

    print!("{}", render_digit_grid(&grid, blank));
    println!();
    print!("{}", render_swatches(&editor.swatches(), grid.is_colorized(), &config.display.warning));

    if !issues.is_empty() {
        println!();
        print!("{}", render_issues(&issues));
    }

    println!();
    match editor.digit_string() {
        Some(digits) => println!("Digits: {} ({} long)", digits, digits.len()),
        None => println!("Digits: incomplete"),
    }

    ExitCode::from(EXIT_SUCCESS)
}
