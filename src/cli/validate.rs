//! Validate command implementation

use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::PrimeConfig;
use crate::terminal::render_issues;
use crate::validate::{Severity, Validator};

use super::{load_editor, EXIT_ERROR, EXIT_SUCCESS};

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Execute the validate command
pub fn run_validate(input: &PathBuf, json: bool, config: &PrimeConfig) -> ExitCode {
    let editor = match load_editor(input) {
        Ok(editor) => editor,
        Err(code) => return code,
    };

    let strict = config.validate.strict;
    let mut validator = Validator::new(config.digits.max_digits);
    validator.validate(&editor);

    let error_count = validator.error_count();
    let warning_count = validator.warning_count();
    let has_failures = error_count > 0 || (strict && warning_count > 0);
    let issues = validator.into_issues();

    if json {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            issues.iter().partition(|i| matches!(i.severity, Severity::Error));
        let output = serde_json::json!({
            "valid": !has_failures,
            "errors": errors,
            "warnings": warnings,
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
    } else if issues.is_empty() {
        println!("No issues found.");
    } else {
        eprint!("{}", render_issues(&issues));

        println!();
        match (error_count, warning_count) {
            (0, w) => println!("Found {} warning{}.", w, plural(w)),
            (e, 0) => println!("Found {} error{}.", e, plural(e)),
            (e, w) => println!("Found {} error{}, {} warning{}.", e, plural(e), w, plural(w)),
        }

        if !strict && warning_count > 0 && error_count == 0 {
            println!("Hint: Run with --strict to treat warnings as errors.");
        }
    }

    if has_failures {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}
