//! Edit command implementation (replays field events through the editor)

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use crate::color::ColorKey;
use crate::config::PrimeConfig;
use crate::models::PrimeImageDocument;
use crate::session::{AssignOutcome, DigitEditor};
use crate::terminal::render_swatches;

use super::{load_editor, EXIT_ERROR, EXIT_SUCCESS};

/// One presentation event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    /// Field for `color` now reads `raw`
    Input { color: ColorKey, raw: String },
    /// The focused field lost focus
    Blur,
    /// Flip colorized display
    Toggle,
}

impl FromStr for EditEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blur" => Ok(EditEvent::Blur),
            "toggle" => Ok(EditEvent::Toggle),
            _ => {
                let (color, raw) = s
                    .split_once('=')
                    .ok_or_else(|| format!("expected COLOR=VALUE, blur or toggle, got '{}'", s))?;
                let color = ColorKey::parse(color.trim())
                    .map_err(|e| format!("bad color '{}': {}", color, e))?;
                Ok(EditEvent::Input { color, raw: raw.to_string() })
            }
        }
    }
}

impl std::fmt::Display for EditEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditEvent::Input { color, raw } => write!(f, "{}={:?}", color, raw),
            EditEvent::Blur => write!(f, "blur"),
            EditEvent::Toggle => write!(f, "toggle"),
        }
    }
}

/// Result of one replayed event
fn describe(editor: &mut DigitEditor, event: &EditEvent) -> Result<serde_json::Value, String> {
    let value = match event {
        EditEvent::Input { color, raw } => {
            let outcome = editor.assign_digit(color, raw).map_err(|e| e.to_string())?;
            let (name, digit) = match outcome {
                AssignOutcome::Committed(digit) => ("committed", Some(digit.value())),
                AssignOutcome::Cleared => ("cleared", None),
                AssignOutcome::Rejected => ("rejected", None),
            };
            serde_json::json!({
                "event": event.to_string(),
                "outcome": name,
                "digit": digit,
                "value": editor.field_value(color),
            })
        }
        EditEvent::Blur => {
            editor.reset_empty();
            serde_json::json!({ "event": "blur", "outcome": "reset" })
        }
        EditEvent::Toggle => {
            let colorized = editor.toggle_colorized();
            serde_json::json!({ "event": "toggle", "outcome": "toggled", "colorized": colorized })
        }
    };
    Ok(value)
}

fn outcome_line(result: &serde_json::Value) -> String {
    let event = result["event"].as_str().unwrap_or_default();
    let outcome = result["outcome"].as_str().unwrap_or_default();
    match outcome {
        "committed" => format!("{}: committed {}", event, result["digit"]),
        "toggled" => format!("{}: colorized {}", event, result["colorized"]),
        _ => format!("{}: {}", event, outcome),
    }
}

/// Execute the edit command
pub fn run_edit(
    input: &PathBuf,
    events: &[EditEvent],
    output: Option<&Path>,
    json: bool,
    config: &PrimeConfig,
) -> ExitCode {
    let mut editor = match load_editor(input) {
        Ok(editor) => editor,
        Err(code) => return code,
    };
    editor.set_colorized(config.display.colorized);

    let mut results = Vec::with_capacity(events.len());
    for event in events {
        match describe(&mut editor, event) {
            Ok(result) => results.push(result),
            Err(e) => {
                eprintln!("Error: {}: {}", event, e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    }

    if let Some(path) = output {
        if let Err(e) = PrimeImageDocument::from_editor(&editor).save(path) {
            eprintln!("Error: Failed to write '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if json {
        let output = serde_json::json!({
            "events": results,
            "swatches": editor.swatches(),
            "colorized": editor.is_colorized(),
            "digit_string": editor.digit_string(),
            "valid": editor.is_valid(),
        });
        println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
    } else {
        for result in &results {
            println!("{}", outcome_line(result));
        }
        println!();
        print!(
            "{}",
            render_swatches(&editor.swatches(), editor.is_colorized(), &config.display.warning)
        );
        if let Some(path) = output {
            println!();
            println!("Written: {}", path.display());
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
