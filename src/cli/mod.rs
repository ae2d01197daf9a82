//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod digits;
mod edit;
mod import;
mod show;
mod validate;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{load_config, merge_cli_overrides, CliOverrides, PrimeConfig};
use crate::models::{DocumentError, PrimeImageDocument};
use crate::session::DigitEditor;

pub use edit::EditEvent;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// primeimg - Assign digits to the colors of a pixelated image
#[derive(Parser)]
#[command(name = "primeimg")]
#[command(about = "primeimg - Assign digits to the colors of a pixelated image")]
#[command(version)]
pub struct Cli {
    /// Path to primeimg.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a pixelated PNG into a document with sequential digits
    Import {
        /// Input PNG file
        input: PathBuf,

        /// Output document (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum number of distinct colors (default: import.max_colors)
        #[arg(long)]
        max_colors: Option<usize>,
    },

    /// Display the digit image, swatches and issues
    Show {
        /// Input document
        input: PathBuf,

        /// Print bare digits without swatch colors
        #[arg(long)]
        plain: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay field edits against a document
    Edit {
        /// Input document
        input: PathBuf,

        /// Event to replay: COLOR=VALUE (field value after a keystroke), blur, or toggle
        #[arg(short = 'e', long = "event", value_name = "EVENT")]
        events: Vec<EditEvent>,

        /// Write the edited document here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check the digit assignment for problems
    Validate {
        /// Input document
        input: PathBuf,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,

        /// Digit count limit (default: digits.max_digits)
        #[arg(long)]
        max_digits: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the number the image spells out
    Digits {
        /// Input document
        input: PathBuf,
    },
}

impl Commands {
    fn overrides(&self) -> CliOverrides {
        match self {
            Commands::Import { max_colors, .. } => {
                CliOverrides { max_colors: *max_colors, ..Default::default() }
            }
            Commands::Show { plain, .. } => {
                CliOverrides { plain: plain.then_some(true), ..Default::default() }
            }
            Commands::Validate { strict, max_digits, .. } => CliOverrides {
                strict: strict.then_some(true),
                max_digits: *max_digits,
                ..Default::default()
            },
            Commands::Edit { .. } | Commands::Digits { .. } => CliOverrides::default(),
        }
    }
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins unless `-v` was given.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "primeimg=warn",
        1 => "primeimg=debug",
        _ => "primeimg=trace",
    };
    let filter = if verbose == 0 {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into())
    } else {
        EnvFilter::new(level)
    };

    // A subscriber may already be set when embedded in another binary
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .try_init();
}

/// Load a document and build its editor, reporting failures on stderr.
pub(crate) fn load_editor(path: &Path) -> Result<DigitEditor, ExitCode> {
    let result = PrimeImageDocument::load(path).and_then(PrimeImageDocument::into_editor);
    match result {
        Ok(editor) => Ok(editor),
        Err(DocumentError::Io(e)) => {
            eprintln!("Error: Cannot open input file '{}': {}", path.display(), e);
            Err(ExitCode::from(EXIT_INVALID_ARGS))
        }
        Err(e) => {
            eprintln!("Error: '{}': {}", path.display(), e);
            Err(ExitCode::from(EXIT_INVALID_ARGS))
        }
    }
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config: PrimeConfig = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    merge_cli_overrides(&mut config, &cli.command.overrides());

    let errors = config.validate();
    if !errors.is_empty() {
        for error in errors {
            eprintln!("Error: {}", error);
        }
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    match cli.command {
        Commands::Import { input, output, .. } => {
            import::run_import(&input, output.as_deref(), &config)
        }
        Commands::Show { input, json, .. } => show::run_show(&input, json, &config),
        Commands::Edit { input, events, output, json } => {
            edit::run_edit(&input, &events, output.as_deref(), json, &config)
        }
        Commands::Validate { input, json, .. } => validate::run_validate(&input, json, &config),
        Commands::Digits { input } => digits::run_digits(&input),
    }
}
