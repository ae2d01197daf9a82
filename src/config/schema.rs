//! Configuration schema types for `primeimg.toml`
//!
//! Every table and key is optional; missing values take the defaults below.
//!
//! ```toml
//! [digits]
//! max_digits = 4000
//!
//! [display]
//! colorized = true
//! blank = "."
//! warning = "*"
//!
//! [import]
//! max_colors = 10
//!
//! [validate]
//! strict = false
//! ```

use serde::{Deserialize, Serialize};

/// Digit string limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitsConfig {
    /// Longest number the downstream prime search accepts
    #[serde(default = "default_max_digits")]
    pub max_digits: usize,
}

fn default_max_digits() -> usize {
    4000
}

impl Default for DigitsConfig {
    fn default() -> Self {
        Self { max_digits: default_max_digits() }
    }
}

/// Terminal presentation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Draw swatch colors behind digits
    #[serde(default = "default_true")]
    pub colorized: bool,
    /// Placeholder for cells whose color has no digit
    #[serde(default = "default_blank")]
    pub blank: String,
    /// Marker drawn next to swatches with a warning
    #[serde(default = "default_warning")]
    pub warning: String,
}

fn default_true() -> bool {
    true
}

fn default_blank() -> String {
    ".".to_string()
}

fn default_warning() -> String {
    "*".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { colorized: true, blank: default_blank(), warning: default_warning() }
    }
}

impl DisplayConfig {
    /// The blank placeholder as a single character
    pub fn blank_char(&self) -> char {
        self.blank.chars().next().unwrap_or('.')
    }
}

/// PNG import settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// Most distinct colors an imported image may have
    #[serde(default = "default_max_colors")]
    pub max_colors: usize,
}

fn default_max_colors() -> usize {
    10
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self { max_colors: default_max_colors() }
    }
}

/// Validation settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidateConfig {
    /// Treat warnings as errors
    #[serde(default)]
    pub strict: bool,
}

/// Complete primeimg.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrimeConfig {
    #[serde(default)]
    pub digits: DigitsConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub validate: ValidateConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "display.blank")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "primeimg.toml: '{}' {}", self.field, self.message)
    }
}

impl PrimeConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.digits.max_digits == 0 {
            errors.push(ConfigValidationError {
                field: "digits.max_digits".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if !(1..=256).contains(&self.import.max_colors) {
            errors.push(ConfigValidationError {
                field: "import.max_colors".to_string(),
                message: "must be between 1 and 256".to_string(),
            });
        }

        if self.display.blank.chars().count() != 1 {
            errors.push(ConfigValidationError {
                field: "display.blank".to_string(),
                message: "must be a single character".to_string(),
            });
        }

        if self.display.warning.is_empty() {
            errors.push(ConfigValidationError {
                field: "display.warning".to_string(),
                message: "must not be empty".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}
