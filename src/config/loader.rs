//! Configuration loading and discovery for `primeimg.toml`

use super::schema::PrimeConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = "primeimg.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse primeimg.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Treat warnings as errors
    pub strict: Option<bool>,
    /// Disable swatch colors in terminal output
    pub plain: Option<bool>,
    /// Import color limit
    pub max_colors: Option<usize>,
    /// Digit count limit
    pub max_digits: Option<usize>,
}

/// Find primeimg.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for primeimg.toml
/// 2. Check XDG_CONFIG_HOME/primeimg/primeimg.toml (or ~/.config/primeimg/primeimg.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find primeimg.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("primeimg").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find primeimg.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a primeimg.toml file.
///
/// An explicit `path` must exist. Without one, the file is discovered with
/// [`find_config`]; if nothing is found the defaults are returned.
pub fn load_config(path: Option<&Path>) -> Result<PrimeConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            debug!("no primeimg.toml found, using defaults");
            Ok(default_config())
        }
    }
}

fn load_config_file(path: &Path) -> Result<PrimeConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: PrimeConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Configuration used when no primeimg.toml is found.
pub fn default_config() -> PrimeConfig {
    PrimeConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut PrimeConfig, overrides: &CliOverrides) {
    if let Some(strict) = overrides.strict {
        config.validate.strict = strict;
    }

    if let Some(plain) = overrides.plain {
        config.display.colorized = !plain;
    }

    if let Some(max_colors) = overrides.max_colors {
        config.import.max_colors = max_colors;
    }

    if let Some(max_digits) = overrides.max_digits {
        config.digits.max_digits = max_digits;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &[u8]) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents)
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[digits]\nmax_digits = 10");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"");

        let subdir = temp.path().join("images").join("cats");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_config_from(temp.path().to_path_buf()), None);
    }

    #[test]
    fn test_load_config_from_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            br#"
[digits]
max_digits = 64

[display]
colorized = false
"#,
        );

        let config = load_config(Some(&config_path)).expect("should load valid config");
        assert_eq!(config.digits.max_digits, 64);
        assert!(!config.display.colorized);
        assert_eq!(config.import.max_colors, 10);
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"this is not valid toml {{{");

        let result = load_config(Some(&config_path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), b"[import]\nmax_colors = 1000\n");

        match load_config(Some(&config_path)) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert!(errors[0].contains("import.max_colors"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = default_config();
        let overrides = CliOverrides {
            strict: Some(true),
            plain: Some(true),
            max_colors: Some(4),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides);
        assert!(config.validate.strict);
        assert!(!config.display.colorized);
        assert_eq!(config.import.max_colors, 4);
        assert_eq!(config.digits.max_digits, 4000);
    }

    #[test]
    fn test_merge_empty_overrides_keeps_config() {
        let mut config = default_config();
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert!(!config.validate.strict);
        assert!(config.display.colorized);
    }
}
