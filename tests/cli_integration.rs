//! CLI integration tests
//!
//! These tests run the primeimg binary end to end against fixture documents
//! and check stdout, stderr, exit codes and written files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

/// Get the path to the primeimg binary
fn primeimg_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_primeimg"))
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// Run primeimg inside `dir` so config discovery only sees files placed there
fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(primeimg_binary())
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute primeimg")
}

fn run(args: &[&str]) -> (TempDir, Output) {
    let temp = TempDir::new().expect("should create temp dir");
    let output = run_in(temp.path(), args);
    (temp, output)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

fn write_png(dir: &Path, rows: &[&[Rgba<u8>]]) -> PathBuf {
    let path = dir.join("source.png");
    RgbaImage::from_fn(rows[0].len() as u32, rows.len() as u32, |x, y| rows[y as usize][x as usize])
        .save(&path)
        .expect("should write png");
    path
}

// ============================================================================
// digits
// ============================================================================

#[test]
fn test_digits_complete() {
    let (_temp, output) = run(&["digits", path_str(&fixture("checker.json"))]);
    assert!(output.status.success(), "digits failed: {}", stderr(&output));
    assert_eq!(stdout(&output), "3773\n");
}

#[test]
fn test_digits_incomplete() {
    let (_temp, output) = run(&["digits", path_str(&fixture("partial.json"))]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("No digit assigned to #00FF00, #0000FF"));
}

#[test]
fn test_digits_warns_on_invalid_assignment() {
    let (_temp, output) = run(&["digits", path_str(&fixture("duplicates.json"))]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "007700\n");
    assert!(stderr(&output).contains("Warning:"));
}

#[test]
fn test_missing_document_is_invalid_input() {
    let (_temp, output) = run(&["digits", "does-not-exist.json"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Cannot open input file"));
}

#[test]
fn test_ragged_document_is_invalid_input() {
    let (_temp, output) = run(&["digits", path_str(&fixture("ragged.json"))]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("row 1"), "stderr: {}", stderr(&output));
}

// ============================================================================
// validate
// ============================================================================

#[test]
fn test_validate_clean_document() {
    let (_temp, output) = run(&["validate", path_str(&fixture("checker.json"))]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No issues found."));
}

#[test]
fn test_validate_reports_duplicates_and_leading_zero() {
    let (_temp, output) = run(&["validate", path_str(&fixture("duplicates.json")), "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(report["valid"], false);
    let types: Vec<&str> = report["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|e| e["issue_type"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(types, vec!["duplicate_digit", "leading_zero"]);
    assert_eq!(report["errors"][0]["colors"], serde_json::json!(["#FF0000", "#00FF00"]));
}

#[test]
fn test_validate_text_output_goes_to_stderr() {
    let (_temp, output) = run(&["validate", path_str(&fixture("partial.json"))]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERROR [unassigned_color]"));
    assert!(stdout(&output).contains("Found 1 error."));
}

#[test]
fn test_validate_digit_limit_is_a_warning() {
    let checker = fixture("checker.json");
    let (_temp, output) = run(&["validate", path_str(&checker), "--max-digits", "3"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Found 1 warning."));
    assert!(stdout(&output).contains("--strict"));

    let (_temp, output) = run(&["validate", path_str(&checker), "--max-digits", "3", "--strict"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_validate_strict_from_config_file() {
    let temp = TempDir::new().expect("should create temp dir");
    fs::write(temp.path().join("primeimg.toml"), "[digits]\nmax_digits = 3\n\n[validate]\nstrict = true\n")
        .expect("should write config");

    let output = run_in(temp.path(), &["validate", path_str(&fixture("checker.json"))]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_explicit_config_path() {
    let temp = TempDir::new().expect("should create temp dir");
    let config = temp.path().join("custom.toml");
    fs::write(&config, "[digits]\nmax_digits = 3\n").expect("should write config");

    let output = run_in(
        temp.path(),
        &["--config", path_str(&config), "validate", path_str(&fixture("checker.json")), "--strict"],
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp = TempDir::new().expect("should create temp dir");
    fs::write(temp.path().join("primeimg.toml"), "[import]\nmax_colors = 0\n")
        .expect("should write config");

    let output = run_in(temp.path(), &["digits", path_str(&fixture("checker.json"))]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("import.max_colors"));
}

// ============================================================================
// show
// ============================================================================

#[test]
fn test_show_plain() {
    let (_temp, output) = run(&["show", path_str(&fixture("checker.json")), "--plain"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.starts_with("37\n73\n"), "stdout: {}", text);
    assert!(text.contains("Swatches:"));
    assert!(text.contains("Digits: 3773 (4 long)"));
    assert!(!text.contains('\x1b'));
}

#[test]
fn test_show_colorized_by_default() {
    let (_temp, output) = run(&["show", path_str(&fixture("checker.json"))]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("\x1b[48;2;255;0;0m"));
}

#[test]
fn test_show_uses_display_config() {
    let temp = TempDir::new().expect("should create temp dir");
    fs::write(
        temp.path().join("primeimg.toml"),
        "[display]\ncolorized = false\nblank = \"_\"\nwarning = \"!\"\n",
    )
    .expect("should write config");

    let output = run_in(temp.path(), &["show", path_str(&fixture("partial.json"))]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("1__\n__1\n"), "stdout: {}", text);
    assert!(text.contains("Digits: incomplete"));

    let output = run_in(temp.path(), &["show", path_str(&fixture("duplicates.json"))]);
    assert!(stdout(&output).contains("! duplicate digit, leading zero"));
}

#[test]
fn test_show_json() {
    let (_temp, output) = run(&["show", path_str(&fixture("checker.json")), "--json"]);
    assert!(output.status.success());

    let view: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(view["grid"], serde_json::json!(["37", "73"]));
    assert_eq!(view["digit_string"], "3773");
    assert_eq!(view["valid"], true);
    assert_eq!(view["swatches"][0]["is_leading_color"], true);
    assert_eq!(view["swatches"][1]["value"], "7");
}

// ============================================================================
// edit
// ============================================================================

#[test]
fn test_edit_writes_document() {
    let temp = TempDir::new().expect("should create temp dir");
    let out = temp.path().join("edited.json");

    let output = run_in(
        temp.path(),
        &[
            "edit",
            path_str(&fixture("checker.json")),
            "-e",
            "#F00=39",
            "-e",
            "#0F0=",
            "-e",
            "blur",
            "-o",
            path_str(&out),
        ],
    );
    assert!(output.status.success(), "edit failed: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("#FF0000=\"39\": committed 9"));
    assert!(text.contains("#00FF00=\"\": cleared"));
    assert!(text.contains("blur: reset"));

    let output = run_in(temp.path(), &["digits", path_str(&out)]);
    assert_eq!(stdout(&output), "9779\n");
}

#[test]
fn test_edit_json_outcomes() {
    let (_temp, output) = run(&[
        "edit",
        path_str(&fixture("partial.json")),
        "-e",
        "#0F0=a",
        "-e",
        "#0F0=15",
        "-e",
        "#00F=0",
        "-e",
        "toggle",
        "--json",
    ]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    let outcomes: Vec<&str> = report["events"]
        .as_array()
        .expect("events array")
        .iter()
        .map(|e| e["outcome"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(outcomes, vec!["rejected", "rejected", "committed", "toggled"]);
    assert_eq!(report["colorized"], false);
    assert_eq!(report["digit_string"], serde_json::Value::Null);
    assert_eq!(report["swatches"][2]["digit"], 0);
}

#[test]
fn test_edit_rejects_malformed_event() {
    let (_temp, output) = run(&["edit", path_str(&fixture("checker.json")), "-e", "focus"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_edit_unknown_color() {
    let (_temp, output) = run(&["edit", path_str(&fixture("checker.json")), "-e", "#00F=1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("#0000FF"));
}

// ============================================================================
// import
// ============================================================================

#[test]
fn test_import_to_file() {
    let temp = TempDir::new().expect("should create temp dir");
    let png = write_png(temp.path(), &[&[RED, BLUE], &[BLUE, RED]]);
    let out = temp.path().join("doc.json");

    let output = run_in(temp.path(), &["import", path_str(&png), "-o", path_str(&out)]);
    assert!(output.status.success(), "import failed: {}", stderr(&output));
    assert!(stdout(&output).contains("(2x2, 2 colors)"));

    let output = run_in(temp.path(), &["digits", path_str(&out)]);
    assert_eq!(stdout(&output), "1221\n");
}

#[test]
fn test_import_to_stdout() {
    let temp = TempDir::new().expect("should create temp dir");
    let png = write_png(temp.path(), &[&[BLUE, RED, RED]]);

    let output = run_in(temp.path(), &["import", path_str(&png)]);
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(doc["palette"], serde_json::json!(["#0000FF", "#FF0000"]));
    assert_eq!(doc["pixels"], serde_json::json!([[0, 1, 1]]));
    assert_eq!(doc["digits"]["#0000FF"], 1);
}

#[test]
fn test_import_too_many_colors() {
    let temp = TempDir::new().expect("should create temp dir");
    let png = write_png(temp.path(), &[&[RED, BLUE]]);

    let output = run_in(temp.path(), &["import", path_str(&png), "--max-colors", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("pixelate"));
}

#[test]
fn test_import_missing_png() {
    let (_temp, output) = run(&["import", "missing.png"]);
    assert_eq!(output.status.code(), Some(2));
}
