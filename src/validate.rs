//! Validation report for a digit assignment
//!
//! The editor exposes raw facts (duplicates, leading zero, completeness).
//! This module turns them into [`ValidationIssue`]s with a message and a
//! suggestion, for the CLI and any other presentation layer. Nothing here
//! blocks an edit; issues are advisory.

use serde::Serialize;

use crate::color::ColorKey;
use crate::mapping::Digit;
use crate::session::DigitEditor;

/// Number of distinct digits available
pub const MAX_UNIQUE_COLORS: usize = 10;

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The digit string is not usable as-is
    Error,
    /// Usable here, but a downstream stage may refuse it
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// Type of validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// A color has no digit yet
    UnassignedColor,
    /// Several colors share a digit
    DuplicateDigit,
    /// The first pixel's color is mapped to 0
    LeadingZero,
    /// More colors than digits, so uniqueness is impossible
    TooManyColors,
    /// The number is longer than the configured limit
    TooManyDigits,
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueType::UnassignedColor => write!(f, "unassigned_color"),
            IssueType::DuplicateDigit => write!(f, "duplicate_digit"),
            IssueType::LeadingZero => write!(f, "leading_zero"),
            IssueType::TooManyColors => write!(f, "too_many_colors"),
            IssueType::TooManyDigits => write!(f, "too_many_digits"),
        }
    }
}

/// A problem with the current digit assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub issue_type: IssueType,
    /// Human-readable message describing the issue
    pub message: String,
    /// Optional suggestion for fixing the issue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Colors involved, in palette order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<ColorKey>,
}

impl ValidationIssue {
    /// Create a new error
    pub fn error(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            issue_type,
            message: message.into(),
            suggestion: None,
            colors: Vec::new(),
        }
    }

    /// Create a new warning
    pub fn warning(issue_type: IssueType, message: impl Into<String>) -> Self {
        Self { severity: Severity::Warning, ..Self::error(issue_type, message) }
    }

    /// Add a suggestion to this issue
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach the colors involved
    pub fn with_colors<'a>(mut self, colors: impl IntoIterator<Item = &'a ColorKey>) -> Self {
        self.colors = colors.into_iter().cloned().collect();
        self
    }
}

/// Validator for an editor's current state
#[derive(Debug, Clone)]
pub struct Validator {
    issues: Vec<ValidationIssue>,
    max_digits: usize,
}

impl Validator {
    /// Create a validator with a downstream digit-count limit
    pub fn new(max_digits: usize) -> Self {
        Self { issues: Vec::new(), max_digits }
    }

    /// Check an editor, appending any issues found
    pub fn validate(&mut self, editor: &DigitEditor) {
        self.check_palette_size(editor);
        self.check_unassigned(editor);
        self.check_duplicates(editor);
        self.check_leading_zero(editor);
        self.check_length(editor);
    }

    fn check_palette_size(&mut self, editor: &DigitEditor) {
        let colors = editor.palette().len();
        if colors > MAX_UNIQUE_COLORS {
            self.issues.push(
                ValidationIssue::error(
                    IssueType::TooManyColors,
                    format!(
                        "Image has {} colors but only {} digits exist",
                        colors, MAX_UNIQUE_COLORS
                    ),
                )
                .with_suggestion(format!(
                    "Reduce the image to at most {} colors",
                    MAX_UNIQUE_COLORS
                )),
            );
        }
    }

    fn check_unassigned(&mut self, editor: &DigitEditor) {
        let unassigned = editor.mapping().unassigned_colors(editor.palette());
        if unassigned.is_empty() {
            return;
        }

        let names: Vec<&str> = unassigned.iter().map(|c| c.as_str()).collect();
        self.issues.push(
            ValidationIssue::error(
                IssueType::UnassignedColor,
                format!("No digit assigned to {}", names.join(", ")),
            )
            .with_suggestion("Type a digit on each of these swatches")
            .with_colors(unassigned),
        );
    }

    fn check_duplicates(&mut self, editor: &DigitEditor) {
        let groups = editor.mapping().duplicate_groups(editor.palette());
        if groups.is_empty() {
            return;
        }

        let unused = unused_digits(editor);
        for (digit, colors) in groups {
            let names: Vec<&str> = colors.iter().map(|c| c.as_str()).collect();
            let mut issue = ValidationIssue::error(
                IssueType::DuplicateDigit,
                format!("Digit {} is assigned to {} colors: {}", digit, colors.len(), names.join(", ")),
            )
            .with_colors(colors);
            if !unused.is_empty() {
                issue = issue.with_suggestion(format!("Unused digits: {}", join_digits(&unused)));
            }
            self.issues.push(issue);
        }
    }

    fn check_leading_zero(&mut self, editor: &DigitEditor) {
        if !editor.leading_digit_is_zero() {
            return;
        }

        let leading = editor.leading_color();
        let mut issue = ValidationIssue::error(
            IssueType::LeadingZero,
            format!("First digit in the prime image cannot be a 0 (color {})", leading),
        )
        .with_colors([leading]);
        if let Some(replacement) = unused_digits(editor).into_iter().find(|d| d.value() != 0) {
            issue = issue.with_suggestion(format!("Assign {} to {} instead", replacement, leading));
        }
        self.issues.push(issue);
    }

    fn check_length(&mut self, editor: &DigitEditor) {
        let digits = editor.grid().len();
        if digits > self.max_digits {
            self.issues.push(
                ValidationIssue::warning(
                    IssueType::TooManyDigits,
                    format!("Number has {} digits, limit is {}", digits, self.max_digits),
                )
                .with_suggestion("Pixelate the source image to fewer cells"),
            );
        }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.iter().filter(|i| i.severity == Severity::Warning).count()
    }
}

/// Run every check against an editor
pub fn validate_editor(editor: &DigitEditor, max_digits: usize) -> Vec<ValidationIssue> {
    let mut validator = Validator::new(max_digits);
    validator.validate(editor);
    validator.into_issues()
}

fn unused_digits(editor: &DigitEditor) -> Vec<Digit> {
    let counts = editor.mapping().digit_counts();
    (0..=9u8).filter(|&d| counts[d as usize] == 0).filter_map(Digit::new).collect()
}

fn join_digits(digits: &[Digit]) -> String {
    digits.iter().map(Digit::to_string).collect::<Vec<_>>().join(", ")
}
