//! Terminal rendering for digit images
//!
//! Provides ANSI escape sequence generation for displaying a projected digit
//! grid with true-color swatch backgrounds, plus the swatch legend and issue
//! list printed under it.

use image::Rgba;

use crate::color::luminance;
use crate::projector::DigitGrid;
use crate::session::Swatch;
use crate::validate::ValidationIssue;

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

const ANSI_FG_DARK: &str = "\x1b[38;2;0;0;0m";
const ANSI_FG_LIGHT: &str = "\x1b[38;2;255;255;255m";

/// Convert RGBA color to ANSI 24-bit background escape sequence.
///
/// Transparent colors (alpha = 0) are rendered as a dark gray background
/// to visually distinguish them from opaque colors.
///
/// # Examples
///
/// ```
/// use primeimg::terminal::color_to_ansi_bg;
/// use image::Rgba;
///
/// let red = color_to_ansi_bg(Rgba([255, 0, 0, 255]));
/// assert_eq!(red, "\x1b[48;2;255;0;0m");
///
/// let transparent = color_to_ansi_bg(Rgba([0, 0, 0, 0]));
/// assert_eq!(transparent, "\x1b[48;5;236m");
/// ```
pub fn color_to_ansi_bg(rgba: Rgba<u8>) -> String {
    if rgba[3] == 0 {
        "\x1b[48;5;236m".to_string()
    } else {
        format!("\x1b[48;2;{};{};{}m", rgba[0], rgba[1], rgba[2])
    }
}

/// Foreground that stays readable on top of `rgba`.
///
/// Black on light swatches, white on dark ones and on the transparent gray.
pub fn contrasting_fg(rgba: Rgba<u8>) -> &'static str {
    if rgba[3] != 0 && luminance(rgba) > 0.5 {
        ANSI_FG_DARK
    } else {
        ANSI_FG_LIGHT
    }
}

/// Render the projected grid.
///
/// Colorized grids draw each cell as a 3-character " d " block on its
/// swatch color. Uncolored grids print the bare digits, one line per row.
/// Cells whose color has no digit show `blank`.
pub fn render_digit_grid(grid: &DigitGrid, blank: char) -> String {
    if !grid.is_colorized() {
        let mut text = grid.to_text(blank);
        if !text.is_empty() {
            text.push('\n');
        }
        return text;
    }

    let mut output = String::new();
    for row in grid.iter_rows() {
        for cell in row {
            let rgba = cell.color.to_rgba();
            output.push_str(&color_to_ansi_bg(rgba));
            output.push_str(contrasting_fg(rgba));
            output.push(' ');
            output.push(cell.digit.map_or(blank, |d| d.to_char()));
            output.push(' ');
            output.push_str(ANSI_RESET);
        }
        output.push('\n');
    }
    output
}

/// Render the swatch legend.
///
/// One line per palette color: index, color chip (when colorized), hex,
/// field value, and the `warning` marker followed by the reasons when the
/// swatch shows a warning.
pub fn render_swatches(swatches: &[Swatch], colorized: bool, warning: &str) -> String {
    let mut legend = String::from("Swatches:\n");

    for swatch in swatches {
        let chip = if colorized {
            format!("{}   {} ", color_to_ansi_bg(swatch.color.to_rgba()), ANSI_RESET)
        } else {
            String::new()
        };
        let value = if swatch.value.is_empty() { "_" } else { swatch.value.as_str() };

        let mut line = format!("  {:>2} {}{:<10} {}", swatch.index, chip, swatch.color, value);

        let mut notes = Vec::new();
        if swatch.is_duplicate {
            notes.push("duplicate digit");
        }
        if swatch.is_leading_zero {
            notes.push("leading zero");
        }
        if swatch.show_warning {
            line.push_str(&format!(" {} {}", warning, notes.join(", ")));
        } else if swatch.is_empty {
            line.push_str(" (editing)");
        } else if swatch.digit.is_none() {
            line.push_str(" (unassigned)");
        }
        if swatch.is_leading_color && !swatch.is_leading_zero {
            line.push_str(" [first pixel]");
        }

        legend.push_str(&line);
        legend.push('\n');
    }

    legend
}

/// Render issues one per line, `SEVERITY [type]: message (suggestion)`.
pub fn render_issues(issues: &[ValidationIssue]) -> String {
    let mut output = String::new();
    for issue in issues {
        output.push_str(&format!("{} [{}]: {}", issue.severity, issue.issue_type, issue.message));
        if let Some(ref sug) = issue.suggestion {
            output.push_str(&format!(" ({})", sug));
        }
        output.push('\n');
    }
    output
}
