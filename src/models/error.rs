//! Errors raised when upstream data violates the palette/grid contract.

use thiserror::Error;

use crate::color::ColorKey;

/// Palette or pixel grid construction failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// No colors provided
    #[error("palette cannot be empty")]
    EmptyPalette,
    /// The same color appears twice in the palette
    #[error("duplicate color {color} at palette index {index}")]
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
        /// The repeated color
        color: ColorKey,
    },
    /// Grid has no rows or no columns
    #[error("pixel grid cannot be empty")]
    EmptyGrid,
    /// A row is shorter or longer than the first row
    #[error("row {row} has {found} pixels, expected {expected}")]
    RaggedRow {
        /// Zero-based row index
        row: usize,
        /// Width of the first row
        expected: usize,
        /// Width of this row
        found: usize,
    },
    /// A pixel references a palette entry that doesn't exist
    #[error("pixel ({row}, {col}) references palette index {index}, palette has {palette_len} colors")]
    IndexOutOfRange {
        /// Zero-based row
        row: usize,
        /// Zero-based column
        col: usize,
        /// The offending index
        index: usize,
        /// Number of palette entries
        palette_len: usize,
    },
}
