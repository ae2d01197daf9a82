//! Digit mapping: which decimal digit each palette color stands for
//!
//! A [`DigitMapping`] always holds exactly one entry per palette color. An
//! entry is either a committed [`Digit`] or unassigned. Validity facts
//! (duplicates, leading zero, completeness) are computed from the current
//! entries on every call and never stored.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::ColorKey;
use crate::models::{Palette, PixelGrid};

/// Digits handed out by [`DigitMapping::sequential`], leading digit first.
const SEQUENTIAL_DIGITS: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0];

/// Errors from mapping operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// The color is not part of the palette the mapping was built for
    #[error("color {0} is not in the palette")]
    UnknownColor(ColorKey),
    /// A digit value outside 0-9
    #[error("digit must be between 0 and 9, got {0}")]
    OutOfRange(u8),
}

/// A single decimal digit, 0 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub const ZERO: Digit = Digit(0);

    /// Create a digit, returning `None` outside 0-9
    pub fn new(value: u8) -> Option<Self> {
        (value <= 9).then_some(Digit(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn to_char(self) -> char {
        char::from(b'0' + self.0)
    }

    /// Parse free-text field input.
    ///
    /// Surrounding whitespace is ignored; what remains must be exactly one
    /// ASCII decimal digit. Signs, decimals and multi-digit numbers are
    /// rejected.
    pub fn parse_input(input: &str) -> Option<Self> {
        let mut chars = input.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_digit(10).map(|d| Digit(d as u8)),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Digit {
    type Error = MappingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value).ok_or(MappingError::OutOfRange(value))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Association from palette color to an optional digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitMapping {
    digits: HashMap<ColorKey, Option<Digit>>,
}

impl DigitMapping {
    /// Every palette color present, none assigned.
    pub fn unassigned(palette: &Palette) -> Self {
        Self { digits: palette.iter().map(|c| (c.clone(), None)).collect() }
    }

    /// Assign 1, 2, ... 9, 0 in palette order.
    ///
    /// For palettes of up to ten colors the result is unique and its leading
    /// digit is never zero. Colors past the tenth stay unassigned.
    pub fn sequential(palette: &Palette) -> Self {
        let mut mapping = Self::unassigned(palette);
        for (color, &value) in palette.iter().zip(SEQUENTIAL_DIGITS.iter()) {
            mapping.digits.insert(color.clone(), Digit::new(value));
        }
        mapping
    }

    /// Start from an upstream assignment.
    ///
    /// Colors the assignment doesn't mention stay unassigned. A color that is
    /// not in the palette means palette and assignment are out of sync.
    pub fn with_assignments<I>(palette: &Palette, assignments: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (ColorKey, Digit)>,
    {
        let mut mapping = Self::unassigned(palette);
        for (color, digit) in assignments {
            mapping.set(&color, digit)?;
        }
        Ok(mapping)
    }

    /// Number of entries, always the palette size
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn contains(&self, color: &ColorKey) -> bool {
        self.digits.contains_key(color)
    }

    /// Committed digit for a color, `None` if unassigned or unknown
    pub fn digit(&self, color: &ColorKey) -> Option<Digit> {
        self.digits.get(color).copied().flatten()
    }

    /// Commit a digit, returning the previous one.
    ///
    /// Duplicates are accepted here; they are reported, not prevented.
    pub fn set(&mut self, color: &ColorKey, digit: Digit) -> Result<Option<Digit>, MappingError> {
        match self.digits.get_mut(color) {
            Some(slot) => Ok(slot.replace(digit)),
            None => Err(MappingError::UnknownColor(color.clone())),
        }
    }

    /// Every color has a digit
    pub fn is_complete(&self) -> bool {
        self.digits.values().all(Option::is_some)
    }

    /// Unassigned colors, in palette order
    pub fn unassigned_colors<'p>(&self, palette: &'p Palette) -> Vec<&'p ColorKey> {
        palette.iter().filter(|c| self.digit(c).is_none()).collect()
    }

    /// How many colors use each digit
    pub fn digit_counts(&self) -> [usize; 10] {
        let mut counts = [0; 10];
        for digit in self.digits.values().flatten() {
            counts[digit.value() as usize] += 1;
        }
        counts
    }

    /// Two or more colors share a digit
    pub fn has_duplicate_digits(&self) -> bool {
        self.digit_counts().iter().any(|&n| n > 1)
    }

    /// Some other color shares this color's digit
    pub fn is_duplicate_digit(&self, color: &ColorKey) -> bool {
        match self.digit(color) {
            Some(digit) => self.digit_counts()[digit.value() as usize] > 1,
            None => false,
        }
    }

    /// Groups of colors sharing a digit, ordered by digit, colors in palette order
    pub fn duplicate_groups<'p>(&self, palette: &'p Palette) -> Vec<(Digit, Vec<&'p ColorKey>)> {
        let counts = self.digit_counts();
        (0..=9u8)
            .filter(|&d| counts[d as usize] > 1)
            .map(|d| {
                let digit = Digit(d);
                let colors = palette.iter().filter(|c| self.digit(c) == Some(digit)).collect();
                (digit, colors)
            })
            .collect()
    }

    /// Digit of the color at pixel (0, 0)
    pub fn leading_digit(&self, palette: &Palette, grid: &PixelGrid) -> Option<Digit> {
        palette.get(grid.first()).and_then(|c| self.digit(c))
    }

    /// The number would start with a zero
    pub fn leading_digit_is_zero(&self, palette: &Palette, grid: &PixelGrid) -> bool {
        self.leading_digit(palette, grid) == Some(Digit::ZERO)
    }

    /// Complete, unique, and not zero-led
    pub fn is_valid(&self, palette: &Palette, grid: &PixelGrid) -> bool {
        self.is_complete()
            && !self.has_duplicate_digits()
            && !self.leading_digit_is_zero(palette, grid)
    }

    /// Committed assignments in palette order
    pub fn assignments<'p>(&self, palette: &'p Palette) -> Vec<(&'p ColorKey, Digit)> {
        palette.iter().filter_map(|c| self.digit(c).map(|d| (c, d))).collect()
    }
}
