//! Swatch editing
//!
//! [`DigitEditor`] is the single owner of the palette, pixel grid, digit
//! mapping and edit session of one source image. The presentation layer
//! sends it raw field contents and blur events; it answers with what each
//! swatch field should show and which warnings apply.
//!
//! # Field states
//!
//! Each swatch field is either `Committed(digit)` (possibly unassigned,
//! shown blank) or `Empty`, the transient state of a field the user has just
//! cleared. At most one field is `Empty` at a time since only one field can
//! have focus. Blurring an `Empty` field simply shows the committed digit
//! again; the mapping itself never loses a digit by being cleared.
//!
//! # Example
//!
//! ```
//! use primeimg::color::ColorKey;
//! use primeimg::mapping::{Digit, DigitMapping};
//! use primeimg::models::{Palette, PixelGrid};
//! use primeimg::session::{AssignOutcome, DigitEditor};
//!
//! let red = ColorKey::parse("red").unwrap();
//! let palette = Palette::new(vec![red.clone()]).unwrap();
//! let grid = PixelGrid::new(vec![vec![0]], &palette).unwrap();
//! let mapping = DigitMapping::sequential(&palette);
//! let mut editor = DigitEditor::new(palette, grid, mapping).unwrap();
//!
//! // The field shows "1"; typing 5 after it yields "15"
//! let outcome = editor.assign_digit(&red, "15").unwrap();
//! assert_eq!(outcome, AssignOutcome::Committed(Digit::new(5).unwrap()));
//! assert_eq!(editor.field_value(&red).as_deref(), Some("5"));
//! ```

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::color::ColorKey;
use crate::mapping::{Digit, DigitMapping, MappingError};
use crate::models::{Palette, PixelGrid};
use crate::projector::{self, DigitGrid};

/// Contract violations between the editor and its callers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The color is not part of the current palette
    #[error("color {0} is not in the palette")]
    UnknownColor(ColorKey),
    /// The pixel grid references a palette entry that doesn't exist
    #[error("pixel grid references palette index {index}, palette has {palette_len} colors")]
    GridMismatch {
        /// Largest index found in the grid
        index: usize,
        /// Number of palette entries
        palette_len: usize,
    },
    /// The mapping's colors are not exactly the palette's colors
    #[error("digit mapping does not cover the palette")]
    MappingMismatch,
}

impl From<MappingError> for EditError {
    fn from(err: MappingError) -> Self {
        match err {
            MappingError::UnknownColor(color) => EditError::UnknownColor(color),
            MappingError::OutOfRange(_) => EditError::MappingMismatch,
        }
    }
}

/// What one swatch field currently shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Shows the committed digit, or blank when unassigned
    Committed(Option<Digit>),
    /// Just cleared by the user; shows blank until a digit or blur
    Empty,
}

/// Result of feeding one raw field value to [`DigitEditor::assign_digit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    /// A digit was committed to the mapping
    Committed(Digit),
    /// The field was cleared and is now the session's empty field
    Cleared,
    /// Not a single digit; nothing changed
    Rejected,
}

/// Transient per-field state layered over the mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSession {
    empty: Option<ColorKey>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field currently shown empty, if any
    pub fn empty_color(&self) -> Option<&ColorKey> {
        self.empty.as_ref()
    }

    pub fn is_empty_field(&self, color: &ColorKey) -> bool {
        self.empty.as_ref() == Some(color)
    }

    /// Make `color` the empty field, replacing any previous one
    pub fn mark_empty(&mut self, color: ColorKey) {
        self.empty = Some(color);
    }

    /// Forget the empty field. Idempotent.
    pub fn reset(&mut self) {
        self.empty = None;
    }

    pub fn field_state(&self, color: &ColorKey, mapping: &DigitMapping) -> FieldState {
        if self.is_empty_field(color) {
            FieldState::Empty
        } else {
            FieldState::Committed(mapping.digit(color))
        }
    }
}

/// Everything the presentation layer needs to draw one swatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub color: ColorKey,
    /// Palette index
    pub index: usize,
    /// Text of the input field
    pub value: String,
    /// Committed digit, independent of the field text
    pub digit: Option<Digit>,
    pub is_empty: bool,
    pub is_duplicate: bool,
    /// This color occupies the first pixel
    pub is_leading_color: bool,
    pub is_leading_zero: bool,
    /// Draw a warning marker (hidden while the field is being retyped)
    pub show_warning: bool,
}

/// Controller owning one image's digit assignment state.
#[derive(Debug, Clone)]
pub struct DigitEditor {
    palette: Palette,
    grid: PixelGrid,
    mapping: DigitMapping,
    session: EditSession,
    colorized: bool,
}

impl DigitEditor {
    /// Create an editor, checking that grid and mapping belong to the palette.
    pub fn new(
        palette: Palette,
        grid: PixelGrid,
        mapping: DigitMapping,
    ) -> Result<Self, EditError> {
        check_grid(&palette, &grid)?;
        if mapping.len() != palette.len() || !palette.iter().all(|c| mapping.contains(c)) {
            return Err(EditError::MappingMismatch);
        }

        debug!(colors = palette.len(), rows = grid.rows(), cols = grid.cols(), "editor created");
        Ok(Self { palette, grid, mapping, session: EditSession::new(), colorized: true })
    }

    /// Create an editor with no digits assigned yet.
    pub fn unassigned(palette: Palette, grid: PixelGrid) -> Result<Self, EditError> {
        let mapping = DigitMapping::unassigned(&palette);
        Self::new(palette, grid, mapping)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn mapping(&self) -> &DigitMapping {
        &self.mapping
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    /// Feed the raw content of a swatch field after a keystroke.
    ///
    /// The color's committed digit is stripped from `raw_input` first, so
    /// typing into a field holding `3` (raw `"35"` or `"53"`) replaces the
    /// digit instead of appending to it. This holds while the field is shown
    /// empty too: typing the committed digit back leaves it empty. An empty
    /// remainder clears the field; anything that is not exactly one digit is
    /// rejected without touching any state, the empty marker included.
    pub fn assign_digit(
        &mut self,
        color: &ColorKey,
        raw_input: &str,
    ) -> Result<AssignOutcome, EditError> {
        if !self.mapping.contains(color) {
            return Err(EditError::UnknownColor(color.clone()));
        }
        let remainder = match self.mapping.digit(color) {
            Some(assigned) => raw_input.replacen(&assigned.to_string(), "", 1),
            None => raw_input.to_string(),
        };

        if remainder.is_empty() {
            self.session.mark_empty(color.clone());
            debug!(%color, "field cleared");
            return Ok(AssignOutcome::Cleared);
        }

        let Some(digit) = Digit::parse_input(&remainder) else {
            return Ok(AssignOutcome::Rejected);
        };

        self.mapping.set(color, digit)?;
        self.session.reset();
        debug!(%color, %digit, "digit committed");
        Ok(AssignOutcome::Committed(digit))
    }

    /// Field lost focus: an empty field goes back to its committed digit.
    pub fn reset_empty(&mut self) {
        self.session.reset();
    }

    pub fn field_state(&self, color: &ColorKey) -> Option<FieldState> {
        self.mapping.contains(color).then(|| self.session.field_state(color, &self.mapping))
    }

    /// Text the color's field shows, `None` for a color outside the palette
    pub fn field_value(&self, color: &ColorKey) -> Option<String> {
        self.field_state(color).map(|state| match state {
            FieldState::Committed(Some(digit)) => digit.to_string(),
            FieldState::Committed(None) | FieldState::Empty => String::new(),
        })
    }

    pub fn has_duplicate_digits(&self) -> bool {
        self.mapping.has_duplicate_digits()
    }

    pub fn is_duplicate_digit(&self, color: &ColorKey) -> bool {
        self.mapping.is_duplicate_digit(color)
    }

    pub fn leading_digit_is_zero(&self) -> bool {
        self.mapping.leading_digit_is_zero(&self.palette, &self.grid)
    }

    /// Color of the first pixel in raster order
    pub fn leading_color(&self) -> &ColorKey {
        &self.palette.colors()[self.grid.first()]
    }

    pub fn is_complete(&self) -> bool {
        self.mapping.is_complete()
    }

    /// Complete, unique, and not zero-led
    pub fn is_valid(&self) -> bool {
        self.mapping.is_valid(&self.palette, &self.grid)
    }

    /// Swatch view of every palette color, in palette order
    pub fn swatches(&self) -> Vec<Swatch> {
        let leading = self.leading_color();
        let leading_zero = self.leading_digit_is_zero();

        self.palette
            .iter()
            .enumerate()
            .map(|(index, color)| {
                let is_empty = self.session.is_empty_field(color);
                let is_duplicate = self.mapping.is_duplicate_digit(color);
                let is_leading_color = color == leading;
                let is_leading_zero = is_leading_color && leading_zero;
                Swatch {
                    color: color.clone(),
                    index,
                    value: self.field_value(color).unwrap_or_default(),
                    digit: self.mapping.digit(color),
                    is_empty,
                    is_duplicate,
                    is_leading_color,
                    is_leading_zero,
                    show_warning: !is_empty && (is_duplicate || is_leading_zero),
                }
            })
            .collect()
    }

    pub fn is_colorized(&self) -> bool {
        self.colorized
    }

    pub fn set_colorized(&mut self, colorized: bool) {
        self.colorized = colorized;
    }

    /// Flip between colored swatches and bare digits
    pub fn toggle_colorized(&mut self) -> bool {
        self.colorized = !self.colorized;
        self.colorized
    }

    /// Project the current state onto the pixel grid
    pub fn project(&self) -> DigitGrid {
        projector::project(&self.palette, &self.grid, &self.mapping, self.colorized)
    }

    /// The image's number, or `None` while any color lacks a digit
    pub fn digit_string(&self) -> Option<String> {
        projector::to_digit_string(&self.palette, &self.grid, &self.mapping)
    }

    /// Swap in a new source image wholesale.
    ///
    /// The mapping starts over unassigned and the session is cleared.
    pub fn replace_source(&mut self, palette: Palette, grid: PixelGrid) -> Result<(), EditError> {
        check_grid(&palette, &grid)?;
        self.mapping = DigitMapping::unassigned(&palette);
        self.palette = palette;
        self.grid = grid;
        self.session.reset();
        debug!(colors = self.palette.len(), "source replaced");
        Ok(())
    }
}

fn check_grid(palette: &Palette, grid: &PixelGrid) -> Result<(), EditError> {
    match grid.cells().iter().copied().max() {
        Some(index) if index >= palette.len() => {
            Err(EditError::GridMismatch { index, palette_len: palette.len() })
        }
        _ => Ok(()),
    }
}
