//! Digit-image projection
//!
//! Pure functions turning palette + pixel grid + digit mapping into what the
//! presentation layer draws ([`DigitGrid`]) and what a downstream number
//! stage consumes ([`to_digit_string`]). Nothing here holds state; callers
//! re-project whenever the mapping changes.

use serde::Serialize;

use crate::color::ColorKey;
use crate::mapping::{Digit, DigitMapping};
use crate::models::{Palette, PixelGrid};

/// One projected pixel: its color and the digit drawn on top (if any).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    pub color: ColorKey,
    pub digit: Option<Digit>,
}

/// The projected image, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigitGrid {
    rows: usize,
    cols: usize,
    /// Draw swatch colors behind the digits, or digits alone
    colorized: bool,
    cells: Vec<RenderedCell>,
}

impl DigitGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_colorized(&self) -> bool {
        self.colorized
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&RenderedCell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col)
    }

    pub fn cells(&self) -> &[RenderedCell] {
        &self.cells
    }

    pub fn iter_rows(&self) -> std::slice::Chunks<'_, RenderedCell> {
        self.cells.chunks(self.cols)
    }

    /// Plain text rendering, one line per row, `blank` for unassigned cells.
    pub fn to_text(&self, blank: char) -> String {
        self.iter_rows()
            .map(|row| row.iter().map(|cell| cell.digit.map_or(blank, Digit::to_char)).collect())
            .collect::<Vec<String>>()
            .join("\n")
    }
}

/// Resolve every pixel to its color and digit.
///
/// # Panics
///
/// Panics if the grid references an index outside the palette. Grids are
/// checked against their palette when built, so this only happens when a
/// grid is paired with a different palette than the one it was built for.
pub fn project(
    palette: &Palette,
    grid: &PixelGrid,
    mapping: &DigitMapping,
    colorized: bool,
) -> DigitGrid {
    let cells = grid
        .cells()
        .iter()
        .map(|&index| {
            let color = &palette.colors()[index];
            RenderedCell { color: color.clone(), digit: mapping.digit(color) }
        })
        .collect();

    DigitGrid { rows: grid.rows(), cols: grid.cols(), colorized, cells }
}

/// The number the image spells out, read in raster order.
///
/// Returns `None` until every palette color has a digit; a partial string is
/// never produced.
///
/// ```
/// use primeimg::color::ColorKey;
/// use primeimg::mapping::{Digit, DigitMapping};
/// use primeimg::models::{Palette, PixelGrid};
/// use primeimg::projector::to_digit_string;
///
/// let a = ColorKey::parse("#000").unwrap();
/// let b = ColorKey::parse("#FFF").unwrap();
/// let palette = Palette::new(vec![a.clone(), b.clone()]).unwrap();
/// let grid = PixelGrid::new(vec![vec![0, 1], vec![1, 0]], &palette).unwrap();
/// let mapping = DigitMapping::with_assignments(
///     &palette,
///     vec![(a, Digit::new(3).unwrap()), (b, Digit::new(7).unwrap())],
/// )
/// .unwrap();
///
/// assert_eq!(to_digit_string(&palette, &grid, &mapping).as_deref(), Some("3773"));
/// ```
pub fn to_digit_string(
    palette: &Palette,
    grid: &PixelGrid,
    mapping: &DigitMapping,
) -> Option<String> {
    let chars: Vec<char> = palette
        .iter()
        .map(|color| mapping.digit(color).map(Digit::to_char))
        .collect::<Option<_>>()?;

    Some(grid.cells().iter().map(|&index| chars[index]).collect())
}
