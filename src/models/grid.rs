//! Row-major grid of palette indexes.

use super::error::ModelError;
use super::palette::Palette;

/// A rectangular matrix of palette indexes, one per pixel.
///
/// Dimensions and contents are fixed once constructed; every index is known
/// to be valid for the palette it was checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
}

impl PixelGrid {
    /// Build a grid from nested rows, checking shape and index range.
    pub fn new(rows: Vec<Vec<usize>>, palette: &Palette) -> Result<Self, ModelError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if cols == 0 {
            return Err(ModelError::EmptyGrid);
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != cols {
                return Err(ModelError::RaggedRow { row, expected: cols, found: values.len() });
            }
            for (col, &index) in values.iter().enumerate() {
                if index >= palette.len() {
                    return Err(ModelError::IndexOutOfRange {
                        row,
                        col,
                        index,
                        palette_len: palette.len(),
                    });
                }
            }
            cells.extend_from_slice(values);
        }

        Ok(Self { rows: rows.len(), cols, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of pixels
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Palette index at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// Palette index of the first pixel in raster order
    pub fn first(&self) -> usize {
        self.cells[0]
    }

    /// All indexes in raster order
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn iter_rows(&self) -> std::slice::Chunks<'_, usize> {
        self.cells.chunks(self.cols)
    }

    /// Nested row representation, as used by documents
    pub fn to_rows(&self) -> Vec<Vec<usize>> {
        self.iter_rows().map(<[usize]>::to_vec).collect()
    }
}
