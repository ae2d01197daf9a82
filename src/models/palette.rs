//! The ordered set of distinct colors of one pixelated image.

use std::collections::HashSet;

use super::error::ModelError;
use crate::color::ColorKey;

/// Ordered, duplicate-free list of palette colors.
///
/// Order is the order of first occurrence in the source image, so the color
/// of the first pixel is always entry 0 when the palette comes from
/// [`crate::import`].
///
/// # Example
///
/// ```
/// use primeimg::color::ColorKey;
/// use primeimg::models::Palette;
///
/// let palette = Palette::new(vec![
///     ColorKey::parse("#000").unwrap(),
///     ColorKey::parse("#FFF").unwrap(),
/// ])
/// .unwrap();
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.index_of(&ColorKey::parse("white").unwrap()), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<ColorKey>,
}

impl Palette {
    /// Create a palette, rejecting empty input and repeated colors.
    pub fn new(colors: Vec<ColorKey>) -> Result<Self, ModelError> {
        if colors.is_empty() {
            return Err(ModelError::EmptyPalette);
        }

        let mut seen = HashSet::new();
        for (index, color) in colors.iter().enumerate() {
            if !seen.insert(color) {
                return Err(ModelError::DuplicateColor { index, color: color.clone() });
            }
        }

        Ok(Self { colors })
    }

    /// Number of colors
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at a palette index
    pub fn get(&self, index: usize) -> Option<&ColorKey> {
        self.colors.get(index)
    }

    /// Palette index of a color
    pub fn index_of(&self, color: &ColorKey) -> Option<usize> {
        self.colors.iter().position(|c| c == color)
    }

    pub fn contains(&self, color: &ColorKey) -> bool {
        self.colors.contains(color)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorKey> {
        self.colors.iter()
    }

    pub fn colors(&self) -> &[ColorKey] {
        &self.colors
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a ColorKey;
    type IntoIter = std::slice::Iter<'a, ColorKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}
