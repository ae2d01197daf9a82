//! Data models for one source image: palette, pixel grid, and the document
//! format that carries them together with digit assignments.

mod document;
mod error;
mod grid;
mod palette;

pub use document::{DocumentError, PrimeImageDocument};
pub use error::ModelError;
pub use grid::PixelGrid;
pub use palette::Palette;
