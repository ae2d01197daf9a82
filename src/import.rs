//! PNG import: read an already-pixelated image into a palette and pixel grid.
//!
//! Every distinct RGBA value becomes one palette entry, in the order it is
//! first met scanning rows top to bottom, left to right. No resizing or color
//! reduction happens here; the image is expected to be the final pixelated
//! rendering, one pixel per digit.

use std::collections::HashMap;
use std::path::Path;

use image::{GenericImageView, ImageFormat, Rgba};
use thiserror::Error;
use tracing::info;

use crate::color::ColorKey;
use crate::mapping::DigitMapping;
use crate::models::{ModelError, Palette, PixelGrid, PrimeImageDocument};

/// Import failure
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be read or decoded
    #[error("failed to open image: {0}")]
    Image(#[from] image::ImageError),
    /// More distinct colors than allowed
    #[error("image has {found} colors, at most {max} allowed (pixelate the image first)")]
    TooManyColors {
        /// Distinct colors in the image
        found: usize,
        /// Configured limit
        max: usize,
    },
    /// Image has no pixels
    #[error("invalid image: {0}")]
    Model(#[from] ModelError),
}

/// Palette and grid read from an image
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub width: u32,
    pub height: u32,
    pub palette: Palette,
    pub grid: PixelGrid,
}

impl ImportResult {
    /// Document with digits pre-assigned in palette order (1-9, then 0)
    pub fn to_document(&self) -> PrimeImageDocument {
        let mapping = DigitMapping::sequential(&self.palette);
        PrimeImageDocument::from_parts(&self.palette, &self.grid, &mapping)
    }
}

/// Build palette and grid from any image view.
pub fn extract<I>(img: &I, max_colors: usize) -> Result<ImportResult, ImportError>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (width, height) = img.dimensions();

    let mut colors: Vec<ColorKey> = Vec::new();
    let mut color_to_index: HashMap<Rgba<u8>, usize> = HashMap::new();
    let mut rows: Vec<Vec<usize>> = Vec::with_capacity(height as usize);

    for y in 0..height {
        let mut row = Vec::with_capacity(width as usize);
        for x in 0..width {
            let pixel = img.get_pixel(x, y);
            let index = *color_to_index.entry(pixel).or_insert_with(|| {
                colors.push(ColorKey::from_rgba(pixel));
                colors.len() - 1
            });
            row.push(index);
        }
        rows.push(row);
    }

    if colors.len() > max_colors {
        return Err(ImportError::TooManyColors { found: colors.len(), max: max_colors });
    }

    let palette = Palette::new(colors)?;
    let grid = PixelGrid::new(rows, &palette)?;
    Ok(ImportResult { width, height, palette, grid })
}

/// Import a PNG file.
pub fn import_png<P: AsRef<Path>>(path: P, max_colors: usize) -> Result<ImportResult, ImportError> {
    let img = image::open(path.as_ref())?.to_rgba8();
    let result = extract(&img, max_colors)?;
    info!(
        path = %path.as_ref().display(),
        width = result.width,
        height = result.height,
        colors = result.palette.len(),
        "image imported"
    );
    Ok(result)
}

/// Import PNG data already in memory.
pub fn import_png_bytes(bytes: &[u8], max_colors: usize) -> Result<ImportResult, ImportError> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8();
    extract(&img, max_colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use tempfile::TempDir;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn image(rows: &[&[Rgba<u8>]]) -> RgbaImage {
        RgbaImage::from_fn(rows[0].len() as u32, rows.len() as u32, |x, y| {
            rows[y as usize][x as usize]
        })
    }

    #[test]
    fn test_palette_in_first_occurrence_order() {
        let img = image(&[&[BLUE, BLUE, RED], &[CLEAR, RED, BLUE]]);
        let result = extract(&img, 10).unwrap();
        let hexes: Vec<&str> = result.palette.iter().map(|c| c.as_str()).collect();
        assert_eq!(hexes, vec!["#0000FF", "#FF0000", "#00000000"]);
        assert_eq!(result.grid.to_rows(), vec![vec![0, 0, 1], vec![2, 1, 0]]);
        assert_eq!((result.width, result.height), (3, 2));
    }

    #[test]
    fn test_too_many_colors() {
        let img = image(&[&[BLUE, RED, CLEAR]]);
        match extract(&img, 2) {
            Err(ImportError::TooManyColors { found, max }) => assert_eq!((found, max), (3, 2)),
            other => panic!("expected TooManyColors, got {:?}", other),
        }
    }

    #[test]
    fn test_document_has_sequential_digits() {
        let img = image(&[&[RED, BLUE], &[BLUE, RED]]);
        let doc = extract(&img, 10).unwrap().to_document();
        let editor = doc.into_editor().unwrap();
        assert_eq!(editor.digit_string().as_deref(), Some("1221"));
        assert!(editor.is_valid());
    }

    #[test]
    fn test_import_png_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("tiny.png");
        image(&[&[RED, RED], &[BLUE, RED]]).save(&path).expect("should write png");

        let result = import_png(&path, 10).expect("should import png");
        assert_eq!(result.palette.len(), 2);
        assert_eq!(result.grid.first(), 0);
    }

    #[test]
    fn test_import_png_bytes() {
        let mut bytes = Vec::new();
        image(&[&[BLUE, RED, RED]])
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("should encode png");

        let result = import_png_bytes(&bytes, 10).expect("should decode png");
        assert_eq!(result.grid.to_rows(), vec![vec![0, 1, 1]]);
        assert!(import_png_bytes(b"not a png", 10).is_err());
    }

    #[test]
    fn test_import_missing_file() {
        assert!(matches!(import_png("does/not/exist.png", 10), Err(ImportError::Image(_))));
    }
}
