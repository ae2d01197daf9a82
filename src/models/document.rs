//! Prime image documents: the on-disk form of one image's editing state.
//!
//! ```json
//! {
//!   "palette": ["#FF0000", "#00FF00"],
//!   "pixels": [[0, 1], [1, 0]],
//!   "digits": {"#00FF00": 7, "#FF0000": 3}
//! }
//! ```
//!
//! Input is parsed as JSON5, so comments and trailing commas are fine.
//! Colors in `palette` and `digits` may use any notation [`ColorKey`]
//! accepts; they are written back normalized.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use super::error::ModelError;
use super::grid::PixelGrid;
use super::palette::Palette;
use crate::color::ColorKey;
use crate::mapping::{Digit, DigitMapping, MappingError};
use crate::session::{DigitEditor, EditError};

/// Document loading/saving failure
#[derive(Debug, Error)]
pub enum DocumentError {
    /// File I/O error
    #[error("failed to access document: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON5 or wrong shape
    #[error("failed to parse document: {0}")]
    Parse(#[from] json5::Error),
    /// JSON output error
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Palette or pixel grid is invalid
    #[error("invalid image data: {0}")]
    Model(#[from] ModelError),
    /// Digit assignment names a color outside the palette
    #[error("invalid digits: {0}")]
    Mapping(#[from] MappingError),
    /// Parts don't fit together
    #[error("inconsistent document: {0}")]
    Edit(#[from] EditError),
}

/// Serialized palette, pixel indexes, and digit assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimeImageDocument {
    /// Distinct colors in first-occurrence order
    pub palette: Vec<ColorKey>,
    /// Row-major palette indexes
    pub pixels: Vec<Vec<usize>>,
    /// Committed digits; unassigned colors are omitted
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "deserialize_digits"
    )]
    pub digits: BTreeMap<ColorKey, Digit>,
}

/// Digit map whose keys must stay distinct after color normalization.
fn deserialize_digits<'de, D>(deserializer: D) -> Result<BTreeMap<ColorKey, Digit>, D::Error>
where
    D: Deserializer<'de>,
{
    struct DigitsVisitor;

    impl<'de> Visitor<'de> for DigitsVisitor {
        type Value = BTreeMap<ColorKey, Digit>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a map from color to digit")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut digits = BTreeMap::new();
            while let Some((raw, digit)) = map.next_entry::<String, Digit>()? {
                let color = ColorKey::parse(&raw).map_err(de::Error::custom)?;
                if digits.contains_key(&color) {
                    return Err(de::Error::custom(format!(
                        "digits key '{}' repeats color {}",
                        raw, color
                    )));
                }
                digits.insert(color, digit);
            }
            Ok(digits)
        }
    }

    deserializer.deserialize_map(DigitsVisitor)
}

impl PrimeImageDocument {
    /// Parse JSON5 text
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        Ok(json5::from_str(text)?)
    }

    /// Read and parse a document file
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = fs::read_to_string(path)?;
        let document = Self::from_json(&text)?;
        debug!(path = %path.display(), colors = document.palette.len(), "document loaded");
        Ok(document)
    }

    /// Pretty JSON, trailing newline included
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn save(&self, path: &Path) -> Result<(), DocumentError> {
        fs::write(path, self.to_json_pretty()?)?;
        info!(path = %path.display(), "document written");
        Ok(())
    }

    /// Validate and split into palette, grid and mapping
    pub fn into_parts(self) -> Result<(Palette, PixelGrid, DigitMapping), DocumentError> {
        let palette = Palette::new(self.palette)?;
        let grid = PixelGrid::new(self.pixels, &palette)?;
        let mapping = DigitMapping::with_assignments(&palette, self.digits)?;
        Ok((palette, grid, mapping))
    }

    /// Build an editor for this document
    pub fn into_editor(self) -> Result<DigitEditor, DocumentError> {
        let (palette, grid, mapping) = self.into_parts()?;
        Ok(DigitEditor::new(palette, grid, mapping)?)
    }

    /// Snapshot an editor's committed state
    pub fn from_editor(editor: &DigitEditor) -> Self {
        Self::from_parts(editor.palette(), editor.grid(), editor.mapping())
    }

    pub fn from_parts(palette: &Palette, grid: &PixelGrid, mapping: &DigitMapping) -> Self {
        Self {
            palette: palette.colors().to_vec(),
            pixels: grid.to_rows(),
            digits: mapping.assignments(palette).into_iter().map(|(c, d)| (c.clone(), d)).collect(),
        }
    }
}
