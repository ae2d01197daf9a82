//! Color keys: the canonical identity of a palette color
//!
//! Every palette entry is identified by a [`ColorKey`], a normalized uppercase
//! hex string. Input can be any of:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - Functional: `rgb()`, `rgba()`, `hsl()`, `hsla()`, `hwb()`, `oklch()`
//! - Named: `red`, `blue`, `transparent`, etc.
//!
//! Opaque colors normalize to `#RRGGBB`, everything else to `#RRGGBBAA`, so
//! `#f00`, `#FF0000FF` and `red` are all the same key.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Canonical string identity of a color.
///
/// # Examples
///
/// ```
/// use primeimg::color::ColorKey;
///
/// let short: ColorKey = "#f00".parse().unwrap();
/// let named: ColorKey = "red".parse().unwrap();
/// assert_eq!(short, named);
/// assert_eq!(short.as_str(), "#FF0000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorKey(String);

impl ColorKey {
    /// Parse any supported color notation into its canonical key.
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        parse_color(s.trim()).map(Self::from_rgba)
    }

    /// Build the key for an RGBA value.
    pub fn from_rgba(rgba: Rgba<u8>) -> Self {
        let [r, g, b, a] = rgba.0;
        if a == 255 {
            ColorKey(format!("#{:02X}{:02X}{:02X}", r, g, b))
        } else {
            ColorKey(format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a))
        }
    }

    /// The normalized hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the key back to RGBA.
    pub fn to_rgba(&self) -> Rgba<u8> {
        // Keys are only ever built by `from_rgba`, so the hex fast path cannot fail.
        parse_hex_color(&self.0).unwrap_or(Rgba([0, 0, 0, 255]))
    }

    /// Whether the color is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.to_rgba()[3] == 0
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl FromStr for ColorKey {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorKey::parse(s)
    }
}

impl TryFrom<String> for ColorKey {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ColorKey::parse(&s)
    }
}

impl From<ColorKey> for String {
    fn from(key: ColorKey) -> Self {
        key.0
    }
}

/// Parse a CSS color string into an RGBA color.
///
/// Hex strings take a fast path; everything else goes through lightningcss.
///
/// ```
/// use primeimg::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("rgb(0, 255, 0)").unwrap(), image::Rgba([0, 255, 0, 255]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    css_color_to_rgba(css_color)
}

/// Parse a hex color string (#RGB, #RGBA, #RRGGBB, #RRGGBBAA)
fn parse_hex_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let digits = s[1..]
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ColorError::InvalidHex(c)))
        .collect::<Result<Vec<u8>, _>>()?;

    let channels: Vec<u8> = match digits.len() {
        // Short forms double each digit: #F00 -> #FF0000
        3 | 4 => digits.iter().map(|d| d * 17).collect(),
        6 | 8 => digits.chunks(2).map(|pair| pair[0] * 16 + pair[1]).collect(),
        len => return Err(ColorError::InvalidLength(len)),
    };

    let alpha = channels.get(3).copied().unwrap_or(255);
    Ok(Rgba([channels[0], channels[1], channels[2], alpha]))
}

/// Convert a lightningcss CssColor to RGBA
fn css_color_to_rgba(color: CssColor) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let rgb_color = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => {
                let channel = |v: f32| (v * 255.0).round().clamp(0.0, 255.0) as u8;
                Ok(Rgba([channel(rgb.r), channel(rgb.g), channel(rgb.b), channel(rgb.alpha)]))
            }
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

/// Relative luminance (0.0 - 1.0) using the Rec. 709 weights on sRGB values.
///
/// Used to pick a readable digit color on top of a swatch.
pub fn luminance(rgba: Rgba<u8>) -> f64 {
    let [r, g, b, _] = rgba.0;
    (0.2126 * r as f64 + 0.7152 * g as f64 + 0.0722 * b as f64) / 255.0
}
