//! Color values and `#rrggbb` text interchange
//!
//! Colors carry three 8-bit channels and no alpha. Pure black is the
//! reserved "empty" value: a black pixel in a layer is transparent when
//! layers are composited.

use std::fmt;

use image::Rgba;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Error type for strict hex color parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Wrong number of hex digits (must be exactly 6 after the optional '#')
    #[error("invalid color length {0}, expected 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// An RGB color.
///
/// `(0, 0, 0)` is the empty sentinel, see [`Color::EMPTY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    #[serde(deserialize_with = "clamped_channel")]
    pub r: u8,
    #[serde(deserialize_with = "clamped_channel")]
    pub g: u8,
    #[serde(deserialize_with = "clamped_channel")]
    pub b: u8,
}

impl Color {
    /// The empty/transparent sentinel.
    pub const EMPTY: Color = Color::rgb(0, 0, 0);

    /// Default drawing color of a fresh editor session.
    pub const PURPLE: Color = Color::rgb(147, 51, 234);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Whether this color is the empty sentinel.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Format as lowercase `#rrggbb`.
    ///
    /// ```
    /// use lightmoji::color::Color;
    ///
    /// assert_eq!(Color::rgb(147, 51, 234).to_hex(), "#9333ea");
    /// assert_eq!(Color::rgb(0, 10, 255).to_hex(), "#000aff");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Decode `#rrggbb` (the `#` is optional, digits are case-insensitive).
    ///
    /// Anything that is not exactly three hex pairs decodes to black, which is
    /// also the empty sentinel. Use [`parse_hex`] when malformed input must be
    /// reported instead.
    ///
    /// ```
    /// use lightmoji::color::Color;
    ///
    /// assert_eq!(Color::from_hex("#FF8000"), Color::rgb(255, 128, 0));
    /// assert_eq!(Color::from_hex("ff8000"), Color::rgb(255, 128, 0));
    /// assert_eq!(Color::from_hex("#f80"), Color::EMPTY);
    /// ```
    pub fn from_hex(s: &str) -> Self {
        parse_hex(s).unwrap_or(Self::EMPTY)
    }

    /// Convert to an opaque RGBA pixel.
    pub fn to_rgba(&self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Strictly parse a `#rrggbb` or `rrggbb` string.
///
/// # Errors
///
/// Returns `ColorError` if the input is empty, not six digits long, or
/// contains a non-hex character.
pub fn parse_hex(s: &str) -> Result<Color, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    let hex = s.strip_prefix('#').unwrap_or(s);

    // Validate all characters are hex
    for c in hex.chars() {
        if !c.is_ascii_hexdigit() {
            return Err(ColorError::InvalidHex(c));
        }
    }

    if hex.len() != 6 {
        return Err(ColorError::InvalidLength(hex.len()));
    }

    let r = parse_hex_pair(&hex[0..2])?;
    let g = parse_hex_pair(&hex[2..4])?;
    let b = parse_hex_pair(&hex[4..6])?;
    Ok(Color::rgb(r, g, b))
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

/// Parse a two-character hex string to u8 (0-255)
fn parse_hex_pair(s: &str) -> Result<u8, ColorError> {
    let mut chars = s.chars();
    let high = chars.next().ok_or(ColorError::InvalidLength(s.len()))?;
    let low = chars.next().ok_or(ColorError::InvalidLength(s.len()))?;
    Ok(parse_hex_digit(high)? * 16 + parse_hex_digit(low)?)
}

/// Stored records may carry channel values outside 0-255; clamp them.
fn clamped_channel<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.round().clamp(0.0, 255.0) as u8)
}
