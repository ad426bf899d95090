//! Exact 8-bit RGB colors
//!
//! [`Color`] is the value exchanged between every stage of the engine:
//! generators emit it, the interpolator samples it, contrast and export
//! read it. Its canonical spelling is lowercase `#rrggbb`.

use std::fmt;
use std::str::FromStr;

use super::srgb::Srgb;
use crate::error::ParseColorError;

/// An exact 8-bit sRGB color.
///
/// Equality is component-wise, which is the same as comparing the hex
/// spellings case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Color {
    /// `#ffffff`
    pub const WHITE: Color = Color::new(255, 255, 255);
    /// `#000000`
    pub const BLACK: Color = Color::new(0, 0, 0);

    /// Create a color from 8-bit channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Canonical lowercase `#rrggbb` spelling.
    ///
    /// # Example
    /// ```
    /// use farbe::Color;
    /// assert_eq!(Color::new(32, 33, 36).to_hex(), "#202124");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{}", self.hex_digits())
    }

    /// The six lowercase hex digits without the leading `#`.
    pub fn hex_digits(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Float view of this color (0.0..=1.0 per channel).
    #[inline]
    pub fn to_srgb(self) -> Srgb {
        Srgb::from(self)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn hex_digit(c: char) -> Result<u8, ParseColorError> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or(ParseColorError::InvalidDigit(c))
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` / `RRGGBB`
    /// - `#RGB` / `RGB` (each digit doubled)
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use farbe::Color;
    ///
    /// let white: Color = "#FFF".parse().unwrap();
    /// assert_eq!(white, Color::WHITE);
    /// assert_eq!("#FFFFFF".parse::<Color>().unwrap(), "ffffff".parse().unwrap());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        let digits = s.chars().map(hex_digit).collect::<Result<Vec<u8>, _>>()?;
        match digits.as_slice() {
            [r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            [r1, r0, g1, g0, b1, b0] => Ok(Self::new(r1 << 4 | r0, g1 << 4 | g0, b1 << 4 | b0)),
            other => Err(ParseColorError::InvalidLength(other.len())),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
