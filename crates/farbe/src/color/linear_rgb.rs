//! Linear RGB color type
//!
//! Linear RGB is the color space where light addition is physically accurate.
//! Luminance, channel blending and subtractive mixing are computed here.

use super::lut::{srgb8_to_linear, srgb_to_linear};
use super::rgb::Color;
use super::srgb::Srgb;

/// A color in linear RGB color space.
///
/// Values represent light intensity proportional to physical light power.
/// They are typically in the range 0.0..=1.0, but may exceed it for
/// intermediate, out-of-gamut results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f64,
    /// Green channel (linear light intensity)
    pub g: f64,
    /// Blue channel (linear light intensity)
    pub b: f64,
}

impl LinearRgb {
    /// Create a new LinearRgb color from linear RGB values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Relative luminance Y (Rec. 709 / sRGB primaries, D65).
    #[inline]
    pub fn luminance(self) -> f64 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

impl From<Srgb> for LinearRgb {
    /// Gamma-decode with the exact IEC 61966-2-1 formula.
    fn from(srgb: Srgb) -> Self {
        Self {
            r: srgb_to_linear(srgb.r),
            g: srgb_to_linear(srgb.g),
            b: srgb_to_linear(srgb.b),
        }
    }
}

impl From<Color> for LinearRgb {
    /// Gamma-decode through the 8-bit lookup table.
    fn from(color: Color) -> Self {
        Self {
            r: srgb8_to_linear(color.r),
            g: srgb8_to_linear(color.g),
            b: srgb8_to_linear(color.b),
        }
    }
}
