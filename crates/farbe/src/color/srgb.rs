//! sRGB float color type
//!
//! sRGB is the gamma-encoded space colors are stored and displayed in.
//! [`Srgb`] is the float working form used while converting between
//! spaces; [`Color`] is the exact 8-bit form.

use super::linear_rgb::LinearRgb;
use super::lut::linear_to_srgb;
use super::rgb::Color;

/// A color in sRGB color space with float channels.
///
/// Values are nominally 0.0..=1.0 but are not clamped, so out-of-gamut
/// results of a conversion survive until [`Srgb::to_color`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel (gamma-encoded)
    pub r: f64,
    /// Green channel (gamma-encoded)
    pub g: f64,
    /// Blue channel (gamma-encoded)
    pub b: f64,
}

impl Srgb {
    /// Create a new Srgb color from float values.
    #[inline]
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Clamp to gamut and round to the nearest 8-bit color.
    ///
    /// # Example
    /// ```
    /// use farbe::{Color, Srgb};
    /// assert_eq!(Srgb::new(1.2, 0.5, -0.1).to_color(), Color::new(255, 128, 0));
    /// ```
    #[inline]
    pub fn to_color(self) -> Color {
        Color::new(channel_to_u8(self.r), channel_to_u8(self.g), channel_to_u8(self.b))
    }

    /// Largest and smallest channel.
    #[inline]
    pub(crate) fn max_min(self) -> (f64, f64) {
        (
            self.r.max(self.g).max(self.b),
            self.r.min(self.g).min(self.b),
        )
    }
}

fn channel_to_u8(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

impl From<Color> for Srgb {
    #[inline]
    fn from(color: Color) -> Self {
        Self {
            r: color.r as f64 / 255.0,
            g: color.g as f64 / 255.0,
            b: color.b as f64 / 255.0,
        }
    }
}

impl From<LinearRgb> for Srgb {
    /// Gamma-encode linear light.
    fn from(linear: LinearRgb) -> Self {
        Self {
            r: linear_to_srgb(linear.r),
            g: linear_to_srgb(linear.g),
            b: linear_to_srgb(linear.b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// u8 -> Srgb -> LinearRgb -> Srgb -> u8 is exact for all 256 values.
    #[test]
    fn test_srgb_round_trip_exact() {
        for i in 0..=255u8 {
            let original = Color::new(i, i, i);
            let linear = LinearRgb::from(original);
            let back = Srgb::from(linear).to_color();
            assert_eq!(back, original, "round-trip changed value {i}");
        }
    }

    #[test]
    fn test_to_color_clamps_and_rounds() {
        assert_eq!(Srgb::new(0.0, 0.0, 0.0).to_color(), Color::BLACK);
        assert_eq!(Srgb::new(1.0, 1.0, 1.0).to_color(), Color::WHITE);
        assert_eq!(Srgb::new(2.0, -1.0, 0.5).to_color(), Color::new(255, 0, 128));
        assert_eq!(Srgb::new(f64::NAN, 0.0, 0.0).to_color(), Color::BLACK);
    }

    #[test]
    fn test_known_gamma_values() {
        // Exact: ((0.5 + 0.055) / 1.055)^2.4 = 0.214041...
        let linear = LinearRgb::from(Srgb::new(0.5, 0.5, 0.5));
        assert!((linear.r - 0.214041).abs() < 1e-6);

        // Exact: 1.055 * 0.5^(1/2.4) - 0.055 = 0.735356...
        let srgb = Srgb::from(LinearRgb::new(0.5, 0.5, 0.5));
        assert!((srgb.r - 0.735356).abs() < 1e-6);
    }
}
