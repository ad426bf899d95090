//! Oklab perceptual color space and its polar form Oklch
//!
//! # References
//!
//! Björn Ottosson, "A perceptual color space for image processing"
//! <https://bottosson.github.io/posts/oklab/>

use super::linear_rgb::LinearRgb;
use super::polar::{from_polar, to_polar};

/// A color in Oklab perceptual color space.
///
/// # Components
///
/// - `l`: Lightness (0.0 = black, 1.0 = white for in-gamut colors)
/// - `a`: Green-red axis (negative = green, positive = red)
/// - `b`: Blue-yellow axis (negative = blue, positive = yellow)
///
/// Values are not clamped; interpolation may pass through out-of-gamut
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    /// Lightness: 0.0 (black) to 1.0 (white) for in-gamut colors
    pub l: f64,
    /// Green-red axis: typically -0.5 to 0.5
    pub a: f64,
    /// Blue-yellow axis: typically -0.5 to 0.5
    pub b: f64,
}

impl Oklab {
    /// Create a new Oklab color.
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

impl From<LinearRgb> for Oklab {
    /// Convert from linear RGB to Oklab.
    ///
    /// Uses the updated 2021-01-25 matrices from Björn Ottosson.
    fn from(rgb: LinearRgb) -> Self {
        // Step 1: Linear sRGB to LMS (M1 matrix)
        let l = 0.4122214708 * rgb.r + 0.5363325363 * rgb.g + 0.0514459929 * rgb.b;
        let m = 0.2119034982 * rgb.r + 0.6806995451 * rgb.g + 0.1073969566 * rgb.b;
        let s = 0.0883024619 * rgb.r + 0.2817188376 * rgb.g + 0.6299787005 * rgb.b;

        // Step 2: Cube root (nonlinearity)
        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        // Step 3: LMS to Lab (M2 matrix)
        Oklab {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }
}

impl From<Oklab> for LinearRgb {
    /// Convert from Oklab to linear RGB. The result is not clamped.
    fn from(lab: Oklab) -> Self {
        let l_ = lab.l + 0.3963377774 * lab.a + 0.2158037573 * lab.b;
        let m_ = lab.l - 0.1055613458 * lab.a - 0.0638541728 * lab.b;
        let s_ = lab.l - 0.0894841775 * lab.a - 1.2914855480 * lab.b;

        let l = l_ * l_ * l_;
        let m = m_ * m_ * m_;
        let s = s_ * s_ * s_;

        LinearRgb {
            r: 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
            g: -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
            b: -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
        }
    }
}

/// Oklch: polar form of Oklab (Lightness, Chroma, Hue).
///
/// - `l`: Lightness (same as Oklab L)
/// - `c`: Chroma, `sqrt(a^2 + b^2)`; 0.0 is achromatic
/// - `h`: Hue angle in degrees, 0.0..360.0
///
/// For achromatic colors the hue is undefined and set to 0.0; check
/// `c` before relying on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    /// Lightness: 0.0 (black) to 1.0 (white) for in-gamut colors
    pub l: f64,
    /// Chroma: distance from neutral axis (0.0 = gray)
    pub c: f64,
    /// Hue: angle in degrees
    pub h: f64,
}

impl Oklch {
    /// Create a new Oklch color.
    #[inline]
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

impl From<Oklab> for Oklch {
    fn from(lab: Oklab) -> Self {
        let (c, h) = to_polar(lab.a, lab.b);
        Self { l: lab.l, c, h }
    }
}

impl From<Oklch> for Oklab {
    fn from(lch: Oklch) -> Self {
        let (a, b) = from_polar(lch.c, lch.h);
        Self { l: lch.l, a, b }
    }
}
