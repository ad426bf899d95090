//! CIE L\*a\*b\* and its polar form LCh (a.k.a. HCL)
//!
//! Reference white is D65 (Xn = 0.95047, Yn = 1.0, Zn = 1.08883), the
//! white point of sRGB, so no chromatic adaptation is needed.

use super::linear_rgb::LinearRgb;
use super::polar::{from_polar, to_polar};

const XN: f64 = 0.950_47;
const YN: f64 = 1.0;
const ZN: f64 = 1.088_83;

// CIE constants in their exact rational form
const T0: f64 = 4.0 / 29.0;
const T1: f64 = 6.0 / 29.0;
const T2: f64 = 3.0 * T1 * T1;
const T3: f64 = T1 * T1 * T1;

fn xyz_to_lab_f(t: f64) -> f64 {
    if t > T3 {
        t.cbrt()
    } else {
        t / T2 + T0
    }
}

fn lab_to_xyz_f(t: f64) -> f64 {
    if t > T1 {
        t * t * t
    } else {
        T2 * (t - T0)
    }
}

/// A color in CIE L\*a\*b\* space.
///
/// `l` runs 0..=100; `a` and `b` are unbounded but stay within about
/// ±128 for sRGB colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    #[inline]
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

impl From<LinearRgb> for Lab {
    fn from(rgb: LinearRgb) -> Self {
        let x = xyz_to_lab_f((0.4124564 * rgb.r + 0.3575761 * rgb.g + 0.1804375 * rgb.b) / XN);
        let y = xyz_to_lab_f((0.2126729 * rgb.r + 0.7151522 * rgb.g + 0.0721750 * rgb.b) / YN);
        let z = xyz_to_lab_f((0.0193339 * rgb.r + 0.1191920 * rgb.g + 0.9503041 * rgb.b) / ZN);

        Lab {
            l: (116.0 * y - 16.0).max(0.0),
            a: 500.0 * (x - y),
            b: 200.0 * (y - z),
        }
    }
}

impl From<Lab> for LinearRgb {
    fn from(lab: Lab) -> Self {
        let fy = (lab.l + 16.0) / 116.0;
        let fx = fy + lab.a / 500.0;
        let fz = fy - lab.b / 200.0;

        let x = XN * lab_to_xyz_f(fx);
        let y = YN * lab_to_xyz_f(fy);
        let z = ZN * lab_to_xyz_f(fz);

        LinearRgb {
            r: 3.2404542 * x - 1.5371385 * y - 0.4985314 * z,
            g: -0.9692660 * x + 1.8760108 * y + 0.0415560 * z,
            b: 0.0556434 * x - 0.2040259 * y + 1.0572252 * z,
        }
    }
}

/// CIE LCh(ab): lightness, chroma, hue in degrees.
///
/// This is the space called `hcl` and `lch` in palette settings. The hue
/// of an achromatic color is 0.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Lch {
    #[inline]
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

impl From<Lab> for Lch {
    fn from(lab: Lab) -> Self {
        let (c, h) = to_polar(lab.a, lab.b);
        Self { l: lab.l, c, h }
    }
}

impl From<Lch> for Lab {
    fn from(lch: Lch) -> Self {
        let (a, b) = from_polar(lch.c, lch.h);
        Self { l: lch.l, a, b }
    }
}
