//! Cylindrical transforms of sRGB: HSL, HSV, HSI and HCG
//!
//! These are reshapings of the sRGB cube, not perceptual spaces. Hue is
//! in degrees 0.0..360.0; the other components are 0.0..=1.0. The hue of
//! an achromatic color is 0.0.
//!
//! [`Cmyk`] lives here as well since it is the same kind of naive
//! reshaping and is only used for display.

use std::f64::consts::PI;

use super::polar::normalize_hue;
use super::srgb::Srgb;

/// RGB hexcone hue in degrees; 0.0 when `max == min`.
fn hexcone_hue(rgb: Srgb, max: f64, min: f64) -> f64 {
    let delta = max - min;
    if delta <= 0.0 {
        return 0.0;
    }
    let h = if max == rgb.r {
        (rgb.g - rgb.b) / delta
    } else if max == rgb.g {
        (rgb.b - rgb.r) / delta + 2.0
    } else {
        (rgb.r - rgb.g) / delta + 4.0
    };
    normalize_hue(h * 60.0)
}

/// Map (hue sector, chroma, offset) back to RGB, shared by HSL, HSV and HCG.
fn from_hue_chroma(h: f64, chroma: f64, m: f64) -> Srgb {
    let h = normalize_hue(h) / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    Srgb::new(r + m, g + m, b + m)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[inline]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

impl From<Srgb> for Hsl {
    fn from(rgb: Srgb) -> Self {
        let (max, min) = rgb.max_min();
        let l = (max + min) / 2.0;
        let delta = max - min;
        let s = if delta <= 0.0 {
            0.0
        } else if l < 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };
        Self {
            h: hexcone_hue(rgb, max, min),
            s,
            l,
        }
    }
}

impl From<Hsl> for Srgb {
    fn from(hsl: Hsl) -> Self {
        let s = hsl.s.clamp(0.0, 1.0);
        let l = hsl.l.clamp(0.0, 1.0);
        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        from_hue_chroma(hsl.h, chroma, l - chroma / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    #[inline]
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }
}

impl From<Srgb> for Hsv {
    fn from(rgb: Srgb) -> Self {
        let (max, min) = rgb.max_min();
        let s = if max <= 0.0 { 0.0 } else { (max - min) / max };
        Self {
            h: hexcone_hue(rgb, max, min),
            s,
            v: max,
        }
    }
}

impl From<Hsv> for Srgb {
    fn from(hsv: Hsv) -> Self {
        let v = hsv.v.clamp(0.0, 1.0);
        let chroma = v * hsv.s.clamp(0.0, 1.0);
        from_hue_chroma(hsv.h, chroma, v - chroma)
    }
}

/// Hue, chroma, grayness.
///
/// `g` is the gray the color is mixed with: for `c < 1` the color is
/// `pure_hue * c + g * (1 - c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hcg {
    pub h: f64,
    pub c: f64,
    pub g: f64,
}

impl Hcg {
    #[inline]
    pub fn new(h: f64, c: f64, g: f64) -> Self {
        Self { h, c, g }
    }
}

impl From<Srgb> for Hcg {
    fn from(rgb: Srgb) -> Self {
        let (max, min) = rgb.max_min();
        let c = max - min;
        let g = if c < 1.0 { min / (1.0 - c) } else { 0.0 };
        Self {
            h: hexcone_hue(rgb, max, min),
            c,
            g,
        }
    }
}

impl From<Hcg> for Srgb {
    fn from(hcg: Hcg) -> Self {
        let c = hcg.c.clamp(0.0, 1.0);
        let g = hcg.g.clamp(0.0, 1.0);
        from_hue_chroma(hcg.h, c, g * (1.0 - c))
    }
}

/// Hue, saturation, intensity, where intensity is the channel mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsi {
    pub h: f64,
    pub s: f64,
    pub i: f64,
}

impl Hsi {
    #[inline]
    pub fn new(h: f64, s: f64, i: f64) -> Self {
        Self { h, s, i }
    }
}

impl From<Srgb> for Hsi {
    fn from(rgb: Srgb) -> Self {
        let (r, g, b) = (rgb.r, rgb.g, rgb.b);
        let (_, min) = rgb.max_min();
        let i = (r + g + b) / 3.0;
        let s = if i > 0.0 { 1.0 - min / i } else { 0.0 };

        let denom = ((r - g) * (r - g) + (r - b) * (g - b)).sqrt();
        let h = if s <= 0.0 || denom <= 0.0 {
            0.0
        } else {
            let cos = (((r - g) + (r - b)) / 2.0 / denom).clamp(-1.0, 1.0);
            let theta = cos.acos();
            if b > g {
                2.0 * PI - theta
            } else {
                theta
            }
        };
        Self {
            h: normalize_hue(h.to_degrees()),
            s,
            i,
        }
    }
}

impl From<Hsi> for Srgb {
    fn from(hsi: Hsi) -> Self {
        let s = hsi.s.clamp(0.0, 1.0);
        let i = hsi.i.clamp(0.0, 1.0);
        // fraction of a turn, sector-local
        let mut h = normalize_hue(hsi.h) / 360.0;
        let side = |h: f64| (1.0 + s * (2.0 * PI * h).cos() / (PI / 3.0 - 2.0 * PI * h).cos()) / 3.0;

        let (r, g, b) = if h < 1.0 / 3.0 {
            let b0 = (1.0 - s) / 3.0;
            let r0 = side(h);
            (r0, 1.0 - (b0 + r0), b0)
        } else if h < 2.0 / 3.0 {
            h -= 1.0 / 3.0;
            let r0 = (1.0 - s) / 3.0;
            let g0 = side(h);
            (r0, g0, 1.0 - (r0 + g0))
        } else {
            h -= 2.0 / 3.0;
            let g0 = (1.0 - s) / 3.0;
            let b0 = side(h);
            (1.0 - (g0 + b0), g0, b0)
        };

        Srgb::new(
            (3.0 * i * r).clamp(0.0, 1.0),
            (3.0 * i * g).clamp(0.0, 1.0),
            (3.0 * i * b).clamp(0.0, 1.0),
        )
    }
}

/// Naive device CMYK; every component is 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl From<Srgb> for Cmyk {
    fn from(rgb: Srgb) -> Self {
        let (max, _) = rgb.max_min();
        let k = 1.0 - max.clamp(0.0, 1.0);
        if k >= 1.0 {
            return Self { c: 0.0, m: 0.0, y: 0.0, k: 1.0 };
        }
        Self {
            c: (1.0 - rgb.r - k) / (1.0 - k),
            m: (1.0 - rgb.g - k) / (1.0 - k),
            y: (1.0 - rgb.b - k) / (1.0 - k),
            k,
        }
    }
}
