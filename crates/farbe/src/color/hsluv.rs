//! HSLuv and HPLuv
//!
//! Both are CIE LCh(uv) with the chroma rescaled against the sRGB gamut
//! boundary at each lightness. HSLuv uses the boundary at the given hue,
//! so every (h, s, l) is in gamut and `s = 100` is the most saturated
//! color at that hue. HPLuv uses the largest chroma available at every
//! hue, which keeps saturation comparable across hues but loses the
//! most vivid colors.
//!
//! Only the direction into sRGB is needed here: generators place colors
//! in these spaces and read them back as hex.
//!
//! # References
//!
//! Alexei Boronine, "HSLuv" <https://www.hsluv.org/math/>

use super::linear_rgb::LinearRgb;

/// XYZ to linear sRGB, the rows used for the gamut bounds.
const M: [[f64; 3]; 3] = [
    [3.240969941904521, -1.537383177570093, -0.498610760293],
    [-0.96924363628087, 1.87596750150772, 0.041555057407175],
    [0.055630079696993, -0.20397695888897, 1.056971514242878],
];

const REF_U: f64 = 0.19783000664283;
const REF_V: f64 = 0.46831999493879;
const KAPPA: f64 = 903.2962962;
const EPSILON: f64 = 0.0088564516;

/// A boundary line `chroma = slope * x + intercept` in the (u, v) plane.
struct Line {
    slope: f64,
    intercept: f64,
}

fn bounds(l: f64) -> Vec<Line> {
    let sub1 = (l + 16.0).powi(3) / 1_560_896.0;
    let sub2 = if sub1 > EPSILON { sub1 } else { l / KAPPA };

    let mut lines = Vec::with_capacity(6);
    for [m1, m2, m3] in M {
        for t in [0.0, 1.0] {
            let top1 = (284_517.0 * m1 - 94_839.0 * m3) * sub2;
            let top2 = (838_422.0 * m3 + 769_860.0 * m2 + 731_718.0 * m1) * l * sub2
                - 769_860.0 * t * l;
            let bottom = (632_260.0 * m3 - 126_452.0 * m2) * sub2 + 126_452.0 * t;
            lines.push(Line {
                slope: top1 / bottom,
                intercept: top2 / bottom,
            });
        }
    }
    lines
}

fn max_chroma_for_hue(l: f64, h: f64) -> f64 {
    let theta = h.to_radians();
    bounds(l)
        .iter()
        .map(|line| line.intercept / (theta.sin() - line.slope * theta.cos()))
        .filter(|len| *len >= 0.0)
        .fold(f64::MAX, f64::min)
}

fn max_safe_chroma(l: f64) -> f64 {
    bounds(l)
        .iter()
        .map(|line| line.intercept.abs() / (line.slope * line.slope + 1.0).sqrt())
        .fold(f64::MAX, f64::min)
}

/// CIE LCh(uv) with `l` 0..=100, hue in degrees, to linear sRGB.
fn lchuv_to_linear(l: f64, c: f64, h: f64) -> LinearRgb {
    let theta = h.to_radians();
    let u = c * theta.cos();
    let v = c * theta.sin();

    let var_u = u / (13.0 * l) + REF_U;
    let var_v = v / (13.0 * l) + REF_V;
    let y = if l <= 8.0 {
        l / KAPPA
    } else {
        ((l + 16.0) / 116.0).powi(3)
    };
    let x = -(9.0 * y * var_u) / ((var_u - 4.0) * var_v - var_u * var_v);
    let z = (9.0 * y - 15.0 * var_v * y - var_v * x) / (3.0 * var_v);

    let dot = |row: [f64; 3]| row[0] * x + row[1] * y + row[2] * z;
    LinearRgb::new(dot(M[0]), dot(M[1]), dot(M[2]))
}

/// HSLuv with hue in degrees and saturation, lightness 0..=100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsluv {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsluv {
    #[inline]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

impl From<Hsluv> for LinearRgb {
    fn from(hsluv: Hsluv) -> Self {
        let l = hsluv.l.clamp(0.0, 100.0);
        if l > 99.999_999_9 {
            return LinearRgb::new(1.0, 1.0, 1.0);
        }
        if l < 1e-8 {
            return LinearRgb::new(0.0, 0.0, 0.0);
        }
        let c = max_chroma_for_hue(l, hsluv.h) / 100.0 * hsluv.s.clamp(0.0, 100.0);
        lchuv_to_linear(l, c, hsluv.h)
    }
}

/// HPLuv with hue in degrees and saturation, lightness 0..=100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hpluv {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hpluv {
    #[inline]
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }
}

impl From<Hpluv> for LinearRgb {
    fn from(hpluv: Hpluv) -> Self {
        let l = hpluv.l.clamp(0.0, 100.0);
        if l > 99.999_999_9 {
            return LinearRgb::new(1.0, 1.0, 1.0);
        }
        if l < 1e-8 {
            return LinearRgb::new(0.0, 0.0, 0.0);
        }
        let c = max_safe_chroma(l) / 100.0 * hpluv.s.clamp(0.0, 100.0);
        lchuv_to_linear(l, c, hpluv.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, Srgb};

    fn hsluv(h: f64, s: f64, l: f64) -> Color {
        Srgb::from(LinearRgb::from(Hsluv::new(h, s, l))).to_color()
    }

    fn hpluv(h: f64, s: f64, l: f64) -> Color {
        Srgb::from(LinearRgb::from(Hpluv::new(h, s, l))).to_color()
    }

    #[test]
    fn test_hsluv_reference_values() {
        // hsluv.org reference snapshot
        assert_eq!(hsluv(12.177050630061776, 100.0, 53.23711559542933), Color::new(255, 0, 0));
        assert_eq!(hsluv(265.8743202181779, 100.0, 32.30087290398002), Color::new(0, 0, 255));
        assert_eq!(hsluv(0.0, 0.0, 100.0), Color::WHITE);
        assert_eq!(hsluv(0.0, 0.0, 0.0), Color::BLACK);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        for l in [10.0, 35.0, 50.0, 80.0] {
            let color = hsluv(200.0, 0.0, l);
            assert_eq!(color.r, color.g);
            assert_eq!(color.g, color.b);
            assert_eq!(hpluv(200.0, 0.0, l), color);
        }
    }

    #[test]
    fn test_full_saturation_stays_in_gamut() {
        for h in (0..360).step_by(30) {
            for l in [20.0, 50.0, 80.0] {
                let rgb = LinearRgb::from(Hsluv::new(h as f64, 100.0, l));
                for channel in [rgb.r, rgb.g, rgb.b] {
                    assert!(
                        (-1e-6..=1.0 + 1e-6).contains(&channel),
                        "h={h} l={l} channel={channel}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_hpluv_is_less_vivid_than_hsluv() {
        let vivid = Hsluv::new(130.0, 100.0, 60.0);
        let pastel = Hpluv::new(130.0, 100.0, 60.0);
        let spread = |rgb: LinearRgb| rgb.r.max(rgb.g).max(rgb.b) - rgb.r.min(rgb.g).min(rgb.b);
        assert!(spread(LinearRgb::from(pastel)) < spread(LinearRgb::from(vivid)));
    }
}
