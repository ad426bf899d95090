//! Palette interpolation
//!
//! [`PaletteInterpolator`] turns seed colors into the final palette in
//! two stages:
//!
//! 1. **Waypoints.** For the `spectral` model with fewer seeds than
//!    requested colors, the seeds are first stretched by paint-like
//!    mixing ([`spectral_waypoints`]). Otherwise the seeds are the
//!    waypoints.
//! 2. **Sampling.** A [`Scale`] maps `t` in `[0, 1]` through the
//!    waypoints in the model's color space, the domain is shrunk by the
//!    padding on both sides, and `amount` evenly spaced samples are taken
//!    including both padded ends. `spectral` samples in CIE LCh.
//!
//! Both stages are pure: equal inputs give bit-identical palettes.

use std::fmt;
use std::str::FromStr;

use crate::color::{Color, Hsi, Hsl, Hsv, Lab, Lch, LinearRgb, Oklab, Oklch, Srgb};
use crate::error::ParseNameError;
use crate::spectral::spectral_waypoints;

/// Seeds used when a generator produced none.
pub const FALLBACK_SEEDS: [Color; 2] = [Color::new(0x20, 0x21, 0x24), Color::WHITE];

/// Largest padding applied to each end of the domain.
pub const MAX_PADDING: f64 = 0.5;

/// The color space a palette is interpolated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InterpolationModel {
    #[default]
    Lab,
    Oklab,
    /// Paint-like mixing for the waypoints, CIE LCh for sampling.
    Spectral,
    /// Gamma-encoded sRGB.
    Rgb,
    /// Linear-light RGB.
    Lrgb,
    /// CIE LCh.
    Hcl,
    Hsl,
    Hsv,
    Hsi,
    Oklch,
}

impl InterpolationModel {
    pub const ALL: [InterpolationModel; 10] = [
        InterpolationModel::Lab,
        InterpolationModel::Oklab,
        InterpolationModel::Spectral,
        InterpolationModel::Rgb,
        InterpolationModel::Lrgb,
        InterpolationModel::Hcl,
        InterpolationModel::Hsl,
        InterpolationModel::Hsv,
        InterpolationModel::Hsi,
        InterpolationModel::Oklch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InterpolationModel::Lab => "lab",
            InterpolationModel::Oklab => "oklab",
            InterpolationModel::Spectral => "spectral",
            InterpolationModel::Rgb => "rgb",
            InterpolationModel::Lrgb => "lrgb",
            InterpolationModel::Hcl => "hcl",
            InterpolationModel::Hsl => "hsl",
            InterpolationModel::Hsv => "hsv",
            InterpolationModel::Hsi => "hsi",
            InterpolationModel::Oklch => "oklch",
        }
    }

    /// The space the sampling stage runs in.
    fn sampling_space(self) -> Space {
        match self {
            InterpolationModel::Lab => Space::Lab,
            InterpolationModel::Oklab => Space::Oklab,
            InterpolationModel::Spectral | InterpolationModel::Hcl => Space::Lch,
            InterpolationModel::Rgb => Space::Rgb,
            InterpolationModel::Lrgb => Space::Lrgb,
            InterpolationModel::Hsl => Space::Hsl,
            InterpolationModel::Hsv => Space::Hsv,
            InterpolationModel::Hsi => Space::Hsi,
            InterpolationModel::Oklch => Space::Oklch,
        }
    }
}

impl fmt::Display for InterpolationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterpolationModel {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseNameError::new("interpolation model", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Space {
    Lab,
    Oklab,
    Lch,
    Rgb,
    Lrgb,
    Hsl,
    Hsv,
    Hsi,
    Oklch,
}

/// Samples this close to a waypoint return the waypoint itself.
const SNAP: f64 = 1e-9;

impl Space {
    /// `(hue index, chroma index, achromatic threshold)` for the polar
    /// spaces. Below the threshold a color's hue is ignored; the CIE
    /// thresholds absorb the matrix error that leaves grays with a tiny
    /// nonzero chroma.
    fn polar_channels(self) -> Option<(usize, usize, f64)> {
        match self {
            Space::Lch => Some((2, 1, 1e-2)),
            Space::Oklch => Some((2, 1, 1e-4)),
            Space::Hsl | Space::Hsv | Space::Hsi => Some((0, 1, 1e-6)),
            _ => None,
        }
    }

    fn to_coords(self, color: Color) -> [f64; 3] {
        let srgb = Srgb::from(color);
        match self {
            Space::Rgb => [srgb.r, srgb.g, srgb.b],
            Space::Lrgb => {
                let l = LinearRgb::from(color);
                [l.r, l.g, l.b]
            }
            Space::Lab => {
                let lab = Lab::from(LinearRgb::from(color));
                [lab.l, lab.a, lab.b]
            }
            Space::Lch => {
                let lch = Lch::from(Lab::from(LinearRgb::from(color)));
                [lch.l, lch.c, lch.h]
            }
            Space::Oklab => {
                let lab = Oklab::from(LinearRgb::from(color));
                [lab.l, lab.a, lab.b]
            }
            Space::Oklch => {
                let lch = Oklch::from(Oklab::from(LinearRgb::from(color)));
                [lch.l, lch.c, lch.h]
            }
            Space::Hsl => {
                let hsl = Hsl::from(srgb);
                [hsl.h, hsl.s, hsl.l]
            }
            Space::Hsv => {
                let hsv = Hsv::from(srgb);
                [hsv.h, hsv.s, hsv.v]
            }
            Space::Hsi => {
                let hsi = Hsi::from(srgb);
                [hsi.h, hsi.s, hsi.i]
            }
        }
    }

    fn to_color(self, [x, y, z]: [f64; 3]) -> Color {
        let srgb = match self {
            Space::Rgb => Srgb::new(x, y, z),
            Space::Lrgb => Srgb::from(LinearRgb::new(x, y, z)),
            Space::Lab => Srgb::from(LinearRgb::from(Lab::new(x, y, z))),
            Space::Lch => Srgb::from(LinearRgb::from(Lab::from(Lch::new(x, y, z)))),
            Space::Oklab => Srgb::from(LinearRgb::from(Oklab::new(x, y, z))),
            Space::Oklch => Srgb::from(LinearRgb::from(Oklab::from(Oklch::new(x, y, z)))),
            Space::Hsl => Srgb::from(Hsl::new(x, y, z)),
            Space::Hsv => Srgb::from(Hsv::new(x, y, z)),
            Space::Hsi => Srgb::from(Hsi::new(x, y, z)),
        };
        srgb.to_color()
    }

    fn mix(self, a: [f64; 3], b: [f64; 3], t: f64) -> [f64; 3] {
        let lerp = |x: f64, y: f64| x + (y - x) * t;
        let mut out = [lerp(a[0], b[0]), lerp(a[1], b[1]), lerp(a[2], b[2])];

        if let Some((hue, chroma, threshold)) = self.polar_channels() {
            let a_gray = a[chroma] < threshold;
            let b_gray = b[chroma] < threshold;
            out[hue] = match (a_gray, b_gray) {
                (true, true) => a[hue],
                (true, false) => b[hue],
                (false, true) => a[hue],
                (false, false) => {
                    // shortest arc
                    let mut delta = b[hue] - a[hue];
                    if delta > 180.0 {
                        delta -= 360.0;
                    } else if delta < -180.0 {
                        delta += 360.0;
                    }
                    a[hue] + delta * t
                }
            };
        }
        out
    }
}

/// A continuous map from `[0, 1]` through a list of waypoints.
///
/// # Example
///
/// ```
/// use farbe::{Color, InterpolationModel, Scale};
///
/// let scale = Scale::new(&[Color::BLACK, Color::WHITE], InterpolationModel::Rgb);
/// assert_eq!(scale.at(0.0), Color::BLACK);
/// assert_eq!(scale.at(0.5), Color::new(128, 128, 128));
/// assert_eq!(scale.colors(3).len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Scale {
    space: Space,
    waypoints: Vec<Color>,
    coords: Vec<[f64; 3]>,
    padding: f64,
}

impl Scale {
    pub fn new(waypoints: &[Color], model: InterpolationModel) -> Self {
        let space = model.sampling_space();
        Self {
            space,
            waypoints: waypoints.to_vec(),
            coords: waypoints.iter().map(|&c| space.to_coords(c)).collect(),
            padding: 0.0,
        }
    }

    /// Shrink the domain by `padding` on both ends, clamped to
    /// `0.0..=0.5`.
    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = if padding.is_nan() {
            0.0
        } else {
            padding.clamp(0.0, MAX_PADDING)
        };
        self
    }

    /// The color at `t` in `[0, 1]`, padding applied.
    ///
    /// Returns black for a scale without waypoints.
    pub fn at(&self, t: f64) -> Color {
        let t = self.padding + t * (1.0 - 2.0 * self.padding);
        self.at_unpadded(t)
    }

    fn at_unpadded(&self, t: f64) -> Color {
        let (first, last) = match (self.waypoints.first(), self.waypoints.last()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Color::BLACK,
        };
        if t.is_nan() || t <= 0.0 || self.waypoints.len() == 1 {
            return first;
        }
        if t >= 1.0 {
            return last;
        }

        let segments = self.waypoints.len() - 1;
        let position = t * segments as f64;
        let index = (position.floor() as usize).min(segments - 1);
        let local = position - index as f64;
        if local < SNAP {
            return self.waypoints[index];
        }
        if local > 1.0 - SNAP {
            return self.waypoints[index + 1];
        }
        let mixed = self.space.mix(self.coords[index], self.coords[index + 1], local);
        self.space.to_color(mixed)
    }

    /// `n` evenly spaced samples including both ends; a single sample is
    /// taken at the middle.
    pub fn colors(&self, n: usize) -> Vec<Color> {
        match n {
            0 => Vec::new(),
            1 => vec![self.at(0.5)],
            _ => (0..n)
                .map(|i| self.at(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}

/// Inputs of the interpolator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterpolationOptions {
    pub amount: usize,
    pub padding: f64,
    pub model: InterpolationModel,
}

impl Default for InterpolationOptions {
    fn default() -> Self {
        Self {
            amount: 6,
            padding: 0.175,
            model: InterpolationModel::Lab,
        }
    }
}

/// Seed colors in, palette out.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteInterpolator {
    options: InterpolationOptions,
}

impl PaletteInterpolator {
    pub fn new(options: InterpolationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &InterpolationOptions {
        &self.options
    }

    /// The waypoint stage alone.
    pub fn waypoints(&self, seeds: &[Color]) -> Vec<Color> {
        let seeds = if seeds.is_empty() { &FALLBACK_SEEDS[..] } else { seeds };
        if self.options.model == InterpolationModel::Spectral && seeds.len() < self.options.amount {
            spectral_waypoints(seeds, self.options.amount)
        } else {
            seeds.to_vec()
        }
    }

    /// Exactly `amount` colors.
    pub fn interpolate(&self, seeds: &[Color]) -> Vec<Color> {
        let waypoints = self.waypoints(seeds);
        Scale::new(&waypoints, self.options.model)
            .padding(self.options.padding)
            .colors(self.options.amount)
    }
}

/// Shorthand for [`PaletteInterpolator::interpolate`].
pub fn interpolate_palette(seeds: &[Color], options: InterpolationOptions) -> Vec<Color> {
    PaletteInterpolator::new(options).interpolate(seeds)
}
