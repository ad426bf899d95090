//! Seed-color generators
//!
//! A generator turns a [`SeededRandom`] into the handful of "seed" colors
//! that the interpolator later stretches into a palette. Every generator
//! draws only from the stream it is given, so a seed string and a set of
//! [`GeneratorOptions`] always produce the same colors.
//!
//! Generators place colors as (hue in degrees, saturation 0..=1,
//! lightness 0..=1) and a [`ColorMode`] decides which space those
//! coordinates are read in. RandomColor.js is the exception: it works in
//! HSV, like the library it is modelled on.

use std::fmt;
use std::str::FromStr;

use crate::color::{
    normalize_hue, Color, Hcg, Hpluv, Hsl, Hsluv, Hsv, Lab, Lch, LinearRgb, Oklab, Oklch, Srgb,
};
use crate::error::ParseNameError;
use crate::noise::SimplexNoise;
use crate::random::SeededRandom;

/// Which algorithm produces the seed colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneratorFunction {
    #[cfg_attr(feature = "serde", serde(rename = "Hue Bingo"))]
    HueBingo,
    #[default]
    Legacy,
    /// Colors come from an image instead of the random stream.
    ImageExtract,
    #[cfg_attr(feature = "serde", serde(rename = "RandomColor.js"))]
    RandomColor,
    #[cfg_attr(feature = "serde", serde(rename = "Simplex Noise"))]
    SimplexNoise,
    #[cfg_attr(feature = "serde", serde(rename = "Full Random"))]
    FullRandom,
}

impl GeneratorFunction {
    pub const ALL: [GeneratorFunction; 6] = [
        GeneratorFunction::HueBingo,
        GeneratorFunction::Legacy,
        GeneratorFunction::ImageExtract,
        GeneratorFunction::RandomColor,
        GeneratorFunction::SimplexNoise,
        GeneratorFunction::FullRandom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorFunction::HueBingo => "Hue Bingo",
            GeneratorFunction::Legacy => "Legacy",
            GeneratorFunction::ImageExtract => "ImageExtract",
            GeneratorFunction::RandomColor => "RandomColor.js",
            GeneratorFunction::SimplexNoise => "Simplex Noise",
            GeneratorFunction::FullRandom => "Full Random",
        }
    }
}

impl fmt::Display for GeneratorFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorFunction {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| ParseNameError::new("generator function", s))
    }
}

/// The space generator coordinates are interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorMode {
    #[default]
    Hsluv,
    Oklch,
    Hcl,
    Hsl,
    Hcg,
    Hsv,
    Hpluv,
}

/// Largest Oklch chroma a saturation of 1.0 maps to.
const OKLCH_MAX_CHROMA: f64 = 0.37;
/// Largest CIE LCh chroma a saturation of 1.0 maps to.
const HCL_MAX_CHROMA: f64 = 130.0;

impl ColorMode {
    pub const ALL: [ColorMode; 7] = [
        ColorMode::Hsluv,
        ColorMode::Oklch,
        ColorMode::Hcl,
        ColorMode::Hsl,
        ColorMode::Hcg,
        ColorMode::Hsv,
        ColorMode::Hpluv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Hsluv => "hsluv",
            ColorMode::Oklch => "oklch",
            ColorMode::Hcl => "hcl",
            ColorMode::Hsl => "hsl",
            ColorMode::Hcg => "hcg",
            ColorMode::Hsv => "hsv",
            ColorMode::Hpluv => "hpluv",
        }
    }

    /// Build a color from generator coordinates.
    ///
    /// `s` and `l` are clamped to 0..=1; out-of-gamut results (possible in
    /// oklch and hcl) are clamped per channel.
    pub fn compose(self, h: f64, s: f64, l: f64) -> Color {
        let h = normalize_hue(h);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        let srgb = match self {
            ColorMode::Hsluv => Srgb::from(LinearRgb::from(Hsluv::new(h, s * 100.0, l * 100.0))),
            ColorMode::Hpluv => Srgb::from(LinearRgb::from(Hpluv::new(h, s * 100.0, l * 100.0))),
            ColorMode::Oklch => Srgb::from(LinearRgb::from(Oklab::from(Oklch::new(
                l,
                s * OKLCH_MAX_CHROMA,
                h,
            )))),
            ColorMode::Hcl => Srgb::from(LinearRgb::from(Lab::from(Lch::new(
                l * 100.0,
                s * HCL_MAX_CHROMA,
                h,
            )))),
            ColorMode::Hsl => Srgb::from(Hsl::new(h, s, l)),
            ColorMode::Hsv => Srgb::from(Hsv::new(h, s, l)),
            ColorMode::Hcg => Srgb::from(Hcg::new(h, s, l)),
        };
        srgb.to_color()
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorMode {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ParseNameError::new("color mode", s))
    }
}

/// Inputs of [`generate_seed_colors`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorOptions {
    pub generator: GeneratorFunction,
    pub color_mode: ColorMode,
    /// Number of seed colors (`colorsInGradient`).
    pub parts: usize,
    pub random_order: bool,
    /// Hue step in degrees.
    pub min_hue_distance: f64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            generator: GeneratorFunction::Legacy,
            color_mode: ColorMode::Hsluv,
            parts: 4,
            random_order: false,
            min_hue_distance: 60.0,
        }
    }
}

/// Produce `options.parts` seed colors from `random`.
///
/// [`GeneratorFunction::ImageExtract`] yields nothing; its colors are
/// supplied by an image collaborator.
pub fn generate_seed_colors(random: &mut SeededRandom, options: &GeneratorOptions) -> Vec<Color> {
    let parts = options.parts;
    let hue_step = if options.min_hue_distance.is_finite() && options.min_hue_distance > 0.0 {
        options.min_hue_distance
    } else {
        1.0
    };

    let mut colors = match options.generator {
        GeneratorFunction::Legacy => legacy(random, options.color_mode, parts, hue_step),
        GeneratorFunction::HueBingo => hue_bingo(random, options.color_mode, parts, hue_step),
        GeneratorFunction::RandomColor => (0..parts).map(|_| random_color(random)).collect(),
        GeneratorFunction::SimplexNoise => simplex(random, options.color_mode, parts, hue_step),
        GeneratorFunction::FullRandom => (0..parts)
            .map(|_| {
                let h = random.scaled(360.0);
                let s = random.next_f64();
                let l = random.next_f64();
                options.color_mode.compose(h, s, l)
            })
            .collect(),
        GeneratorFunction::ImageExtract => Vec::new(),
    };

    if options.random_order {
        random.shuffle(&mut colors);
    }
    colors
}

/// Position of stop `i` of `parts` along a 0..=1 ramp.
fn ramp(i: usize, parts: usize) -> f64 {
    if parts <= 1 {
        0.0
    } else {
        i as f64 / (parts - 1) as f64
    }
}

fn legacy(random: &mut SeededRandom, mode: ColorMode, parts: usize, hue_step: f64) -> Vec<Color> {
    if parts == 0 {
        return Vec::new();
    }
    let base_hue = random.int_range(0, 359) as f64;
    let base_saturation = random.int_range(5, 40) as f64 / 100.0;
    let base_lightness = random.int_range(0, 20) as f64 / 100.0;
    let lightness_range = 0.9 - base_lightness;

    let mut colors = Vec::with_capacity(parts);
    colors.push(mode.compose(
        base_hue,
        base_saturation,
        base_lightness * (0.25 + random.scaled(0.5)),
    ));

    for i in 1..parts {
        let hue = base_hue + i as f64 * hue_step + random.scaled(hue_step / 4.0);
        let saturation = base_saturation + 0.5 + random.scaled(0.4);
        let lightness = base_lightness + lightness_range * ramp(i, parts).powf(1.5);
        colors.push(mode.compose(hue, saturation, lightness));
    }
    colors
}

fn hue_bingo(random: &mut SeededRandom, mode: ColorMode, parts: usize, hue_step: f64) -> Vec<Color> {
    let base_hue = random.scaled(360.0);
    let slots = ((360.0 / hue_step).round() as usize).max(1);
    let wheel: Vec<f64> = (0..slots).map(|k| base_hue + k as f64 * hue_step).collect();
    let mut remaining = wheel.clone();

    let first_lightness = 0.02 + random.scaled(0.12);
    let last_lightness = 0.82 + random.scaled(0.16);

    let mut colors = Vec::with_capacity(parts);
    for i in 0..parts {
        if remaining.is_empty() {
            remaining = wheel.clone();
        }
        let hue = match random.pick_index(remaining.len()) {
            Some(index) => remaining.swap_remove(index),
            None => base_hue,
        };

        let position = ramp(i, parts);
        let lightness = if i == 0 {
            first_lightness
        } else if i + 1 == parts {
            last_lightness
        } else {
            let jitter = random.scaled(0.1) - 0.05;
            first_lightness + (last_lightness - first_lightness) * position + jitter
        };
        let saturation = if i == 0 {
            0.2 + random.scaled(0.3)
        } else {
            0.45 + random.scaled(0.55)
        };
        colors.push(mode.compose(hue, saturation, lightness));
    }
    colors
}

fn simplex(random: &mut SeededRandom, mode: ColorMode, parts: usize, hue_step: f64) -> Vec<Color> {
    let noise = SimplexNoise::new(random);
    let base_hue = random.scaled(360.0);
    let x = random.scaled(100.0);
    let y = random.scaled(100.0);
    // hue wander per stop, in degrees
    let spread = hue_step.min(180.0);

    (0..parts)
        .map(|i| {
            let step = i as f64 * 0.35;
            let hue = base_hue + i as f64 * hue_step + noise.noise2d(x + step, y) * spread;
            let saturation = 0.55 + 0.45 * noise.noise2d(x + step, y + 31.7);
            let wobble = 0.12 * noise.noise2d(x + step, y + 67.3);
            let lightness = 0.08 + 0.84 * ramp(i, parts) + wobble;
            mode.compose(hue, saturation, lightness)
        })
        .collect()
}

/// One hue range of the RandomColor dictionary: `(name, hue range,
/// saturation/brightness lower bounds)`.
type HueEntry = (&'static str, [i32; 2], &'static [[f64; 2]]);

const HUE_DICTIONARY: [HueEntry; 7] = [
    (
        "red",
        [-26, 18],
        &[[20.0, 100.0], [30.0, 92.0], [40.0, 89.0], [50.0, 85.0], [60.0, 78.0], [70.0, 70.0], [80.0, 60.0], [90.0, 55.0], [100.0, 50.0]],
    ),
    (
        "orange",
        [18, 46],
        &[[20.0, 100.0], [30.0, 93.0], [40.0, 88.0], [50.0, 86.0], [60.0, 85.0], [70.0, 70.0], [100.0, 70.0]],
    ),
    (
        "yellow",
        [46, 62],
        &[[25.0, 100.0], [40.0, 94.0], [50.0, 89.0], [60.0, 86.0], [70.0, 84.0], [80.0, 82.0], [90.0, 80.0], [100.0, 75.0]],
    ),
    (
        "green",
        [62, 178],
        &[[30.0, 100.0], [40.0, 90.0], [50.0, 85.0], [60.0, 81.0], [70.0, 74.0], [80.0, 64.0], [90.0, 50.0], [100.0, 40.0]],
    ),
    (
        "blue",
        [178, 257],
        &[[20.0, 100.0], [30.0, 86.0], [40.0, 80.0], [50.0, 74.0], [60.0, 60.0], [70.0, 52.0], [80.0, 44.0], [90.0, 39.0], [100.0, 35.0]],
    ),
    (
        "purple",
        [257, 282],
        &[[20.0, 100.0], [30.0, 87.0], [40.0, 79.0], [50.0, 70.0], [60.0, 65.0], [70.0, 59.0], [80.0, 52.0], [90.0, 45.0], [100.0, 42.0]],
    ),
    (
        "pink",
        [282, 334],
        &[[20.0, 100.0], [30.0, 90.0], [40.0, 86.0], [60.0, 84.0], [80.0, 80.0], [90.0, 75.0], [100.0, 73.0]],
    ),
];

fn hue_entry(hue: i32) -> &'static HueEntry {
    // the red range wraps through 0
    let hue = if (334..=360).contains(&hue) { hue - 360 } else { hue };
    HUE_DICTIONARY
        .iter()
        .find(|(_, [lo, hi], _)| (*lo..=*hi).contains(&hue))
        .unwrap_or(&HUE_DICTIONARY[0])
}

/// `floor(min + next * (max + 1 - min))`
fn random_within(random: &mut SeededRandom, min: f64, max: f64) -> f64 {
    (min + random.next_f64() * (max + 1.0 - min)).floor()
}

fn minimum_brightness(hue: i32, saturation: f64) -> f64 {
    let (_, _, bounds) = hue_entry(hue);
    for pair in bounds.windows(2) {
        let [s1, v1] = pair[0];
        let [s2, v2] = pair[1];
        if saturation >= s1 && saturation <= s2 {
            let slope = (v2 - v1) / (s2 - s1);
            return slope * saturation + (v1 - slope * s1);
        }
    }
    0.0
}

fn random_color(random: &mut SeededRandom) -> Color {
    let hue = random_within(random, 0.0, 360.0) as i32;

    let (_, _, bounds) = hue_entry(hue);
    let s_min = bounds.first().map_or(0.0, |b| b[0]);
    let s_max = bounds.last().map_or(100.0, |b| b[0]);
    let saturation = random_within(random, s_min, s_max).min(100.0);

    let b_min = minimum_brightness(hue, saturation);
    let brightness = random_within(random, b_min, 100.0).min(100.0);

    Srgb::from(Hsv::new(hue as f64, saturation / 100.0, brightness / 100.0)).to_color()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(generator: GeneratorFunction) -> GeneratorOptions {
        GeneratorOptions {
            generator,
            ..GeneratorOptions::default()
        }
    }

    #[test]
    fn test_every_generator_is_deterministic() {
        for generator in GeneratorFunction::ALL {
            for mode in ColorMode::ALL {
                let opts = GeneratorOptions {
                    color_mode: mode,
                    parts: 5,
                    ..options(generator)
                };
                let a = generate_seed_colors(&mut SeededRandom::new("repeat"), &opts);
                let b = generate_seed_colors(&mut SeededRandom::new("repeat"), &opts);
                assert_eq!(a, b, "{generator} / {mode}");
            }
        }
    }

    #[test]
    fn test_generators_yield_parts_colors() {
        for generator in GeneratorFunction::ALL {
            for parts in [0, 1, 2, 4, 10] {
                let opts = GeneratorOptions {
                    parts,
                    ..options(generator)
                };
                let colors = generate_seed_colors(&mut SeededRandom::new("count"), &opts);
                let expected = if generator == GeneratorFunction::ImageExtract { 0 } else { parts };
                assert_eq!(colors.len(), expected, "{generator} with {parts} parts");
            }
        }
    }

    #[test]
    fn test_seed_changes_colors() {
        let opts = options(GeneratorFunction::Legacy);
        let a = generate_seed_colors(&mut SeededRandom::new("one"), &opts);
        let b = generate_seed_colors(&mut SeededRandom::new("two"), &opts);
        assert_ne!(a, b);
    }

    #[test]
    fn test_legacy_ramps_from_dark_to_light() {
        let opts = GeneratorOptions {
            parts: 6,
            ..options(GeneratorFunction::Legacy)
        };
        let colors = generate_seed_colors(&mut SeededRandom::new("ramp"), &opts);
        let luminance = |c: Color| LinearRgb::from(c).luminance();
        assert!(luminance(colors[0]) < luminance(colors[5]));
    }

    #[test]
    fn test_random_order_is_a_permutation() {
        let ordered = options(GeneratorFunction::FullRandom);
        let shuffled = GeneratorOptions {
            random_order: true,
            ..ordered
        };
        let mut a = generate_seed_colors(&mut SeededRandom::new("perm"), &ordered);
        let mut b = generate_seed_colors(&mut SeededRandom::new("perm"), &shuffled);
        a.sort_by_key(|c| c.to_bytes());
        b.sort_by_key(|c| c.to_bytes());
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_color_dictionary() {
        assert_eq!(hue_entry(0).0, "red");
        assert_eq!(hue_entry(350).0, "red");
        assert_eq!(hue_entry(30).0, "orange");
        assert_eq!(hue_entry(200).0, "blue");
        assert_eq!(hue_entry(300).0, "pink");

        // halfway between (20, 100) and (30, 92) in the red bounds
        assert!((minimum_brightness(5, 25.0) - 96.0).abs() < 1e-9);
        assert_eq!(minimum_brightness(5, 10.0), 0.0);
    }

    #[test]
    fn test_compose_extremes() {
        for mode in ColorMode::ALL {
            assert_eq!(mode.compose(120.0, 0.0, 0.0), Color::BLACK, "{mode}");
        }
        assert_eq!(ColorMode::Hsl.compose(0.0, 1.0, 0.5), Color::new(255, 0, 0));
        assert_eq!(ColorMode::Hsluv.compose(0.0, 0.0, 1.0), Color::WHITE);
    }

    #[test]
    fn test_names_round_trip() {
        for generator in GeneratorFunction::ALL {
            assert_eq!(generator.as_str().parse::<GeneratorFunction>(), Ok(generator));
        }
        for mode in ColorMode::ALL {
            assert_eq!(mode.to_string().parse::<ColorMode>(), Ok(mode));
        }
        let err = "Perlin".parse::<GeneratorFunction>().unwrap_err();
        assert_eq!(err.to_string(), "unknown generator function: \"Perlin\"");
    }
}
