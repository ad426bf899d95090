// Color-science constants are kept at the precision they are published with
#![allow(clippy::excessive_precision, clippy::manual_range_contains)]

//! farbe: seeded color palettes
//!
//! This library produces the palettes behind Farbvelo: a seed string is
//! turned into a few seed colors, the seed colors are interpolated into a
//! palette in a perceptual color space, and the palette is analyzed and
//! expanded for display.
//!
//! # Quick Start
//!
//! ```
//! use farbe::{
//!     generate_seed_colors, interpolate_palette, ContrastMatrix, GeneratorOptions,
//!     InterpolationOptions, MirrorMap, SeededRandom,
//! };
//!
//! let mut random = SeededRandom::new("sunset");
//! let seeds = generate_seed_colors(&mut random, &GeneratorOptions::default());
//! let palette = interpolate_palette(&seeds, InterpolationOptions::default());
//! assert_eq!(palette.len(), 6);
//!
//! let contrast = ContrastMatrix::build(&palette, true);
//! let mirror = MirrorMap::new(palette.len());
//! let looped = mirror.apply(&palette).unwrap();
//! let looped_rows = mirror.apply(contrast.rows()).unwrap();
//! assert_eq!(looped.len(), looped_rows.len());
//! ```
//!
//! # Pipeline
//!
//! - [`SeededRandom`]: the only source of randomness. Its stream is the
//!   ARC4 construction of the `seedrandom` package and yields the same
//!   numbers for a seed. Only the stream matches; the color generators
//!   built on it are this crate's own.
//! - [`generate_seed_colors`]: one of the [`GeneratorFunction`]s places
//!   colors in a [`ColorMode`].
//! - [`PaletteInterpolator`]: stretches seeds into exactly `amount`
//!   colors through an [`InterpolationModel`].
//! - [`MirrorMap`]: palindromic expansion applied with the same indices
//!   to colors, names and contrast rows.
//! - [`ContrastMatrix`]: WCAG AA pass/fail of every palette pair.
//!
//! # Color Spaces
//!
//! [`Color`] is the exact 8-bit value exchanged between stages. Float
//! types are working spaces:
//!
//! - [`Srgb`] and [`LinearRgb`] for gamma-encoded and linear light
//! - [`Lab`]/[`Lch`] (CIE, D65) and [`Oklab`]/[`Oklch`] for perceptual
//!   interpolation
//! - [`Hsl`], [`Hsv`], [`Hsi`], [`Hcg`] as cylindrical views of the RGB cube
//! - [`Hsluv`] and [`Hpluv`] for placing generator colors
//!
//! All conversions are pure functions on `Copy` types: nothing in this
//! crate allocates state across calls or performs I/O.

pub mod color;
pub mod contrast;
pub mod error;
pub mod generate;
pub mod interpolate;
pub mod mirror;
pub mod noise;
pub mod random;
pub mod spectral;


pub use color::{
    normalize_hue, Cmyk, Color, Hcg, Hpluv, Hsi, Hsl, Hsluv, Hsv, Lab, Lch, LinearRgb, Oklab,
    Oklch, Srgb,
};
pub use contrast::{
    best_contrast, contrast_ratio, contrast_tint, relative_luminance, text_color_for,
    ContrastMatrix, WCAG_AA_NORMAL,
};
pub use error::{ParseColorError, ParseNameError};
pub use generate::{generate_seed_colors, ColorMode, GeneratorFunction, GeneratorOptions};
pub use interpolate::{
    interpolate_palette, InterpolationModel, InterpolationOptions, PaletteInterpolator, Scale,
    FALLBACK_SEEDS,
};
pub use mirror::{mirror, MirrorMap};
pub use noise::SimplexNoise;
pub use random::SeededRandom;
pub use spectral::{mix as spectral_mix, spectral_waypoints};
