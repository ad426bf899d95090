//! Color types and conversions
//!
//! [`Color`] is the exact 8-bit value that flows between modules. The
//! float types are working spaces: conversions go through [`LinearRgb`]
//! (for Lab, Oklab, HSLuv) or [`Srgb`] (for the cylindrical spaces).
//!
//! ```text
//! Color <-> Srgb <-> LinearRgb <-> Lab <-> Lch
//!            |            |------> Oklab <-> Oklch
//!            |            '------- Hsluv, Hpluv (into only)
//!            '---> Hsl, Hsv, Hsi, Hcg, Cmyk
//! ```

mod cylindrical;
mod hsluv;
mod lab;
mod linear_rgb;
mod lut;
mod oklab;
mod polar;
mod rgb;
mod srgb;

pub use cylindrical::{Cmyk, Hcg, Hsi, Hsl, Hsv};
pub use hsluv::{Hpluv, Hsluv};
pub use lab::{Lab, Lch};
pub use linear_rgb::LinearRgb;
pub use lut::{linear_to_srgb, srgb_to_linear};
pub use oklab::{Oklab, Oklch};
pub use polar::normalize_hue;
pub use rgb::Color;
pub use srgb::Srgb;
