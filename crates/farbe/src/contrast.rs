//! WCAG contrast analysis
//!
//! Contrast follows WCAG 2.x: relative luminance from the sRGB transfer
//! function and the ratio `(L1 + 0.05) / (L2 + 0.05)` with the lighter
//! color on top, so ratios run from 1.0 (identical) to 21.0 (black on
//! white).

use crate::color::{Color, Hsl, LinearRgb, Srgb};

/// Minimum ratio for normal-size text at level AA.
pub const WCAG_AA_NORMAL: f64 = 4.5;

/// Caption color for light backgrounds.
pub const DARK_TEXT: Color = Color::new(0x21, 0x21, 0x21);

/// WCAG relative luminance, 0.0 for black to 1.0 for white.
#[inline]
pub fn relative_luminance(color: Color) -> f64 {
    LinearRgb::from(color).luminance()
}

/// WCAG contrast ratio; symmetric in its arguments.
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (light, dark) = if la >= lb { (la, lb) } else { (lb, la) };
    (light + 0.05) / (dark + 0.05)
}

/// Whichever of black or white contrasts more with `color`; white wins ties.
pub fn best_contrast(color: Color) -> Color {
    if contrast_ratio(color, Color::BLACK) > contrast_ratio(color, Color::WHITE) {
        Color::BLACK
    } else {
        Color::WHITE
    }
}

/// Caption color for text placed on `color`: white on dark colors,
/// [`DARK_TEXT`] on light ones.
pub fn text_color_for(color: Color) -> Color {
    if relative_luminance(color) < 0.5 {
        Color::WHITE
    } else {
        DARK_TEXT
    }
}

/// A tint of `color` readable on top of it: HSL lightness +0.25 for very
/// dark colors, -0.35 otherwise.
pub fn contrast_tint(color: Color) -> Color {
    let mut hsl = Hsl::from(Srgb::from(color));
    hsl.l = if relative_luminance(color) < 0.15 {
        hsl.l + 0.25
    } else {
        hsl.l - 0.35
    };
    Srgb::from(hsl).to_color()
}

/// Pairwise pass/fail contrast of a palette.
///
/// Row `i` belongs to palette color `i`. Column `j` belongs to comparison
/// color `j`: the palette in order, then white and black when requested.
/// An entry holds the comparison color when it reaches
/// [`WCAG_AA_NORMAL`] against the row's color, and `None` when it fails.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContrastMatrix {
    columns: Vec<Color>,
    rows: Vec<Vec<Option<Color>>>,
}

impl ContrastMatrix {
    pub fn build(palette: &[Color], include_black_white: bool) -> Self {
        let mut columns = palette.to_vec();
        if include_black_white {
            columns.push(Color::WHITE);
            columns.push(Color::BLACK);
        }

        let rows = palette
            .iter()
            .map(|&row| {
                columns
                    .iter()
                    .map(|&candidate| {
                        (contrast_ratio(row, candidate) >= WCAG_AA_NORMAL).then_some(candidate)
                    })
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// The comparison set, in column order.
    pub fn columns(&self) -> &[Color] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<Color>>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Option<Color>]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Number of passing pairs in the matrix.
    pub fn passing(&self) -> usize {
        self.rows.iter().flatten().filter(|e| e.is_some()).count()
    }

    pub fn into_rows(self) -> Vec<Vec<Option<Color>>> {
        self.rows
    }
}
