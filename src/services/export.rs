//! Text projections of a palette
//!
//! Exports take the mirrored palette together with its names. A missing
//! name falls back to the color's hex value.

use farbe::{Cmyk, Color, Hsl};
use std::fmt::Write;

use crate::models::{ColorValueType, ExportFormat};

/// Render `color` the way exports and swatch captions show it.
pub fn format_value(color: Color, value_type: ColorValueType) -> String {
    match value_type {
        ColorValueType::Hex => color.to_hex(),
        ColorValueType::Rgb => format!("rgb({},{},{})", color.r, color.g, color.b),
        ColorValueType::Hsl => {
            let hsl = Hsl::from(color.to_srgb());
            format!(
                "hsl({},{}%,{}%)",
                round2(hsl.h),
                round2(hsl.s * 100.0),
                round2(hsl.l * 100.0)
            )
        }
        ColorValueType::Cmyk => {
            let cmyk = Cmyk::from(color.to_srgb());
            format!(
                "cmyk({}%,{}%,{}%,{}%)",
                percent(cmyk.c),
                percent(cmyk.m),
                percent(cmyk.y),
                percent(cmyk.k)
            )
        }
    }
}

fn round2(value: f64) -> f64 {
    // adding zero turns -0 into 0
    (value * 100.0).round() / 100.0 + 0.0
}

fn percent(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Export `colors` in `format`, naming each entry from `names`.
pub fn export_palette(
    colors: &[Color],
    names: &[String],
    format: ExportFormat,
    value_type: ColorValueType,
) -> String {
    let entries: Vec<(String, String)> = colors
        .iter()
        .enumerate()
        .map(|(i, &color)| {
            let name = names.get(i).cloned().unwrap_or_else(|| color.to_hex());
            (name, format_value(color, value_type))
        })
        .collect();
    let values = || entries.iter().map(|(_, v)| v.as_str()).collect::<Vec<_>>();

    match format {
        ExportFormat::List => values().join("\n"),
        ExportFormat::CsvList => {
            let mut out = String::from("name,value");
            for (name, value) in &entries {
                let _ = write!(out, "\n{name},{value}");
            }
            out.push('\n');
            out
        }
        ExportFormat::JsArray => format!("[\n  \"{}\"\n]", values().join("\", \n  \"")),
        ExportFormat::JsObject => {
            let mut out = String::from("{");
            for (name, value) in &entries {
                let _ = write!(out, "\n  \"{name}\": \"{value}\",");
            }
            out.push_str("\n}");
            out
        }
        ExportFormat::Css => entries
            .iter()
            .map(|(name, value)| {
                let ident = css_escape(&name.replace(' ', "-")).to_lowercase();
                format!("--{ident}: {value};")
            })
            .collect::<Vec<_>>()
            .join("\n"),
        ExportFormat::CssGradient => {
            format!("linear-gradient(\n  {}\n);", values().join(", \n  "))
        }
    }
}

/// Serialize `ident` as a CSS identifier (CSSOM `CSS.escape`).
pub fn css_escape(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len());

    for (i, &c) in chars.iter().enumerate() {
        let code = c as u32;
        if c == '\0' {
            out.push('\u{FFFD}');
        } else if (0x01..=0x1f).contains(&code)
            || code == 0x7f
            || (i == 0 && c.is_ascii_digit())
            || (i == 1 && c.is_ascii_digit() && chars[0] == '-')
        {
            let _ = write!(out, "\\{code:x} ");
        } else if i == 0 && c == '-' && chars.len() == 1 {
            out.push_str("\\-");
        } else if code >= 0x80 || c == '-' || c == '_' || c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }
    out
}

/// Background gradient stops: the first color starts at `12vh`, the last
/// ends at `80%` with same-height colors and `69%` otherwise.
pub fn gradient_stops(colors: &[Color], same_height: bool) -> String {
    let last = colors.len().saturating_sub(1);
    colors
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let hex = color.to_hex();
            if i == 0 {
                format!("{hex} 12vh")
            } else if i == last {
                format!("{hex} {}", if same_height { "80%" } else { "69%" })
            } else {
                hex
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Equal-width bands: each color covers `i/n` to `(i+1)/n`.
pub fn hard_stops(colors: &[Color]) -> String {
    let n = colors.len() as f64;
    colors
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let start = i as f64 / n * 100.0;
            let end = (i + 1) as f64 / n * 100.0;
            format!("{} {start}% {end}%", color.to_hex())
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Stops for the mirrored palette; short sequences fall back to a plain list.
pub fn mirrored_gradient_stops(colors: &[Color], same_height: bool) -> String {
    if colors.len() < 2 {
        return colors.iter().map(|c| c.to_hex()).collect::<Vec<_>>().join(",");
    }
    gradient_stops(colors, same_height)
}

/// Hard stops for the mirrored palette; empty for short sequences.
pub fn mirrored_hard_stops(colors: &[Color]) -> String {
    if colors.len() < 2 {
        return String::new();
    }
    hard_stops(colors)
}
