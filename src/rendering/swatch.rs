use resvg::usvg::{self, Transform};
use std::fmt::Write;
use std::io::Cursor;
use tiny_skia::Pixmap;

use farbe::Color;

use crate::error::RenderError;

pub const MIN_SIZE: u32 = 16;
pub const MAX_SIZE: u32 = 2048;
pub const DEFAULT_SIZE: u32 = 100;
pub const DEFAULT_PADDING: f64 = 0.1;

/// Square swatch of a color sequence.
///
/// The colors run top to bottom through a linear gradient, or as equal
/// bands with `hard_stops`. `padding` is the share of `size` left empty
/// on every side.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    pub size: u32,
    pub padding: f64,
    pub hard_stops: bool,
    /// Fill behind the swatch; transparent when `None`
    pub background: Option<Color>,
}

impl Default for Swatch {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            padding: DEFAULT_PADDING,
            hard_stops: false,
            background: None,
        }
    }
}

impl Swatch {
    pub fn validate(&self) -> Result<(), RenderError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(RenderError::UnsupportedDimensions {
                width: self.size,
                height: self.size,
            });
        }
        Ok(())
    }

    pub fn to_svg(&self, colors: &[Color]) -> String {
        let size = self.size as f64;
        let padding = if self.padding.is_finite() {
            self.padding.clamp(0.0, 0.49)
        } else {
            0.0
        };
        let inset = size * padding;
        let inner = size - 2.0 * inset;

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
        );
        if let Some(background) = self.background {
            let _ = write!(
                svg,
                r#"<rect width="{size}" height="{size}" fill="{}"/>"#,
                background.to_hex()
            );
        }
        svg.push_str(r#"<defs><linearGradient id="palette" x1="0" y1="0" x2="0" y2="1">"#);
        for (offset, color) in self.stops(colors) {
            let _ = write!(
                svg,
                r#"<stop offset="{offset}" stop-color="{}"/>"#,
                color.to_hex()
            );
        }
        svg.push_str("</linearGradient></defs>");
        let _ = write!(
            svg,
            r#"<rect x="{inset}" y="{inset}" width="{inner}" height="{inner}" fill="url(#palette)"/>"#
        );
        svg.push_str("</svg>");
        svg
    }

    fn stops(&self, colors: &[Color]) -> Vec<(f64, Color)> {
        let n = colors.len();
        if n == 1 {
            return vec![(0.0, colors[0])];
        }
        if self.hard_stops {
            colors
                .iter()
                .enumerate()
                .flat_map(|(i, &c)| {
                    [(i as f64 / n as f64, c), ((i + 1) as f64 / n as f64, c)]
                })
                .collect()
        } else {
            colors
                .iter()
                .enumerate()
                .map(|(i, &c)| (i as f64 / (n - 1) as f64, c))
                .collect()
        }
    }

    /// Rasterize the swatch to an optimized RGBA PNG.
    pub fn to_png(&self, colors: &[Color]) -> Result<Vec<u8>, RenderError> {
        self.validate()?;
        let svg = self.to_svg(colors);
        let pixmap = rasterize_svg(svg.as_bytes(), self.size)?;

        let rgba: Vec<u8> = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        let png_bytes = encode_png(self.size, &rgba)?;

        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                ..Default::default()
            },
        )
        .unwrap_or(png_bytes);
        tracing::debug!(size = self.size, bytes = optimized.len(), "Rendered swatch");
        Ok(optimized)
    }
}

fn rasterize_svg(svg_data: &[u8], size: u32) -> Result<Pixmap, RenderError> {
    let tree = usvg::Tree::from_data(svg_data, &usvg::Options::default())
        .map_err(|e| RenderError::SvgParse(e.to_string()))?;

    let svg_size = tree.size();
    let scale = (size as f32 / svg_size.width()).min(size as f32 / svg_size.height());

    let mut pixmap = Pixmap::new(size, size).ok_or(RenderError::PixmapAllocation)?;
    resvg::render(
        &tree,
        Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn encode_png(size: u32, rgba: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, size, size);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Vec<Color> {
        vec![Color::new(255, 0, 0), Color::new(0, 0, 255)]
    }

    #[test]
    fn test_svg_gradient_stops() {
        let svg = Swatch::default().to_svg(&colors());
        assert!(svg.contains(r##"<stop offset="0" stop-color="#ff0000"/>"##));
        assert!(svg.contains(r##"<stop offset="1" stop-color="#0000ff"/>"##));
        assert!(svg.contains(r#"x="10" y="10" width="80" height="80""#));
        assert!(!svg.contains("<rect width="));
    }

    #[test]
    fn test_svg_hard_stops() {
        let swatch = Swatch {
            hard_stops: true,
            ..Swatch::default()
        };
        let svg = swatch.to_svg(&colors());
        assert_eq!(svg.matches("<stop ").count(), 4);
        assert!(svg.contains(r##"<stop offset="0.5" stop-color="#ff0000"/>"##));
        assert!(svg.contains(r##"<stop offset="0.5" stop-color="#0000ff"/>"##));
    }

    #[test]
    fn test_svg_background() {
        let swatch = Swatch {
            background: Some(Color::WHITE),
            ..Swatch::default()
        };
        assert!(swatch
            .to_svg(&colors())
            .contains(r##"<rect width="100" height="100" fill="#ffffff"/>"##));
    }

    #[test]
    fn test_png_signature() {
        let png = Swatch::default().to_png(&colors()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_png_rejects_size() {
        let swatch = Swatch {
            size: 4096,
            ..Swatch::default()
        };
        assert!(matches!(
            swatch.to_png(&colors()),
            Err(RenderError::UnsupportedDimensions { .. })
        ));
    }
}
