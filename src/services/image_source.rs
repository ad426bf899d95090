//! Image color extraction port
//!
//! The `ImageExtract` generator takes its seed colors from an image. The
//! session only issues an [`ImageRequest`]; an [`ImageExtractor`] does
//! the decoding and quantization.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use farbe::Color;

use crate::error::ImageError;
use crate::models::QuantizationMethod;

/// Characters escaped when a seed is placed in a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A pending extraction for the current generation
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub ticket: u64,
    pub url: String,
    /// Number of colors to extract
    pub colors: usize,
    pub quantization: QuantizationMethod,
}

#[async_trait]
pub trait ImageExtractor: Send + Sync {
    async fn extract(
        &self,
        url: &str,
        colors: usize,
        quantization: QuantizationMethod,
    ) -> Result<Vec<Color>, ImageError>;
}

/// Extractor for deployments without image support
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImageExtractor;

#[async_trait]
impl ImageExtractor for NoImageExtractor {
    async fn extract(
        &self,
        _url: &str,
        _colors: usize,
        _quantization: QuantizationMethod,
    ) -> Result<Vec<Color>, ImageError> {
        Err(ImageError::Unavailable)
    }
}

/// The image shown for `seed`: `{seed}` in `template` is replaced.
pub fn seed_image_url(template: &str, seed: &str) -> String {
    let seed = utf8_percent_encode(seed, PATH_SEGMENT).to_string();
    template.replace("{seed}", &seed)
}
