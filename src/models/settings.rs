//! The complete application configuration
//!
//! [`Settings`] serializes with the camelCase prop names used by share
//! tokens, the persisted store and the HTTP API. A value coming from any
//! of those sources is applied one prop at a time so that a bad value is
//! rejected on its own without discarding the rest.

use farbe::{ColorMode, GeneratorFunction, GeneratorOptions, InterpolationModel, InterpolationOptions};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::SettingsError;

/// Values keyed by prop name, as decoded from a token or the store.
pub type SettingsPatch = Map<String, Value>;

pub const MIN_AMOUNT: i64 = 3;
pub const MAX_AMOUNT: i64 = 10;
pub const MIN_COLORS_IN_GRADIENT: i64 = 2;

/// How colors are written in exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorValueType {
    #[default]
    Hex,
    Rgb,
    Hsl,
    Cmyk,
}

impl FromStr for ColorValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hex" => Ok(ColorValueType::Hex),
            "rgb" => Ok(ColorValueType::Rgb),
            "hsl" => Ok(ColorValueType::Hsl),
            "cmyk" => Ok(ColorValueType::Cmyk),
            _ => Err(s.to_string()),
        }
    }
}

/// Palette quantizer used when extracting colors from an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum QuantizationMethod {
    #[default]
    #[serde(rename = "art-palette")]
    ArtPalette,
    #[serde(rename = "gifenc")]
    Gifenc,
}

impl QuantizationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            QuantizationMethod::ArtPalette => "art-palette",
            QuantizationMethod::Gifenc => "gifenc",
        }
    }
}

impl FromStr for QuantizationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [QuantizationMethod::ArtPalette, QuantizationMethod::Gifenc]
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Text export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ExportFormat {
    List,
    CsvList,
    #[default]
    JsArray,
    JsObject,
    Css,
    CssGradient,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::List,
        ExportFormat::CsvList,
        ExportFormat::JsArray,
        ExportFormat::JsObject,
        ExportFormat::Css,
        ExportFormat::CssGradient,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::List => "list",
            ExportFormat::CsvList => "csvList",
            ExportFormat::JsArray => "jsArray",
            ExportFormat::JsObject => "jsObject",
            ExportFormat::Css => "css",
            ExportFormat::CssGradient => "cssGradient",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Full application configuration: generation parameters plus display flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub current_seed: String,
    /// Palette length, 3..=10
    pub amount: i64,
    /// Seed colors drawn by the generator, 2..=amount
    pub colors_in_gradient: i64,
    pub random_order: bool,
    pub has_gradients: bool,
    pub has_background: bool,
    pub animate_background_intro: bool,
    pub has_outlines: bool,
    pub high_contrast: bool,
    #[serde(rename = "autoHideUI")]
    pub auto_hide_ui: bool,
    #[serde(rename = "expandUI")]
    pub expand_ui: bool,
    pub has_bleed: bool,
    pub has_grain: bool,
    pub hide_text: bool,
    pub show_contrast: bool,
    #[serde(rename = "addBWContrast")]
    pub add_bw_contrast: bool,
    /// Mix padding, 0..=1
    pub padding: f64,
    #[schema(value_type = String, example = "hsluv")]
    pub color_mode: ColorMode,
    pub min_hue_distance: i64,
    #[schema(value_type = String, example = "lab")]
    pub interpolation_color_model: InterpolationModel,
    pub color_value_type: ColorValueType,
    #[schema(value_type = String, example = "Legacy")]
    pub generator_function: GeneratorFunction,
    pub quantization_method: QuantizationMethod,
    pub name_list: String,
    #[serde(rename = "showUI")]
    pub show_ui: bool,
    pub same_height_colors: bool,
    pub export_as: ExportFormat,
    #[serde(rename = "imgURL")]
    pub img_url: String,
    #[serde(rename = "imgID")]
    pub img_id: String,
    #[serde(rename = "trackSettingsInURL")]
    pub track_settings_in_url: bool,
    pub lightmode: bool,
}

/// A fresh random seed: 8 alphanumeric characters.
pub fn random_seed() -> String {
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(8)
        .map(char::from)
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_seed(random_seed())
    }
}

impl Settings {
    /// Default settings with a fixed seed
    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self {
            current_seed: seed.into(),
            amount: 6,
            colors_in_gradient: 4,
            random_order: false,
            has_gradients: true,
            has_background: false,
            animate_background_intro: false,
            has_outlines: false,
            high_contrast: false,
            auto_hide_ui: false,
            expand_ui: false,
            has_bleed: false,
            has_grain: false,
            hide_text: false,
            show_contrast: false,
            add_bw_contrast: true,
            padding: 0.175,
            color_mode: ColorMode::Hsluv,
            min_hue_distance: 60,
            interpolation_color_model: InterpolationModel::Lab,
            color_value_type: ColorValueType::Hex,
            generator_function: GeneratorFunction::Legacy,
            quantization_method: QuantizationMethod::ArtPalette,
            name_list: "bestOf".to_string(),
            show_ui: true,
            same_height_colors: false,
            export_as: ExportFormat::JsArray,
            img_url: String::new(),
            img_id: String::new(),
            track_settings_in_url: true,
            lightmode: false,
        }
    }

    /// Clamp numeric fields into range; `colorsInGradient` follows `amount`.
    pub fn normalize(&mut self) {
        self.amount = self.amount.clamp(MIN_AMOUNT, MAX_AMOUNT);
        self.colors_in_gradient = self
            .colors_in_gradient
            .clamp(MIN_COLORS_IN_GRADIENT, self.amount);
        self.padding = if self.padding.is_nan() {
            0.0
        } else {
            self.padding.clamp(0.0, 1.0)
        };
    }

    /// Restore every default except the seed and the color scheme.
    pub fn reset(&mut self) {
        let seed = std::mem::take(&mut self.current_seed);
        let lightmode = self.lightmode;
        *self = Self::with_seed(seed);
        self.lightmode = lightmode;
    }

    /// All props as a JSON object, in declaration order.
    pub fn to_map(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }

    /// Set one prop from a JSON value.
    ///
    /// On error the settings are unchanged.
    pub fn apply(&mut self, prop: &str, value: Value) -> Result<(), SettingsError> {
        let mut map = self.to_map();
        match map.get_mut(prop) {
            Some(slot) => *slot = value,
            None => return Err(SettingsError::UnknownField(prop.to_string())),
        }
        *self = serde_json::from_value(Value::Object(map)).map_err(|e| {
            SettingsError::InvalidValue {
                prop: prop.to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(())
    }

    /// Apply every entry of `patch`, logging and skipping rejected values.
    ///
    /// Returns the number of props applied.
    pub fn apply_patch(&mut self, patch: &SettingsPatch) -> usize {
        let mut applied = 0;
        for (prop, value) in patch {
            match self.apply(prop, value.clone()) {
                Ok(()) => applied += 1,
                Err(e) => tracing::warn!(%e, "Ignoring setting"),
            }
        }
        applied
    }

    pub fn amount(&self) -> usize {
        usize::try_from(self.amount.clamp(MIN_AMOUNT, MAX_AMOUNT)).unwrap_or(6)
    }

    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            generator: self.generator_function,
            color_mode: self.color_mode,
            parts: usize::try_from(self.colors_in_gradient.max(MIN_COLORS_IN_GRADIENT))
                .unwrap_or(4),
            random_order: self.random_order,
            min_hue_distance: self.min_hue_distance as f64,
        }
    }

    pub fn interpolation_options(&self) -> InterpolationOptions {
        InterpolationOptions {
            amount: self.amount(),
            padding: self.padding,
            model: self.interpolation_color_model,
        }
    }

    /// Whether the seed colors must be drawn again after moving from `before`.
    pub fn needs_new_seed_colors(&self, before: &Settings) -> bool {
        self.colors_in_gradient != before.colors_in_gradient
            || self.quantization_method != before.quantization_method
            || self.random_order != before.random_order
            || self.min_hue_distance != before.min_hue_distance
            || self.color_mode != before.color_mode
            || self.generator_function != before.generator_function
            || (self.random_order && self.current_seed != before.current_seed)
    }

    /// Whether the palette must be re-sampled from unchanged seed colors.
    pub fn needs_resample(&self, before: &Settings) -> bool {
        self.amount != before.amount
            || self.padding != before.padding
            || self.interpolation_color_model != before.interpolation_color_model
            || self.add_bw_contrast != before.add_bw_contrast
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = Settings::with_seed("abc123");
        assert_eq!(settings.amount, 6);
        assert_eq!(settings.colors_in_gradient, 4);
        assert_eq!(settings.padding, 0.175);
        assert_eq!(settings.min_hue_distance, 60);
        assert_eq!(settings.interpolation_color_model, InterpolationModel::Lab);
        assert_eq!(settings.generator_function, GeneratorFunction::Legacy);
        assert_eq!(settings.color_mode, ColorMode::Hsluv);
        assert_eq!(settings.quantization_method, QuantizationMethod::ArtPalette);
        assert_eq!(settings.export_as, ExportFormat::JsArray);
        assert_eq!(settings.name_list, "bestOf");
        assert!(settings.has_gradients);
        assert!(settings.add_bw_contrast);
        assert!(settings.track_settings_in_url);
        assert!(!settings.lightmode);
    }

    #[test]
    fn test_random_seed_shape() {
        let seed = random_seed();
        assert_eq!(seed.len(), 8);
        assert!(seed.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(Settings::default().current_seed.len(), 8);
    }

    #[test]
    fn test_prop_names() {
        let map = Settings::with_seed("s").to_map();
        for prop in [
            "currentSeed",
            "colorsInGradient",
            "addBWContrast",
            "autoHideUI",
            "showUI",
            "imgURL",
            "imgID",
            "trackSettingsInURL",
            "interpolationColorModel",
        ] {
            assert!(map.contains_key(prop), "missing {prop}");
        }
        assert_eq!(map["generatorFunction"], json!("Legacy"));
        assert_eq!(map["quantizationMethod"], json!("art-palette"));
        assert_eq!(map["exportAs"], json!("jsArray"));
        assert_eq!(map["colorMode"], json!("hsluv"));
    }

    #[test]
    fn test_amount_clamps() {
        let mut settings = Settings::with_seed("s");
        settings.amount = 1;
        settings.normalize();
        assert_eq!(settings.amount, 3);

        settings.amount = 20;
        settings.normalize();
        assert_eq!(settings.amount, 10);
    }

    #[test]
    fn test_colors_in_gradient_follows_amount() {
        let mut settings = Settings::with_seed("s");
        settings.colors_in_gradient = 8;
        settings.amount = 5;
        settings.normalize();
        assert_eq!(settings.colors_in_gradient, 5);

        settings.colors_in_gradient = 0;
        settings.normalize();
        assert_eq!(settings.colors_in_gradient, 2);
    }

    #[test]
    fn test_padding_clamps() {
        let mut settings = Settings::with_seed("s");
        settings.padding = 1.5;
        settings.normalize();
        assert_eq!(settings.padding, 1.0);
        settings.padding = -0.1;
        settings.normalize();
        assert_eq!(settings.padding, 0.0);
    }

    #[test]
    fn test_reset_keeps_seed_and_lightmode() {
        let mut settings = Settings::with_seed("keep");
        settings.lightmode = true;
        settings.amount = 9;
        settings.has_bleed = true;
        settings.generator_function = GeneratorFunction::HueBingo;

        settings.reset();

        assert_eq!(settings.current_seed, "keep");
        assert!(settings.lightmode);
        assert_eq!(settings.amount, 6);
        assert!(!settings.has_bleed);
        assert_eq!(settings.generator_function, GeneratorFunction::Legacy);
    }

    #[test]
    fn test_apply_valid_values() {
        let mut settings = Settings::with_seed("s");
        settings.apply("amount", json!(8)).unwrap();
        settings
            .apply("generatorFunction", json!("Hue Bingo"))
            .unwrap();
        settings.apply("padding", json!(0)).unwrap();
        settings.apply("imgURL", json!("https://x/y.jpg")).unwrap();

        assert_eq!(settings.amount, 8);
        assert_eq!(settings.generator_function, GeneratorFunction::HueBingo);
        assert_eq!(settings.padding, 0.0);
        assert_eq!(settings.img_url, "https://x/y.jpg");
    }

    #[test]
    fn test_apply_rejects_bad_value_and_keeps_previous() {
        let mut settings = Settings::with_seed("s");
        let err = settings.apply("colorMode", json!("cmyk")).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert_eq!(settings.color_mode, ColorMode::Hsluv);

        let err = settings.apply("amount", json!("six")).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert_eq!(settings.amount, 6);
    }

    #[test]
    fn test_apply_unknown_prop() {
        let mut settings = Settings::with_seed("s");
        let err = settings.apply("rnd", json!(1)).unwrap_err();
        assert!(matches!(err, SettingsError::UnknownField(prop) if prop == "rnd"));
    }

    #[test]
    fn test_apply_patch_skips_rejected() {
        let mut settings = Settings::with_seed("s");
        let mut patch = SettingsPatch::new();
        patch.insert("amount".into(), json!(4));
        patch.insert("colorMode".into(), json!("nope"));
        patch.insert("hasBleed".into(), json!(true));

        assert_eq!(settings.apply_patch(&patch), 2);
        assert_eq!(settings.amount, 4);
        assert_eq!(settings.color_mode, ColorMode::Hsluv);
        assert!(settings.has_bleed);
    }

    #[test]
    fn test_change_classification() {
        let before = Settings::with_seed("s");

        let mut model = before.clone();
        model.interpolation_color_model = InterpolationModel::Oklab;
        assert!(model.needs_resample(&before));
        assert!(!model.needs_new_seed_colors(&before));

        let mut mode = before.clone();
        mode.color_mode = ColorMode::Oklch;
        assert!(mode.needs_new_seed_colors(&before));

        // a new seed only matters on its own when the order is shuffled
        let mut seed = before.clone();
        seed.current_seed = "t".into();
        assert!(!seed.needs_new_seed_colors(&before));
        seed.random_order = true;
        let mut shuffled = seed.clone();
        shuffled.current_seed = "u".into();
        assert!(shuffled.needs_new_seed_colors(&seed));
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("csvList".parse::<ExportFormat>(), Ok(ExportFormat::CsvList));
        assert_eq!("yaml".parse::<ExportFormat>(), Err("yaml".to_string()));
        for format in ExportFormat::ALL {
            assert_eq!(format.to_string().parse::<ExportFormat>(), Ok(format));
        }
    }

    #[test]
    fn test_options_projection() {
        let mut settings = Settings::with_seed("s");
        settings.colors_in_gradient = 3;
        settings.min_hue_distance = 90;
        settings.random_order = true;

        let generator = settings.generator_options();
        assert_eq!(generator.parts, 3);
        assert_eq!(generator.min_hue_distance, 90.0);
        assert!(generator.random_order);

        let interpolation = settings.interpolation_options();
        assert_eq!(interpolation.amount, 6);
        assert_eq!(interpolation.padding, 0.175);
    }
}
