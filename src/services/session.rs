//! The palette session
//!
//! [`PaletteSession`] is the single owner of the settings, the current
//! palette and the ports. Every settings change goes through
//! [`PaletteSession::update`], which works out what has to be recomputed,
//! keeps the visible token in sync and persists the result.
//!
//! Names and image colors arrive asynchronously. The session does not
//! perform those requests itself: it hands out ticketed requests
//! ([`take_name_request`](PaletteSession::take_name_request),
//! [`take_image_request`](PaletteSession::take_image_request)) and only
//! accepts a result whose ticket is still the latest one.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use farbe::{
    generate_seed_colors, Color, ContrastMatrix, GeneratorFunction, MirrorMap,
    PaletteInterpolator, SeededRandom,
};

use crate::error::{ImageError, NameError};
use crate::models::{random_seed, AppConfig, ExportFormat, Settings};
use crate::services::export;
use crate::services::image_source::{seed_image_url, ImageExtractor, ImageRequest};
use crate::services::name_service::{NameResolver, NameResponse};
use crate::services::navigation::{HistoryState, InMemoryHistory, Navigator};
use crate::services::preferences::ColorSchemePreference;
use crate::services::settings_codec::{decode_history_token, decode_url_token, encode_url_token};
use crate::services::storage::{KeyValueStore, SettingsRepository};

/// Title shown until the name service provides one
pub const DEFAULT_TITLE: &str = "Double Rainbow";

/// Deployment values the session needs
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    pub storage_key: String,
    pub share_base_url: String,
    pub image_url_template: String,
}

impl SessionOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            storage_key: config.storage.key.clone(),
            share_base_url: config.share.base_url.clone(),
            image_url_template: config.image.seed_url_template.clone(),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// A pending name lookup for the current palette
#[derive(Debug, Clone, PartialEq)]
pub struct NameRequest {
    pub ticket: u64,
    pub colors: Vec<Color>,
    pub list: String,
}

/// The palindromic views, index-aligned
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MirroredViews {
    pub colors: Vec<Color>,
    pub names: Vec<String>,
    pub contrast: Vec<Vec<Option<Color>>>,
}

pub struct PaletteSession<N: Navigator = InMemoryHistory> {
    settings: Settings,
    repository: SettingsRepository,
    navigator: N,
    options: SessionOptions,
    random: SeededRandom,
    seed_colors: Vec<Color>,
    palette: Vec<Color>,
    contrast: ContrastMatrix,
    names: Vec<String>,
    title: String,
    name_ticket: u64,
    name_request: Option<NameRequest>,
    image_ticket: u64,
    image_request: Option<ImageRequest>,
    had_settings_from_url: bool,
}

impl<N: Navigator> PaletteSession<N> {
    /// Restore settings and generate the first palette.
    ///
    /// Stored settings come first, the visible token overrides them, and
    /// the color-scheme preference fills in `lightmode` when neither set
    /// it. The merged result is persisted right away.
    pub fn restore(
        store: Arc<dyn KeyValueStore>,
        mut navigator: N,
        preference: &dyn ColorSchemePreference,
        options: SessionOptions,
    ) -> Self {
        let repository = SettingsRepository::new(store, options.storage_key.clone());
        let mut merged = repository.load();

        let mut background_intro = None;
        if let Some(token) = navigator.current_token() {
            match decode_url_token(&token) {
                Ok(decoded) => {
                    merged.extend(decoded.patch);
                    background_intro = Some(decoded.background_intro);
                }
                Err(e) => tracing::warn!(%e, "Ignoring malformed settings token"),
            }
        }
        let had_settings_from_url = background_intro.is_some();

        if !merged.contains_key("lightmode") {
            merged.insert(
                "lightmode".to_string(),
                Value::Bool(preference.prefers_light()),
            );
        }

        let mut settings = Settings::default();
        settings.apply_patch(&merged);
        if let Some(intro) = background_intro {
            settings.animate_background_intro = intro;
        }
        settings.normalize();

        if had_settings_from_url && !settings.track_settings_in_url {
            navigator.replace_cleared();
        }

        let random = SeededRandom::new(&settings.current_seed);
        let mut session = Self {
            settings,
            repository,
            navigator,
            options,
            random,
            seed_colors: Vec::new(),
            palette: Vec::new(),
            contrast: ContrastMatrix::default(),
            names: Vec::new(),
            title: DEFAULT_TITLE.to_string(),
            name_ticket: 0,
            name_request: None,
            image_ticket: 0,
            image_request: None,
            had_settings_from_url,
        };
        session.persist();

        tracing::info!(
            seed = %session.settings.current_seed,
            from_url = had_settings_from_url,
            "Restored palette settings"
        );
        session.new_colors(false);
        session
    }

    /// Change settings and propagate the change.
    pub fn update<F: FnOnce(&mut Settings)>(&mut self, change: F) {
        let before = self.settings.clone();
        change(&mut self.settings);
        self.settings.normalize();

        if before.track_settings_in_url && !self.settings.track_settings_in_url {
            self.navigator.push_cleared();
        }

        if self.settings.needs_new_seed_colors(&before) {
            self.new_colors(false);
            return;
        }

        if self.settings.needs_resample(&before) {
            self.resample();
        } else if self.settings.name_list != before.name_list {
            self.request_names();
        }
        self.update_url();
    }

    /// Draw new seed colors, optionally from a fresh random seed.
    pub fn new_colors(&mut self, new_seed: bool) {
        self.generate(new_seed, true);
    }

    /// Restore the state attached to a history entry.
    ///
    /// Every value in the entry's token is applied, so the restored state
    /// encodes back to that token. An entry without state resets the
    /// settings when no token is visible.
    /// Restoring never adds a history entry.
    pub fn restore_history(&mut self, entry: Option<&HistoryState>) {
        match entry {
            Some(state) if !state.seed.is_empty() => {
                self.settings.current_seed = state.seed.clone();
                if let Some(token) = &state.settings {
                    match decode_history_token(token) {
                        Ok(patch) => {
                            self.settings.apply_patch(&patch);
                            self.settings.normalize();
                        }
                        Err(e) => tracing::warn!(%e, "Ignoring malformed history state"),
                    }
                }
                self.generate(false, false);
            }
            _ => {
                if self.navigator.current_token().is_none() {
                    self.settings.reset();
                    self.generate(true, false);
                }
            }
        }
    }

    /// Take colors from a user-supplied image.
    pub fn use_image(&mut self, url: impl Into<String>) {
        self.settings.generator_function = GeneratorFunction::ImageExtract;
        self.settings.img_url = url.into();
        self.request_image(self.settings.img_url.clone());
        self.update_url();
    }

    pub fn take_name_request(&mut self) -> Option<NameRequest> {
        self.name_request.take()
    }

    /// Accept names for the palette issued under `ticket`.
    ///
    /// Stale tickets, failures and responses of the wrong length are
    /// ignored and the previous names stay.
    pub fn apply_names(&mut self, ticket: u64, result: Result<NameResponse, NameError>) -> bool {
        if ticket != self.name_ticket {
            tracing::debug!(ticket, current = self.name_ticket, "Discarding stale names");
            return false;
        }
        match result {
            Ok(response) if response.colors.len() == self.palette.len() => {
                self.names = response.names();
                if !response.palette_title.is_empty() {
                    self.title = response.palette_title;
                }
                true
            }
            Ok(response) => {
                tracing::warn!(
                    expected = self.palette.len(),
                    received = response.colors.len(),
                    "Name response does not match palette"
                );
                false
            }
            Err(e) => {
                tracing::warn!(%e, "Color name lookup failed");
                false
            }
        }
    }

    pub fn take_image_request(&mut self) -> Option<ImageRequest> {
        self.image_request.take()
    }

    /// Accept extracted colors as the seed colors of the current generation.
    pub fn apply_image_colors(
        &mut self,
        ticket: u64,
        result: Result<Vec<Color>, ImageError>,
    ) -> bool {
        if ticket != self.image_ticket
            || self.settings.generator_function != GeneratorFunction::ImageExtract
        {
            tracing::debug!(ticket, current = self.image_ticket, "Discarding stale image colors");
            return false;
        }
        match result {
            Ok(colors) if !colors.is_empty() => {
                self.seed_colors = colors;
                self.resample();
                true
            }
            Ok(_) => {
                tracing::warn!("Image yielded no colors");
                false
            }
            Err(e) => {
                tracing::warn!(%e, "Image color extraction failed");
                false
            }
        }
    }

    /// Perform the pending name request, if any.
    pub async fn resolve_names(&mut self, resolver: &dyn NameResolver) -> bool {
        let Some(request) = self.take_name_request() else {
            return false;
        };
        let result = resolver.resolve(&request.colors, &request.list).await;
        self.apply_names(request.ticket, result)
    }

    /// Perform the pending image extraction, if any.
    pub async fn extract_image(&mut self, extractor: &dyn ImageExtractor) -> bool {
        let Some(request) = self.take_image_request() else {
            return false;
        };
        let result = extractor
            .extract(&request.url, request.colors, request.quantization)
            .await;
        self.apply_image_colors(request.ticket, result)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed_colors(&self) -> &[Color] {
        &self.seed_colors
    }

    /// The unmirrored palette
    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// One name per palette color; hex values until names arrive.
    pub fn names(&self) -> Vec<String> {
        if self.names.len() == self.palette.len() {
            self.names.clone()
        } else {
            self.palette.iter().map(|c| c.to_hex()).collect()
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn contrast(&self) -> &ContrastMatrix {
        &self.contrast
    }

    pub fn mirrored(&self) -> MirroredViews {
        let map = MirrorMap::new(self.palette.len());
        MirroredViews {
            colors: map.apply(&self.palette).unwrap_or_default(),
            names: map.apply(&self.names()).unwrap_or_default(),
            contrast: map.apply(self.contrast.rows()).unwrap_or_default(),
        }
    }

    pub fn export(&self, format: ExportFormat) -> String {
        let mirrored = self.mirrored();
        export::export_palette(
            &mirrored.colors,
            &mirrored.names,
            format,
            self.settings.color_value_type,
        )
    }

    pub fn token(&self) -> String {
        encode_url_token(&self.settings)
    }

    pub fn share_url(&self) -> String {
        format!(
            "{}/?s={}",
            self.options.share_base_url.trim_end_matches('/'),
            self.token()
        )
    }

    pub fn animate_background_intro(&self) -> bool {
        self.settings.animate_background_intro
    }

    /// Whether the visible token supplied settings at startup
    pub fn had_settings_from_url(&self) -> bool {
        self.had_settings_from_url
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    fn generate(&mut self, new_seed: bool, push: bool) {
        if new_seed {
            self.settings.current_seed = random_seed();
        }
        self.random.reseed(&self.settings.current_seed);
        if push {
            self.update_url();
        } else {
            self.persist();
        }

        if self.settings.generator_function == GeneratorFunction::ImageExtract {
            // the previous seed colors stay until the image arrives
            let url = seed_image_url(
                &self.options.image_url_template,
                &self.settings.current_seed,
            );
            self.settings.img_url = url.clone();
            self.request_image(url);
            self.persist();
        } else {
            self.image_request = None;
            let options = self.settings.generator_options();
            self.seed_colors = generate_seed_colors(&mut self.random, &options);
        }
        self.resample();
    }

    fn resample(&mut self) {
        let interpolator = PaletteInterpolator::new(self.settings.interpolation_options());
        self.palette = interpolator.interpolate(&self.seed_colors);
        self.contrast = ContrastMatrix::build(&self.palette, self.settings.add_bw_contrast);
        tracing::debug!(
            seed = %self.settings.current_seed,
            amount = self.palette.len(),
            model = self.settings.interpolation_color_model.as_str(),
            "Generated palette"
        );
        self.request_names();
    }

    fn request_names(&mut self) {
        self.name_ticket += 1;
        self.name_request = Some(NameRequest {
            ticket: self.name_ticket,
            colors: self.palette.clone(),
            list: self.settings.name_list.clone(),
        });
    }

    fn request_image(&mut self, url: String) {
        self.image_ticket += 1;
        self.image_request = Some(ImageRequest {
            ticket: self.image_ticket,
            url,
            colors: self.settings.generator_options().parts,
            quantization: self.settings.quantization_method,
        });
    }

    fn update_url(&mut self) {
        if self.settings.track_settings_in_url {
            let token = self.token();
            if self.navigator.current_token().as_deref() != Some(token.as_str()) {
                self.navigator.push(HistoryState {
                    seed: self.settings.current_seed.clone(),
                    settings: Some(token),
                });
            }
        }
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.repository.save(&self.settings) {
            tracing::warn!(%e, key = self.repository.key(), "Failed to save settings");
        }
    }
}
