pub mod lists;
pub mod palette;
pub mod settings;

pub use lists::{handle_lists, __path_handle_lists};
pub use palette::{__path_handle_export, __path_handle_palette, __path_handle_png, __path_handle_svg};
pub use palette::{
    handle_export, handle_palette, handle_png, handle_svg, MirroredPalette, PaletteColor,
    PaletteResponse,
};
pub use settings::{__path_handle_create_token, __path_handle_settings};
pub use settings::{handle_create_token, handle_settings, SettingsResponse, TokenResponse};

use std::sync::Arc;

use farbe::Color;

use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{
    settings_codec, FixedPreference, ImageExtractor, InMemoryHistory, InMemoryStore,
    NameResolver, PaletteSession, SessionOptions,
};

/// A request-scoped session showing `token`.
///
/// Requests share nothing: each gets an empty store and a history holding
/// only the token. A token that does not decode is a client error here.
pub(crate) fn load_session(
    config: &AppConfig,
    token: Option<&str>,
) -> Result<PaletteSession, ApiError> {
    let token = token.filter(|t| !t.is_empty());
    if let Some(token) = token {
        settings_codec::decode_url_token(token)?;
    }

    Ok(PaletteSession::restore(
        Arc::new(InMemoryStore::new()),
        InMemoryHistory::new(token.map(str::to_string)),
        &FixedPreference(false),
        SessionOptions::from_config(config),
    ))
}

/// Run the session's pending requests; returns whether names arrived.
pub(crate) async fn settle(
    session: &mut PaletteSession,
    resolver: &dyn NameResolver,
    images: &dyn ImageExtractor,
) -> bool {
    session.extract_image(images).await;
    session.resolve_names(resolver).await
}

pub(crate) fn hex_all(colors: &[Color]) -> Vec<String> {
    colors.iter().map(|c| c.to_hex()).collect()
}

pub(crate) fn hex_rows(rows: &[Vec<Option<Color>>]) -> Vec<Vec<Option<String>>> {
    rows.iter()
        .map(|row| row.iter().map(|c| c.map(|c| c.to_hex())).collect())
        .collect()
}
