use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::load_session;
use crate::api::palette::PaletteQuery;
use crate::error::ApiError;
use crate::models::{AppConfig, Settings, SettingsPatch};
use crate::services::settings_codec;

#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub settings: Settings,
    /// Whether the token supplied any settings
    pub from_token: bool,
    pub animate_background_intro: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
    pub url: String,
}

/// Settings for a token
///
/// Defaults overlaid with the token's values, clamped into range.
#[utoipa::path(
    get,
    path = "/api/settings",
    params(PaletteQuery),
    responses(
        (status = 200, description = "Merged settings", body = SettingsResponse),
        (status = 400, description = "Invalid settings token"),
    ),
    tag = "Settings"
)]
pub async fn handle_settings(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<PaletteQuery>,
) -> Result<Json<SettingsResponse>, ApiError> {
    let session = load_session(&config, query.s.as_deref())?;
    Ok(Json(SettingsResponse {
        settings: session.settings().clone(),
        from_token: session.had_settings_from_url(),
        animate_background_intro: session.animate_background_intro(),
    }))
}

/// Create a share token
///
/// Takes a JSON object of settings keyed by prop name. Props not given
/// keep their defaults; without `currentSeed` a random seed is drawn.
#[utoipa::path(
    post,
    path = "/api/settings/token",
    request_body(content = Settings, description = "Settings keyed by prop name; every prop is optional"),
    responses(
        (status = 200, description = "Token and share link", body = TokenResponse),
        (status = 400, description = "Unknown prop or invalid value"),
    ),
    tag = "Settings"
)]
pub async fn handle_create_token(
    State(config): State<Arc<AppConfig>>,
    Json(patch): Json<SettingsPatch>,
) -> Result<Json<TokenResponse>, ApiError> {
    let mut settings = Settings::default();
    for (prop, value) in patch {
        settings.apply(&prop, value)?;
    }
    settings.normalize();

    let token = settings_codec::encode_url_token(&settings);
    tracing::debug!(seed = %settings.current_seed, "Created settings token");
    Ok(Json(TokenResponse {
        url: config.share_url(&token),
        token,
    }))
}
