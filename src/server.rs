//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{Query, State},
    http::{header::CACHE_CONTROL, HeaderValue},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::api::palette::{ExportQuery, PaletteQuery, SwatchQuery};
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::{AppConfig, SettingsPatch};
use crate::services::{
    ColorPizzaClient, ImageExtractor, NameCache, NameResolver, NoImageExtractor,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub resolver: Arc<dyn NameResolver>,
    pub images: Arc<dyn ImageExtractor>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        resolver: Arc<dyn NameResolver>,
        images: Arc<dyn ImageExtractor>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            resolver,
            images,
        }
    }
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);
    let cache = Arc::new(NameCache::new(Duration::from_secs(
        config.names.cache_ttl_secs,
    )));
    let resolver = ColorPizzaClient::new(config.names.clone(), cache)
        .map_err(|e| anyhow::anyhow!("Failed to create name client: {e}"))?;

    Ok(AppState::new(
        config,
        Arc::new(resolver),
        Arc::new(NoImageExtractor),
    ))
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/palette", get(handle_palette))
        .route("/api/palette/export", get(handle_export))
        .route("/api/palette/svg", get(handle_svg))
        .route("/api/palette/png", get(handle_png))
        .route("/api/settings", get(handle_settings))
        .route("/api/settings/token", post(handle_create_token))
        .route("/api/lists", get(handle_lists))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // a request without a token yields a new random palette every time
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_palette(
    State(state): State<AppState>,
    query: Query<PaletteQuery>,
) -> Result<Json<api::PaletteResponse>, ApiError> {
    api::handle_palette(
        State(state.config),
        State(state.resolver),
        State(state.images),
        query,
    )
    .await
}

async fn handle_export(
    State(state): State<AppState>,
    query: Query<ExportQuery>,
) -> Result<Response, ApiError> {
    api::handle_export(
        State(state.config),
        State(state.resolver),
        State(state.images),
        query,
    )
    .await
}

async fn handle_svg(
    State(state): State<AppState>,
    query: Query<SwatchQuery>,
) -> Result<Response, ApiError> {
    api::handle_svg(State(state.config), State(state.images), query).await
}

async fn handle_png(
    State(state): State<AppState>,
    query: Query<SwatchQuery>,
) -> Result<Response, ApiError> {
    api::handle_png(State(state.config), State(state.images), query).await
}

async fn handle_settings(
    State(state): State<AppState>,
    query: Query<PaletteQuery>,
) -> Result<Json<api::SettingsResponse>, ApiError> {
    api::handle_settings(State(state.config), query).await
}

async fn handle_create_token(
    State(state): State<AppState>,
    body: Json<SettingsPatch>,
) -> Result<impl IntoResponse, ApiError> {
    api::handle_create_token(State(state.config), body).await
}

async fn handle_lists(
    State(state): State<AppState>,
) -> Result<Json<Vec<crate::services::NameList>>, ApiError> {
    api::handle_lists(State(state.resolver)).await
}
