use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use farbe::{contrast_tint, text_color_for, Color};

use crate::api::{hex_all, hex_rows, load_session, settle};
use crate::error::ApiError;
use crate::models::{AppConfig, ColorValueType, ExportFormat, Settings};
use crate::rendering::swatch::{self, Swatch};
use crate::services::export::{self, format_value};
use crate::services::{ImageExtractor, NameResolver, PaletteSession};

/// Share token query
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaletteQuery {
    /// Settings token; a random palette without one
    pub s: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExportQuery {
    pub s: Option<String>,
    /// list, csvList, jsArray, jsObject, css or cssGradient
    pub format: Option<String>,
    /// hex, rgb, hsl or cmyk
    pub value_type: Option<ColorValueType>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SwatchQuery {
    pub s: Option<String>,
    /// Edge length in pixels (16-2048, default 100)
    pub size: Option<u32>,
    /// Empty share of each side (default 0.1)
    pub padding: Option<f64>,
    /// Equal bands instead of a smooth gradient
    pub hard_stops: Option<bool>,
    /// Background color; transparent when absent
    pub background: Option<String>,
}

/// One palette entry
#[derive(Debug, Serialize, ToSchema)]
pub struct PaletteColor {
    pub hex: String,
    pub name: String,
    /// The color in the requested value type
    pub value: String,
    /// Text color for captions on this swatch
    pub text_color: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MirroredPalette {
    pub colors: Vec<String>,
    pub names: Vec<String>,
    pub contrast: Vec<Vec<Option<String>>>,
    pub gradient_stops: String,
    pub hard_stops: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaletteResponse {
    pub token: String,
    pub share_url: String,
    pub title: String,
    /// Whether the names came from the name service
    pub names_resolved: bool,
    pub settings: Settings,
    pub seed_colors: Vec<String>,
    pub colors: Vec<PaletteColor>,
    /// Comparison colors, one per contrast column
    pub contrast_columns: Vec<String>,
    /// Per palette color: the comparison colors passing WCAG AA
    pub contrast: Vec<Vec<Option<String>>>,
    pub gradient_stops: String,
    pub hard_stops: String,
    pub first_text_color: String,
    pub last_text_color: String,
    pub mirrored: MirroredPalette,
}

impl PaletteResponse {
    fn from_session(session: &PaletteSession, names_resolved: bool) -> Self {
        let settings = session.settings();
        let palette = session.palette();
        let names = session.names();
        let mirrored = session.mirrored();
        let caption = |color: Option<&Color>| {
            color
                .map(|&c| text_color_for(c).to_hex())
                .unwrap_or_else(|| "#212121".to_string())
        };

        Self {
            token: session.token(),
            share_url: session.share_url(),
            title: session.title().to_string(),
            names_resolved,
            settings: settings.clone(),
            seed_colors: hex_all(session.seed_colors()),
            colors: palette
                .iter()
                .zip(&names)
                .map(|(&color, name)| PaletteColor {
                    hex: color.to_hex(),
                    name: name.clone(),
                    value: format_value(color, settings.color_value_type),
                    text_color: contrast_tint(color).to_hex(),
                })
                .collect(),
            contrast_columns: hex_all(session.contrast().columns()),
            contrast: hex_rows(session.contrast().rows()),
            gradient_stops: export::gradient_stops(palette, settings.same_height_colors),
            hard_stops: export::hard_stops(palette),
            first_text_color: caption(palette.first()),
            last_text_color: caption(palette.last()),
            mirrored: MirroredPalette {
                gradient_stops: export::mirrored_gradient_stops(
                    &mirrored.colors,
                    settings.same_height_colors,
                ),
                hard_stops: export::mirrored_hard_stops(&mirrored.colors),
                colors: hex_all(&mirrored.colors),
                names: mirrored.names,
                contrast: hex_rows(&mirrored.contrast),
            },
        }
    }
}

/// Generate a palette
///
/// Builds the palette for a settings token together with its mirrored
/// views, contrast matrix and names. A name service failure leaves the
/// hex values as names.
#[utoipa::path(
    get,
    path = "/api/palette",
    params(PaletteQuery),
    responses(
        (status = 200, description = "Palette for the token", body = PaletteResponse),
        (status = 400, description = "Invalid settings token"),
    ),
    tag = "Palette"
)]
pub async fn handle_palette(
    State(config): State<Arc<AppConfig>>,
    State(resolver): State<Arc<dyn NameResolver>>,
    State(images): State<Arc<dyn ImageExtractor>>,
    Query(query): Query<PaletteQuery>,
) -> Result<Json<PaletteResponse>, ApiError> {
    let mut session = load_session(&config, query.s.as_deref())?;
    let names_resolved = settle(&mut session, resolver.as_ref(), images.as_ref()).await;

    tracing::info!(
        seed = %session.settings().current_seed,
        amount = session.palette().len(),
        names_resolved,
        "Served palette"
    );
    Ok(Json(PaletteResponse::from_session(&session, names_resolved)))
}

/// Export a palette as text
#[utoipa::path(
    get,
    path = "/api/palette/export",
    params(ExportQuery),
    responses(
        (status = 200, description = "Exported palette", content_type = "text/plain"),
        (status = 400, description = "Invalid token or unknown format"),
    ),
    tag = "Palette"
)]
pub async fn handle_export(
    State(config): State<Arc<AppConfig>>,
    State(resolver): State<Arc<dyn NameResolver>>,
    State(images): State<Arc<dyn ImageExtractor>>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let format = query
        .format
        .as_deref()
        .map(|f| f.parse::<ExportFormat>().map_err(ApiError::UnknownFormat))
        .transpose()?;

    let mut session = load_session(&config, query.s.as_deref())?;
    if let Some(value_type) = query.value_type {
        session.update(|s| s.color_value_type = value_type);
    }
    settle(&mut session, resolver.as_ref(), images.as_ref()).await;

    let format = format.unwrap_or(session.settings().export_as);
    let body = session.export(format);
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response())
}

/// Palette swatch as SVG
#[utoipa::path(
    get,
    path = "/api/palette/svg",
    params(SwatchQuery),
    responses(
        (status = 200, description = "SVG swatch", content_type = "image/svg+xml"),
        (status = 400, description = "Invalid parameters"),
    ),
    tag = "Palette"
)]
pub async fn handle_svg(
    State(config): State<Arc<AppConfig>>,
    State(images): State<Arc<dyn ImageExtractor>>,
    Query(query): Query<SwatchQuery>,
) -> Result<Response, ApiError> {
    let swatch = swatch_from_query(&query)?;
    swatch.validate()?;
    let colors = swatch_colors(&config, images.as_ref(), query.s.as_deref()).await?;

    Ok((
        [(header::CONTENT_TYPE, "image/svg+xml")],
        swatch.to_svg(&colors),
    )
        .into_response())
}

/// Palette swatch as PNG
#[utoipa::path(
    get,
    path = "/api/palette/png",
    params(SwatchQuery),
    responses(
        (status = 200, description = "PNG swatch", content_type = "image/png"),
        (status = 400, description = "Invalid parameters"),
    ),
    tag = "Palette"
)]
pub async fn handle_png(
    State(config): State<Arc<AppConfig>>,
    State(images): State<Arc<dyn ImageExtractor>>,
    Query(query): Query<SwatchQuery>,
) -> Result<Response, ApiError> {
    let swatch = swatch_from_query(&query)?;
    swatch.validate()?;
    let colors = swatch_colors(&config, images.as_ref(), query.s.as_deref()).await?;

    let png = tokio::task::spawn_blocking(move || swatch.to_png(&colors))
        .await
        .map_err(|e| ApiError::Internal(format!("render task failed: {e}")))??;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

fn swatch_from_query(query: &SwatchQuery) -> Result<Swatch, ApiError> {
    let background = query
        .background
        .as_deref()
        .map(|b| {
            b.parse::<Color>()
                .map_err(|e| ApiError::BadRequest(format!("background: {e}")))
        })
        .transpose()?;

    Ok(Swatch {
        size: query.size.unwrap_or(swatch::DEFAULT_SIZE),
        padding: query.padding.unwrap_or(swatch::DEFAULT_PADDING),
        hard_stops: query.hard_stops.unwrap_or(false),
        background,
    })
}

async fn swatch_colors(
    config: &AppConfig,
    images: &dyn ImageExtractor,
    token: Option<&str>,
) -> Result<Vec<Color>, ApiError> {
    let mut session = load_session(config, token)?;
    session.extract_image(images).await;
    Ok(session.mirrored().colors)
}
