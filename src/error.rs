use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid settings token: {0}")]
    InvalidToken(#[from] CodecError),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),

    #[error("{0}")]
    InvalidSetting(#[from] SettingsError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Name service error: {0}")]
    Names(#[from] NameError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures decoding a settings token or a persisted settings record.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("payload is not JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("payload is not a JSON object")]
    NotAnObject,
}

/// A settings value that could not be applied.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Unknown setting: {0}")]
    UnknownField(String),

    #[error("Invalid value for {prop}: {message}")]
    InvalidValue { prop: String, message: String },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file is corrupt: {0}")]
    Corrupt(String),

    #[error("Store unavailable: {0}")]
    Unavailable(&'static str),
}

#[derive(Debug, Error)]
pub enum NameError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Name service returned status {0}")]
    Status(u16),

    #[error("Invalid name service configuration: {0}")]
    Config(String),

    #[error("Name service is offline")]
    Offline,
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("No image extractor configured")]
    Unavailable,

    #[error("Image extraction failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidToken(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::UnknownFormat(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::InvalidSetting(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Names(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            ApiError::Render(RenderError::UnsupportedDimensions { .. }) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Render(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_unknown_format() {
        let error = ApiError::UnknownFormat("yaml".to_string());
        assert_eq!(error.to_string(), "Unknown export format: yaml");
    }

    #[test]
    fn test_api_error_invalid_token() {
        let error = ApiError::from(CodecError::NotAnObject);
        assert_eq!(
            error.to_string(),
            "Invalid settings token: payload is not a JSON object"
        );
    }

    #[test]
    fn test_api_error_internal() {
        let error = ApiError::Internal("lock poisoned".to_string());
        assert_eq!(error.to_string(), "Internal error: lock poisoned");
    }

    #[test]
    fn test_settings_error_invalid_value() {
        let error = SettingsError::InvalidValue {
            prop: "colorMode".to_string(),
            message: "unknown variant".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid value for colorMode: unknown variant"
        );
    }

    #[test]
    fn test_storage_error_corrupt() {
        let error = StorageError::Corrupt("state.json".to_string());
        assert_eq!(error.to_string(), "Store file is corrupt: state.json");
    }

    #[test]
    fn test_name_error_status() {
        let error = NameError::Status(503);
        assert_eq!(error.to_string(), "Name service returned status 503");
    }

    #[test]
    fn test_render_error_unsupported_dimensions() {
        let error = RenderError::UnsupportedDimensions {
            width: 9999,
            height: 9999,
        };
        assert_eq!(error.to_string(), "Unsupported dimensions: 9999x9999");
    }

    #[test]
    fn test_render_error_pixmap_allocation() {
        let error = RenderError::PixmapAllocation;
        assert_eq!(error.to_string(), "Failed to allocate pixmap");
    }

    #[test]
    fn test_render_error_converts_to_api_error() {
        let render_error = RenderError::SvgParse("bad".to_string());
        let api_error: ApiError = render_error.into();
        assert!(matches!(api_error, ApiError::Render(_)));
    }

    #[test]
    fn test_invalid_token_is_bad_request() {
        let response = ApiError::InvalidToken(CodecError::NotAnObject).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_format_is_bad_request() {
        let response = ApiError::UnknownFormat("x".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_oversized_swatch_is_bad_request() {
        let response = ApiError::Render(RenderError::UnsupportedDimensions {
            width: 10_000,
            height: 10_000,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_render_error_is_internal() {
        let response = ApiError::Render(RenderError::PixmapAllocation).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
