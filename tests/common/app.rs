//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use farbvelo::models::{AppConfig, NamesConfig};
use farbvelo::server::{build_router, AppState};
use farbvelo::services::{ColorPizzaClient, NameCache, NoImageExtractor, OfflineResolver};

/// Test application wrapping the production router
pub struct TestApp {
    router: axum::Router,
}

impl TestApp {
    /// Create a test application without a name service
    pub fn new() -> Self {
        let state = AppState::new(
            AppConfig::default(),
            Arc::new(OfflineResolver),
            Arc::new(NoImageExtractor),
        );
        Self {
            router: build_router(state),
        }
    }

    /// Create a test application whose name service lives at `api_url`
    pub fn with_name_service(api_url: &str) -> Self {
        let config = AppConfig {
            names: NamesConfig {
                api_url: api_url.to_string(),
                ..NamesConfig::default()
            },
            ..AppConfig::default()
        };
        let cache = Arc::new(NameCache::new(Duration::from_secs(60)));
        let client = ColorPizzaClient::new(config.names.clone(), cache)
            .expect("Failed to create name client");
        let state = AppState::new(config, Arc::new(client), Arc::new(NoImageExtractor));
        Self {
            router: build_router(state),
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
