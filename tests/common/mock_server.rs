//! Mock color name API for testing the name client.

use wiremock::{
    matchers::{header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockHttpServer {
    pub server: MockServer,
}

impl MockHttpServer {
    /// Start a new mock HTTP server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of the mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Mock the names endpoint for palettes drawn from `list`
    pub async fn mock_names(&self, list: &str, response: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("list", list))
            .and(query_param("noduplicates", "true"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(response)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock the names endpoint, expecting exactly `calls` requests
    pub async fn mock_names_expect(&self, response: serde_json::Value, calls: u64) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .expect(calls)
            .mount(&self.server)
            .await;
    }

    /// Mock the names endpoint, requiring the given header
    pub async fn mock_names_with_header(
        &self,
        name: &str,
        value: &str,
        response: serde_json::Value,
    ) {
        Mock::given(method("GET"))
            .and(path("/"))
            .and(header(name, value))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .mount(&self.server)
            .await;
    }

    /// Mock the list overview endpoint
    pub async fn mock_lists(&self, response: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/lists/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response))
            .mount(&self.server)
            .await;
    }

    /// Mock an endpoint that returns an error
    pub async fn mock_error(&self, endpoint: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }
}
