//! Integration tests for the palette endpoints.

mod common;

use axum::http::StatusCode;
use common::fixtures::{three_color_token, three_names, token};
use common::{assert_hex_colors, assert_json_error, assert_ok, assert_png, MockHttpServer, TestApp};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.get("/health").await;
    assert_ok(&response);
    assert_eq!(response.text(), "OK");
}

#[tokio::test]
async fn test_palette_without_token_is_random() {
    let app = TestApp::new();

    let first: serde_json::Value = app.get("/api/palette").await.json();
    let second: serde_json::Value = app.get("/api/palette").await.json();

    assert_eq!(first["colors"].as_array().unwrap().len(), 6);
    assert_ne!(
        first["settings"]["currentSeed"],
        second["settings"]["currentSeed"]
    );
}

#[tokio::test]
async fn test_palette_is_deterministic_for_a_token() {
    let app = TestApp::new();
    let path = format!("/api/palette?s={}", three_color_token());

    let first = app.get(&path).await;
    let second = app.get(&path).await;
    assert_ok(&first);

    let first: serde_json::Value = first.json();
    let second: serde_json::Value = second.json();
    assert_eq!(first["colors"], second["colors"]);
    assert_eq!(first["seed_colors"], second["seed_colors"]);
    assert_eq!(first["settings"]["currentSeed"], "fixture");
    assert_eq!(first["settings"]["amount"], 3);
}

#[tokio::test]
async fn test_palette_response_shape() {
    let app = TestApp::new();
    let path = format!("/api/palette?s={}", three_color_token());
    let json: serde_json::Value = app.get(&path).await.json();

    let colors = json["colors"].as_array().unwrap();
    assert_eq!(colors.len(), 3);
    for color in colors {
        // offline: the name falls back to the hex value
        assert_eq!(color["name"], color["hex"]);
        assert_eq!(color["value"], color["hex"]);
    }

    let mirrored = json["mirrored"]["colors"].as_array().unwrap();
    assert_eq!(mirrored.len(), 8);
    assert_hex_colors(mirrored);
    assert_eq!(mirrored[0], colors[0]["hex"]);
    assert_eq!(mirrored[2], colors[2]["hex"]);
    assert_eq!(mirrored[4], colors[0]["hex"]);

    assert_eq!(json["contrast"].as_array().unwrap().len(), 3);
    assert_eq!(json["mirrored"]["contrast"].as_array().unwrap().len(), 8);
    assert_eq!(json["names_resolved"], false);
    assert_eq!(json["title"], "Double Rainbow");
    assert!(json["gradient_stops"].as_str().unwrap().contains(" 12vh"));
    assert!(json["share_url"]
        .as_str()
        .unwrap()
        .starts_with("https://farbvelo.elastiq.ch/?s="));
}

#[tokio::test]
async fn test_palette_token_round_trips() {
    let app = TestApp::new();
    let path = format!("/api/palette?s={}", three_color_token());
    let json: serde_json::Value = app.get(&path).await.json();

    let again = format!("/api/palette?s={}", json["token"].as_str().unwrap());
    let second: serde_json::Value = app.get(&again).await.json();
    assert_eq!(json["colors"], second["colors"]);
}

#[tokio::test]
async fn test_palette_clamps_token_values() {
    let app = TestApp::new();
    let path = format!(
        "/api/palette?s={}",
        token(serde_json::json!({"s": "clamp", "a": 99, "cg": 1}))
    );
    let json: serde_json::Value = app.get(&path).await.json();

    assert_eq!(json["settings"]["amount"], 10);
    assert_eq!(json["settings"]["colorsInGradient"], 2);
    assert_eq!(json["colors"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_palette_invalid_token_is_bad_request() {
    let app = TestApp::new();
    let response = app.get("/api/palette?s=%21%21not-base64%21%21").await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_palette_is_not_cached() {
    let app = TestApp::new();
    let response = app.get("/api/palette").await;
    assert_eq!(response.header("cache-control"), Some("no-store"));
}

#[tokio::test]
async fn test_palette_uses_resolved_names() {
    let mock = MockHttpServer::start().await;
    mock.mock_names("bestOf", three_names()).await;

    let app = TestApp::with_name_service(&mock.url());
    let path = format!("/api/palette?s={}", three_color_token());
    let json: serde_json::Value = app.get(&path).await.json();

    assert_eq!(json["names_resolved"], true);
    assert_eq!(json["title"], "Quiet Harbour");
    assert_eq!(json["colors"][0]["name"], "Harbour Fog");
    assert_eq!(json["colors"][2]["name"], "Lamp Oil");
    assert_eq!(json["mirrored"]["names"][4], "Harbour Fog");
}

#[tokio::test]
async fn test_palette_survives_name_service_errors() {
    let mock = MockHttpServer::start().await;
    mock.mock_error("/", 503, "unavailable").await;

    let app = TestApp::with_name_service(&mock.url());
    let path = format!("/api/palette?s={}", three_color_token());
    let response = app.get(&path).await;
    assert_ok(&response);

    let json: serde_json::Value = response.json();
    assert_eq!(json["names_resolved"], false);
    assert_eq!(json["colors"][0]["name"], json["colors"][0]["hex"]);
}

#[tokio::test]
async fn test_export_list() {
    let app = TestApp::new();
    let path = format!("/api/palette/export?s={}&format=list", three_color_token());
    let response = app.get(&path).await;
    assert_ok(&response);
    assert_eq!(
        response.header("content-type"),
        Some("text/plain; charset=utf-8")
    );

    let lines: Vec<String> = response.text().lines().map(str::to_string).collect();
    assert_eq!(lines.len(), 8);
    assert!(lines.iter().all(|l| l.starts_with('#')));
    assert_eq!(lines[0], lines[4]);
}

#[tokio::test]
async fn test_export_defaults_to_js_array() {
    let app = TestApp::new();
    let path = format!("/api/palette/export?s={}", three_color_token());
    let text = app.get(&path).await.text();

    assert!(text.starts_with("[\n  \"#"));
    assert!(text.ends_with("\"\n]"));
}

#[tokio::test]
async fn test_export_with_value_type() {
    let app = TestApp::new();
    let path = format!(
        "/api/palette/export?s={}&format=css&value_type=rgb",
        three_color_token()
    );
    let text = app.get(&path).await.text();

    for line in text.lines() {
        // hex fallback names are escaped as css identifiers
        assert!(line.starts_with("--\\#"), "unexpected line {line}");
        assert!(line.contains(": rgb("), "unexpected line {line}");
        assert!(line.ends_with(");"), "unexpected line {line}");
    }
}

#[tokio::test]
async fn test_export_unknown_format() {
    let app = TestApp::new();
    let response = app.get("/api/palette/export?format=yaml").await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json();
    assert_eq!(json["error"], "Unknown export format: yaml");
}

#[tokio::test]
async fn test_svg_swatch() {
    let app = TestApp::new();
    let path = format!("/api/palette/svg?s={}&hard_stops=true", three_color_token());
    let response = app.get(&path).await;
    assert_ok(&response);
    assert_eq!(response.header("content-type"), Some("image/svg+xml"));

    let svg = response.text();
    assert!(svg.starts_with("<svg"));
    // two stops per mirrored color
    assert_eq!(svg.matches("<stop ").count(), 16);
}

#[tokio::test]
async fn test_svg_with_background() {
    let app = TestApp::new();
    let path = format!(
        "/api/palette/svg?s={}&background=%23ffffff",
        three_color_token()
    );
    let svg = app.get(&path).await.text();
    assert!(svg.contains("#ffffff"));
}

#[tokio::test]
async fn test_svg_bad_background() {
    let app = TestApp::new();
    let response = app.get("/api/palette/svg?background=notacolor").await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_png_swatch() {
    let app = TestApp::new();
    let path = format!("/api/palette/png?s={}&size=64", three_color_token());
    let response = app.get(&path).await;
    assert_png(&response);
}

#[tokio::test]
async fn test_png_rejects_oversized() {
    let app = TestApp::new();
    let response = app.get("/api/palette/png?size=5000").await;
    assert_json_error(&response, StatusCode::BAD_REQUEST);
}
