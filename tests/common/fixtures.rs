//! Test fixtures and settings tokens.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Encode a JSON object of short keys as a share token
pub fn token(state: serde_json::Value) -> String {
    URL_SAFE_NO_PAD.encode(state.to_string())
}

/// Token for seed "fixture" with three colors
pub fn three_color_token() -> String {
    token(serde_json::json!({"s": "fixture", "a": 3}))
}

/// Name service answer for a three-color palette
pub fn three_names() -> serde_json::Value {
    serde_json::json!({
        "paletteTitle": "Quiet Harbour",
        "colors": [
            {"name": "Harbour Fog", "hex": "#a0a0a0"},
            {"name": "Tide Pool", "hex": "#204060"},
            {"name": "Lamp Oil", "hex": "#e0c080"}
        ]
    })
}

/// Name list overview as served by the name service
pub fn list_descriptions() -> serde_json::Value {
    serde_json::json!({
        "listDescriptions": {
            "bestOf": {
                "title": "Best of Color Names",
                "description": "Best color names selected from various sources.",
                "colorCount": 4541,
                "license": "MIT"
            },
            "basic": {
                "title": "Basic",
                "description": "A list of basic colors.",
                "colorCount": 21
            },
            "wikipedia": {
                "title": "Wikipedia",
                "description": "Colors from Wikipedia.",
                "colorCount": 1297,
                "url": "https://en.wikipedia.org/wiki/List_of_colors_(compact)"
            }
        }
    })
}
