//! Settings <-> share token and persisted record
//!
//! Two whitelists define what leaves the process. The URL whitelist is
//! keyed by short codes and travels as a token: the JSON object of those
//! keys, base64 encoded with the URL-safe alphabet and no padding. The
//! storage whitelist is keyed by prop name and is persisted as plain JSON.
//!
//! Decoding is tolerant. Unknown keys are ignored, each whitelisted value
//! goes through its declared coercion, and a value the coercion rejects is
//! left out of the resulting patch.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine;
use percent_encoding::percent_decode_str;
use serde_json::{Map, Number, Value};

use crate::error::CodecError;
use crate::models::{Settings, SettingsPatch};

/// Type conversion applied to a decoded value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Leading integer of a string, or a truncated number
    Int,
    /// Leading decimal of a string, or the number
    Float,
    /// JavaScript truthiness
    Bool,
}

/// One whitelisted setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedSetting {
    /// Short key used in tokens
    pub key: &'static str,
    /// Prop name on [`Settings`]
    pub prop: &'static str,
    pub coercion: Option<Coercion>,
}

const fn tracked(
    key: &'static str,
    prop: &'static str,
    coercion: Option<Coercion>,
) -> TrackedSetting {
    TrackedSetting {
        key,
        prop,
        coercion,
    }
}

use Coercion::{Bool, Float, Int};

/// Settings carried by share tokens, in token order.
pub const URL_SETTINGS: [TrackedSetting; 10] = [
    tracked("s", "currentSeed", None),
    tracked("a", "amount", Some(Int)),
    tracked("cg", "colorsInGradient", Some(Int)),
    tracked("p", "padding", Some(Float)),
    tracked("md", "minHueDistance", Some(Int)),
    tracked("cm", "interpolationColorModel", None),
    tracked("f", "generatorFunction", None),
    tracked("c", "colorMode", None),
    tracked("qm", "quantizationMethod", None),
    tracked("ro", "randomOrder", Some(Bool)),
];

/// Settings kept in the persisted store, in record order.
pub const STORAGE_SETTINGS: [TrackedSetting; 24] = [
    tracked("a", "amount", Some(Int)),
    tracked("cg", "colorsInGradient", Some(Int)),
    tracked("hg", "hasGradients", Some(Bool)),
    tracked("hb", "hasBackground", Some(Bool)),
    tracked("ho", "hasOutlines", Some(Bool)),
    tracked("hc", "highContrast", Some(Bool)),
    tracked("ht", "hideText", Some(Bool)),
    tracked("b", "hasBleed", Some(Bool)),
    tracked("p", "padding", Some(Float)),
    tracked("md", "minHueDistance", Some(Int)),
    tracked("cm", "interpolationColorModel", None),
    tracked("f", "generatorFunction", None),
    tracked("c", "colorMode", None),
    tracked("sc", "showContrast", Some(Bool)),
    tracked("bw", "addBWContrast", Some(Bool)),
    tracked("ah", "autoHideUI", Some(Bool)),
    tracked("iu", "imgURL", None),
    tracked("lm", "lightmode", Some(Bool)),
    tracked("sm", "sameHeightColors", Some(Bool)),
    tracked("cv", "colorValueType", None),
    tracked("qm", "quantizationMethod", None),
    tracked("nl", "nameList", None),
    tracked("ts", "trackSettingsInURL", Some(Bool)),
    tracked("ro", "randomOrder", Some(Bool)),
];

/// A decoded share token
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedToken {
    /// Coerced values keyed by prop name
    pub patch: SettingsPatch,
    /// Whether the token explicitly turned the background on (`hb`)
    pub background_intro: bool,
}

/// Encode the URL-whitelisted settings as a share token.
pub fn encode_url_token(settings: &Settings) -> String {
    let props = settings.to_map();
    let state: Map<String, Value> = URL_SETTINGS
        .iter()
        .filter_map(|s| props.get(s.prop).map(|v| (s.key.to_string(), v.clone())))
        .collect();
    URL_SAFE_NO_PAD.encode(Value::Object(state).to_string())
}

/// Decode a share token into a settings patch.
///
/// Accepts the URL-safe and the standard base64 alphabet, with or without
/// padding, percent-encoded or not, and tolerates `+` turned into a space
/// by query-string decoding.
pub fn decode_url_token(token: &str) -> Result<DecodedToken, CodecError> {
    let state = decode_payload(token)?;
    let patch = URL_SETTINGS
        .iter()
        .filter_map(|s| {
            let value = state.get(s.key)?;
            coerce_with(value, s.coercion).map(|v| (s.prop.to_string(), v))
        })
        .collect();
    let background_intro = state.get("hb").is_some_and(is_truthy);
    Ok(DecodedToken {
        patch,
        background_intro,
    })
}

/// Decode the token of a history entry.
///
/// Reads the token the same way as a share link, so `false` and `0` are
/// restored like any other value. The `hb` flag has no meaning here.
pub fn decode_history_token(token: &str) -> Result<SettingsPatch, CodecError> {
    decode_url_token(token).map(|decoded| decoded.patch)
}

/// Serialize the storage-whitelisted settings for the persisted store.
pub fn encode_storage(settings: &Settings) -> String {
    let props = settings.to_map();
    let record: Map<String, Value> = STORAGE_SETTINGS
        .iter()
        .filter_map(|s| props.get(s.prop).map(|v| (s.prop.to_string(), v.clone())))
        .collect();
    Value::Object(record).to_string()
}

/// Parse a persisted record into a settings patch.
pub fn decode_storage(raw: &str) -> Result<SettingsPatch, CodecError> {
    let record = match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => map,
        _ => return Err(CodecError::NotAnObject),
    };
    Ok(STORAGE_SETTINGS
        .iter()
        .filter_map(|s| {
            let value = record.get(s.prop)?;
            coerce_with(value, s.coercion).map(|v| (s.prop.to_string(), v))
        })
        .collect())
}

fn decode_payload(token: &str) -> Result<Map<String, Value>, CodecError> {
    let token = percent_decode_str(token.trim()).decode_utf8_lossy();
    let normalized: String = token
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            ' ' | '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    let bytes = STANDARD_NO_PAD.decode(normalized)?;
    let json = String::from_utf8(bytes)?;
    match serde_json::from_str::<Value>(&json)? {
        Value::Object(map) => Ok(map),
        _ => Err(CodecError::NotAnObject),
    }
}

fn coerce_with(value: &Value, coercion: Option<Coercion>) -> Option<Value> {
    match coercion {
        Some(c) => coerce(value, c),
        None => Some(value.clone()),
    }
}

/// Apply a coercion; `None` when the value has no such reading.
pub fn coerce(value: &Value, coercion: Coercion) -> Option<Value> {
    match coercion {
        Coercion::Int => parse_int(value).map(Value::from),
        Coercion::Float => parse_float(value)
            .and_then(Number::from_f64)
            .map(Value::Number),
        Coercion::Bool => Some(Value::Bool(is_truthy(value))),
    }
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i),
            None => n
                .as_f64()
                .filter(|f| f.is_finite() && f.abs() < 1e18)
                .map(|f| f.trunc() as i64),
        },
        Value::String(s) => {
            let s = s.trim_start();
            let end = numeric_prefix(s, false);
            s[..end].parse().ok()
        }
        _ => None,
    }
}

fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim_start();
            let end = numeric_prefix(s, true);
            s[..end].parse().ok().filter(|f: &f64| f.is_finite())
        }
        _ => None,
    }
}

/// Length of the leading `[+-]digits[.digits][e[+-]digits]` of `s`.
fn numeric_prefix(s: &str, decimal: bool) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if !decimal {
        return if has_digits { end } else { 0 };
    }

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits = true;
            end = frac_end;
        }
    }
    if !has_digits {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    end
}
