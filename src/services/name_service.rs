//! Color name resolution
//!
//! [`NameResolver`] is the port the palette session asks for names. The
//! production implementation is [`ColorPizzaClient`], which talks to the
//! public color name API and caches its answers in a [`NameCache`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use utoipa::ToSchema;

use farbe::Color;

use crate::error::NameError;
use crate::models::NamesConfig;
use crate::services::name_cache::{compute_cache_key, NameCache};

/// Header the name API uses to attribute requests
pub const REFERRER_HEADER: &str = "X-Referrer";

/// A resolved color name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ColorName {
    pub name: String,
    pub hex: String,
}

/// Names for a palette, in palette order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NameResponse {
    #[serde(default)]
    pub palette_title: String,
    pub colors: Vec<ColorName>,
}

impl NameResponse {
    pub fn names(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.name.clone()).collect()
    }
}

/// A selectable name list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NameList {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListsResponse {
    list_descriptions: BTreeMap<String, NameList>,
}

/// Trait for color name lookup
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Names for `colors` from `list`, one per color.
    async fn resolve(&self, colors: &[Color], list: &str) -> Result<NameResponse, NameError>;

    /// Lists large enough to name a palette.
    async fn lists(&self) -> Result<Vec<NameList>, NameError>;
}

/// Client for the color name API
#[derive(Clone)]
pub struct ColorPizzaClient {
    client: reqwest::Client,
    config: NamesConfig,
    cache: Arc<NameCache>,
}

impl ColorPizzaClient {
    pub fn new(config: NamesConfig, cache: Arc<NameCache>) -> Result<Self, NameError> {
        let mut headers = HeaderMap::new();
        let referrer = HeaderValue::from_str(&config.referrer)
            .map_err(|e| NameError::Config(format!("invalid referrer: {e}")))?;
        headers.insert(REFERRER_HEADER, referrer);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            config,
            cache,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl NameResolver for ColorPizzaClient {
    async fn resolve(&self, colors: &[Color], list: &str) -> Result<NameResponse, NameError> {
        let cache_key = compute_cache_key(list, colors);
        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached);
        }

        let values = colors
            .iter()
            .map(|c| c.hex_digits())
            .collect::<Vec<_>>()
            .join(",");
        let url = self.endpoint("");

        tracing::debug!(%url, list, %values, "Requesting color names");

        let response = self
            .client
            .get(&url)
            .query(&[("noduplicates", "true"), ("list", list), ("values", values.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), list, "Name service request failed");
            return Err(NameError::Status(status.as_u16()));
        }

        let names: NameResponse = response.json().await?;
        tracing::info!(
            title = %names.palette_title,
            count = names.colors.len(),
            "Resolved color names"
        );
        self.cache.store(cache_key, names.clone());
        Ok(names)
    }

    async fn lists(&self) -> Result<Vec<NameList>, NameError> {
        let url = self.endpoint("lists/");
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NameError::Status(status.as_u16()));
        }

        let body: ListsResponse = response.json().await?;
        let min_colors = self.config.min_list_colors;
        Ok(body
            .list_descriptions
            .into_iter()
            .filter(|(_, list)| list.color_count > min_colors)
            .map(|(key, mut list)| {
                list.key = key;
                list
            })
            .collect())
    }
}

/// Resolver used when no name service is reachable
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineResolver;

#[async_trait]
impl NameResolver for OfflineResolver {
    async fn resolve(&self, _colors: &[Color], _list: &str) -> Result<NameResponse, NameError> {
        Err(NameError::Offline)
    }

    async fn lists(&self) -> Result<Vec<NameList>, NameError> {
        Err(NameError::Offline)
    }
}
