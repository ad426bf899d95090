use crate::assets::AssetLoader;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Color name service
    #[serde(default)]
    pub names: NamesConfig,

    /// Share link construction
    #[serde(default)]
    pub share: ShareConfig,

    /// Image source for the ImageExtract generator
    #[serde(default)]
    pub image: ImageConfig,

    /// Persisted settings record
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NamesConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Value of the X-Referrer header
    #[serde(default = "default_referrer")]
    pub referrer: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Lists with this many colors or fewer are hidden
    #[serde(default = "default_min_list_colors")]
    pub min_list_colors: u32,

    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_api_url() -> String {
    "https://api.color.pizza/v1".to_string()
}

fn default_referrer() -> String {
    "https://farbvelo.elastiq.ch/".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_min_list_colors() -> u32 {
    150
}

fn default_cache_ttl() -> u64 {
    3600 // 1 hour
}

impl Default for NamesConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            referrer: default_referrer(),
            timeout_secs: default_timeout(),
            min_list_colors: default_min_list_colors(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

impl NamesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ShareConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://farbvelo.elastiq.ch".to_string()
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImageConfig {
    /// `{seed}` is replaced with the percent-encoded seed
    #[serde(default = "default_seed_url_template")]
    pub seed_url_template: String,
}

fn default_seed_url_template() -> String {
    "https://picsum.photos/seed/{seed}/650/966".to_string()
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            seed_url_template: default_seed_url_template(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_key() -> String {
    "farbveloSettings".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        names_api = %config.names.api_url,
                        share_base = %config.share.base_url,
                        storage_key = %config.storage.key,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Share link for a settings token
    pub fn share_url(&self, token: &str) -> String {
        format!("{}/?s={}", self.share.base_url.trim_end_matches('/'), token)
    }
}
