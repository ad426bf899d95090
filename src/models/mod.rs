pub mod config;
pub mod settings;

pub use config::{AppConfig, ImageConfig, NamesConfig, ShareConfig, StorageConfig};
pub use settings::{
    random_seed, ColorValueType, ExportFormat, QuantizationMethod, Settings, SettingsPatch,
};
