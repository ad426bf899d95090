pub mod export;
pub mod image_source;
pub mod name_cache;
pub mod name_service;
pub mod navigation;
pub mod preferences;
pub mod session;
pub mod settings_codec;
pub mod storage;

pub use image_source::{ImageExtractor, ImageRequest, NoImageExtractor};
pub use name_cache::NameCache;
pub use name_service::{ColorName, ColorPizzaClient, NameList, NameResolver, NameResponse, OfflineResolver};
pub use navigation::{HistoryState, InMemoryHistory, Navigator};
pub use preferences::{ColorSchemePreference, FixedPreference, TerminalPreference};
pub use session::{MirroredViews, NameRequest, PaletteSession, SessionOptions};
pub use storage::{FileStore, InMemoryStore, KeyValueStore, SettingsRepository};
