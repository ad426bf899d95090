//! Persisted settings store
//!
//! [`KeyValueStore`] is the string-keyed store the settings record lives
//! in. [`SettingsRepository`] owns the record: it reads and writes the
//! storage projection of [`Settings`] and discards a record it cannot
//! decode.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::models::{Settings, SettingsPatch};
use crate::services::settings_codec;

/// Trait for string-keyed persistent storage
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

/// Storage in a JSON file holding one object of string entries
///
/// Every call reads the file, so several processes can share it.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content)
            .map_err(|_| StorageError::Corrupt(self.path.display().to_string()))
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        // a corrupt file cannot be edited, so it is replaced
        let mut entries = self.read_entries().unwrap_or_default();
        entries.remove(key);
        self.write_entries(&entries)
    }
}

/// The persisted settings record
#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted settings.
    ///
    /// A missing record is an empty patch. A record that cannot be decoded
    /// is removed from the store and also yields an empty patch.
    pub fn load(&self) -> SettingsPatch {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SettingsPatch::new(),
            Err(e) => {
                tracing::warn!(%e, key = %self.key, "Failed to read stored settings");
                self.discard();
                return SettingsPatch::new();
            }
        };

        match settings_codec::decode_storage(&raw) {
            Ok(patch) => {
                tracing::debug!(key = %self.key, fields = patch.len(), "Loaded stored settings");
                patch
            }
            Err(e) => {
                tracing::warn!(%e, key = %self.key, "Discarding corrupt stored settings");
                self.discard();
                SettingsPatch::new()
            }
        }
    }

    /// Persist the storage projection of `settings`.
    pub fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        self.store
            .set(&self.key, &settings_codec::encode_storage(settings))
    }

    fn discard(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            tracing::warn!(%e, key = %self.key, "Failed to clear stored settings");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("store.json");

        FileStore::new(&path).set("a", "1").unwrap();
        FileStore::new(&path).set("b", "2").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("a").unwrap(), Some("1".to_string()));
        assert_eq!(store.get("b").unwrap(), Some("2".to_string()));

        store.remove("a").unwrap();
        assert_eq!(FileStore::new(&path).get("a").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("missing.json"));
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(store.get("a"), Err(StorageError::Corrupt(_))));

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
    }

    #[test]
    fn test_repository_round_trip() {
        let store = Arc::new(InMemoryStore::new());
        let repository = SettingsRepository::new(store.clone(), "farbveloSettings");

        let mut settings = Settings::with_seed("s");
        settings.amount = 8;
        settings.hide_text = true;
        repository.save(&settings).unwrap();

        let patch = repository.load();
        let mut restored = Settings::with_seed("s");
        restored.apply_patch(&patch);
        assert_eq!(restored.amount, 8);
        assert!(restored.hide_text);
        assert!(store.get("farbveloSettings").unwrap().is_some());
    }

    #[test]
    fn test_repository_clears_corrupt_record() {
        let store = Arc::new(InMemoryStore::new());
        store.set("farbveloSettings", "{\"amount\": ").unwrap();
        let repository = SettingsRepository::new(store.clone(), "farbveloSettings");

        assert!(repository.load().is_empty());
        assert_eq!(store.get("farbveloSettings").unwrap(), None);
    }

    #[test]
    fn test_repository_missing_record() {
        let repository = SettingsRepository::new(Arc::new(InMemoryStore::new()), "k");
        assert!(repository.load().is_empty());
    }

    #[test]
    fn test_repository_on_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "garbage").unwrap();

        let store = Arc::new(FileStore::new(&path));
        let repository = SettingsRepository::new(store.clone(), "farbveloSettings");
        assert!(repository.load().is_empty());
        // the broken file was replaced by an empty store
        assert_eq!(store.get("farbveloSettings").unwrap(), None);

        repository.save(&Settings::with_seed("s")).unwrap();
        assert!(store.get("farbveloSettings").unwrap().is_some());
    }
}
