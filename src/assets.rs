//! Configuration asset loading with an embedded fallback
//!
//! - If `CONFIG_FILE` is NOT set: use the embedded `config.yaml` only
//! - If `CONFIG_FILE` IS set and the file exists: use the file
//! - If `CONFIG_FILE` IS set and the file is missing: fall back to embedded

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Config loader with optional filesystem override
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `config_file` should be `Some` only if `CONFIG_FILE` was set.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Read the config, preferring the external file when it exists
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Where the config is read from, for status output
    pub fn config_source(&self) -> String {
        match self.config_file {
            Some(ref path) if path.exists() => path.display().to_string(),
            Some(_) => "embedded (file not found)".to_string(),
            None => "embedded".to_string(),
        }
    }

    /// Write the embedded config to the configured path (or `./config.yaml`)
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();
        let path = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("./config.yaml"));

        if !force && path.exists() {
            report.skipped.push(path.display().to_string());
            return Ok(report);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if let Some(data) = EmbeddedConfig::get("config.yaml") {
            fs::write(&path, &*data.data)?;
            report.written.push(path.display().to_string());
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_present() {
        let loader = AssetLoader::new(None);
        let config = loader.read_config_string().unwrap();
        assert!(config.contains("farbveloSettings"));
        assert_eq!(loader.config_source(), "embedded");
    }

    #[test]
    fn test_missing_external_config_falls_back() {
        let loader = AssetLoader::new(Some(PathBuf::from("/nonexistent/config.yaml")));
        assert!(loader.read_config().is_ok());
        assert_eq!(loader.config_source(), "embedded (file not found)");
    }

    #[test]
    fn test_external_config_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "share:\n  base_url: \"http://localhost\"\n").unwrap();

        let loader = AssetLoader::new(Some(path.clone()));
        let config = loader.read_config_string().unwrap();
        assert!(config.contains("http://localhost"));
        assert_eq!(loader.config_source(), path.display().to_string());
    }

    #[test]
    fn test_init_writes_then_skips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let loader = AssetLoader::new(Some(path.clone()));

        let first = loader.init(false).unwrap();
        assert_eq!(first.written.len(), 1);
        assert!(path.exists());

        let second = loader.init(false).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.skipped.len(), 1);

        let forced = loader.init(true).unwrap();
        assert_eq!(forced.written.len(), 1);
    }
}
