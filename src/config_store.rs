use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Settings;
use crate::error::{LoglinkError, Result};
use crate::interfaces::settings::{SettingsStore, TokenProvider};

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| LoglinkError::Runtime(e.to_string()))?;
        }
    }
    Ok(())
}

/// Settings kept as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> Result<Settings> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "settings file missing, using defaults");
                return Ok(Settings::default());
            }
            Err(err) => return Err(LoglinkError::Config(err.to_string())),
        };
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_json::from_str(&content).map_err(|e| LoglinkError::Config(e.to_string()))
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        ensure_parent_dir(&self.path)?;
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| LoglinkError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| LoglinkError::Runtime(e.to_string()))?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

impl TokenProvider for JsonSettingsStore {
    fn token(&self) -> Result<String> {
        Ok(self.load()?.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path().join("absent.json"));
        assert_eq!(store.load().unwrap(), Settings::default());
        assert_eq!(store.token().unwrap(), "");
    }

    #[test]
    fn save_creates_parent_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::new(dir.path().join("nested").join("loglink.json"));
        store
            .save(&Settings {
                token: "telegramabcdefgh123456".to_string(),
            })
            .unwrap();
        assert_eq!(store.token().unwrap(), "telegramabcdefgh123456");
    }

    #[test]
    fn corrupt_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loglink.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = JsonSettingsStore::new(path).load().unwrap_err();
        assert!(matches!(err, LoglinkError::Config(_)));
    }
}
