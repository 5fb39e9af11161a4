//! File-backed settings persistence.
//!
//! A flat string key-value map stored as pretty-printed JSON under the
//! user's config directory. Persistence is best effort: a missing or
//! malformed file starts empty, and write failures are logged rather than
//! surfaced, since saved settings are a convenience, not authoritative
//! state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use carousel_core::SettingsStore;
use thiserror::Error;

/// Directory under the user config dir holding the settings file.
const APP_DIR: &str = "carousel-studio";
/// Settings file name.
const SETTINGS_FILE: &str = "settings.json";

/// Errors locating or creating the settings file.
#[derive(Debug, Error)]
pub enum SettingsStoreError {
    /// The platform reports no user configuration directory.
    #[error("no user configuration directory available")]
    MissingConfigDir,

    /// The settings directory could not be created.
    #[error("failed to prepare settings directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Flat key-value settings store persisted as a JSON file.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileSettingsStore {
    /// Open the store at its standard location,
    /// `<config_dir>/carousel-studio/settings.json`, creating the
    /// directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsStoreError::MissingConfigDir`] when the platform
    /// has no config directory, or [`SettingsStoreError::Io`] if the
    /// directory cannot be created.
    pub fn open_default() -> Result<Self, SettingsStoreError> {
        let dir = dirs::config_dir()
            .ok_or(SettingsStoreError::MissingConfigDir)?
            .join(APP_DIR);
        std::fs::create_dir_all(&dir)?;
        Ok(Self::open(dir.join(SETTINGS_FILE)))
    }

    /// Open a store backed by an explicit file path, loading any existing
    /// contents. A missing or unparsable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!("Failed to parse settings file {}: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        let json = match serde_json::to_string_pretty(&self.values) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize settings: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            tracing::warn!("Failed to write settings file {}: {e}", self.path.display());
        }
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        self.persist();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_core::StudioSettings;

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileSettingsStore::open(dir.path().join("settings.json"));
        assert_eq!(store.get("temperature"), None);
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");

        let mut store = FileSettingsStore::open(&path);
        store.set("temperature", "1.4");
        store.set("caption_prompt", "keep it short");

        let reopened = FileSettingsStore::open(&path);
        assert_eq!(reopened.get("temperature").as_deref(), Some("1.4"));
        assert_eq!(reopened.get("caption_prompt").as_deref(), Some("keep it short"));
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");

        let mut store = FileSettingsStore::open(&path);
        store.set("temperature", "1.4");
        store.remove("temperature");

        let reopened = FileSettingsStore::open(&path);
        assert_eq!(reopened.get("temperature"), None);
    }

    #[test]
    fn test_malformed_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").expect("write");

        let store = FileSettingsStore::open(&path);
        assert_eq!(store.get("temperature"), None);
    }

    #[test]
    fn test_studio_settings_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");

        let mut store = FileSettingsStore::open(&path);
        let settings = StudioSettings {
            image_prompt_instruction: "plan differently".to_string(),
            caption_instruction: "write differently".to_string(),
            temperature: 1.1,
        };
        settings.save(&mut store);

        let reopened = FileSettingsStore::open(&path);
        assert_eq!(StudioSettings::load(&reopened), settings);

        let mut reopened = reopened;
        StudioSettings::reset(&mut reopened);
        assert_eq!(
            StudioSettings::load(&FileSettingsStore::open(&path)),
            StudioSettings::default()
        );
    }
}
