//! Single-slot local storage in the data directory.
//!
//! A corrupt or missing slot reads as "nothing saved" so a bad cache never
//! blocks printing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::write_atomic;
use crate::error::GafeteError;
use crate::label::Configuration;

const CONFIG_FILE: &str = "label-config.json";
const PREFERENCES_FILE: &str = "preferences.json";

fn default_printer() -> String {
    "Xprinter".to_string()
}

fn default_station() -> String {
    "N1".to_string()
}

/// Per-workstation settings remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Printer name exactly as the operating system lists it.
    #[serde(default = "default_printer")]
    pub printer: String,
    /// Check-in station label recorded with each check-in.
    #[serde(default = "default_station")]
    pub station: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            printer: default_printer(),
            station: default_station(),
        }
    }
}

/// Local durable storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<platform data dir>/gafete`, if the platform has one.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("gafete"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    fn preferences_path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILE)
    }

    /// Overwrite the slot.
    pub fn save(&self, config: &Configuration) -> Result<(), GafeteError> {
        let json = serde_json::to_vec_pretty(config)?;
        write_atomic(&self.config_path(), &json)?;
        tracing::debug!(path = %self.config_path().display(), "saved local label configuration");
        Ok(())
    }

    /// Read the slot. Missing or unreadable content is `None`.
    pub fn load(&self) -> Option<Configuration> {
        let path = self.config_path();
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read local label configuration");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt local label configuration");
                None
            }
        }
    }

    /// Saved preferences, or defaults when none are readable.
    pub fn load_preferences(&self) -> Preferences {
        std::fs::read(self.preferences_path())
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default()
    }

    pub fn save_preferences(&self, preferences: &Preferences) -> Result<(), GafeteError> {
        let json = serde_json::to_vec_pretty(preferences)?;
        write_atomic(&self.preferences_path(), &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{ElementId, LayoutElement};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_load_empty_slot() {
        let dir = TempDir::new().unwrap();
        assert_eq!(LocalStore::new(dir.path()).load(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path().join("nested"));
        let mut config = Configuration::new("Local");
        let mut el = LayoutElement::text(ElementId::Company, "ACME", &config.styles.company);
        el.selected = true;
        config.elements.push(el);

        store.save(&config).unwrap();
        let loaded = store.load().unwrap();

        config.elements[0].selected = false;
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        store.save(&Configuration::new("first")).unwrap();
        store.save(&Configuration::new("second")).unwrap();
        assert_eq!(store.load().unwrap().name, "second");
    }

    #[test]
    fn test_corrupt_slot_reads_as_none() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(LocalStore::new(dir.path()).load(), None);
    }

    #[test]
    fn test_preferences_default_and_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path());
        assert_eq!(store.load_preferences(), Preferences::default());

        let prefs = Preferences {
            printer: "Zebra GK420".into(),
            station: "N3".into(),
        };
        store.save_preferences(&prefs).unwrap();
        assert_eq!(store.load_preferences(), prefs);
    }
}
