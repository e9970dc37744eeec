//! User preferences
//!
//! Sound and language survive restarts. Stored as JSON in the platform data
//! directory; anything unreadable is replaced by defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lang::Language;

/// Current preferences version for compatibility
const PREFS_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub version: u32,
    pub sound_enabled: bool,
    pub language: Language,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            version: PREFS_VERSION,
            sound_enabled: true,
            language: Language::En,
        }
    }
}

/// `preferences.json` in the platform data dir, or the working directory
pub fn preferences_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "apogea", "Apogea") {
        let mut path = proj_dirs.data_local_dir().to_path_buf();
        path.push("preferences.json");
        path
    } else {
        PathBuf::from("./preferences.json")
    }
}

/// Load preferences from `path`, or defaults
pub fn load_preferences(path: &Path) -> Preferences {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str::<Preferences>(&data) {
                Ok(prefs) if prefs.version <= PREFS_VERSION => {
                    log::info!("Preferences loaded from {:?}", path);
                    return prefs;
                }
                Ok(prefs) => {
                    log::warn!("Preferences version {} not supported, using defaults", prefs.version);
                }
                Err(e) => {
                    log::warn!("Failed to parse preferences: {}, using defaults", e);
                }
            },
            Err(e) => {
                log::warn!("Failed to read preferences: {}, using defaults", e);
            }
        }
    }

    Preferences::default()
}

pub fn save_preferences(path: &Path, prefs: &Preferences) -> Result<(), PrefsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| PrefsError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = serde_json::to_string_pretty(prefs)?;
    fs::write(path, json).map_err(|source| PrefsError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Preferences saved to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("apogea-prefs-{}-{}", name, std::process::id()))
            .join("preferences.json")
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_file("roundtrip");
        let prefs = Preferences {
            sound_enabled: false,
            language: Language::PtBr,
            ..Default::default()
        };
        save_preferences(&path, &prefs).unwrap();
        assert_eq!(load_preferences(&path), prefs);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_garbage_gives_defaults() {
        let path = scratch_file("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_preferences(&path), Preferences::default());

        fs::write(&path, r#"{"version": 99, "sound_enabled": false}"#).unwrap();
        assert_eq!(load_preferences(&path), Preferences::default());
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"language": "pt-br"}"#).unwrap();
        assert_eq!(prefs.language, Language::PtBr);
        assert!(prefs.sound_enabled);
        assert_eq!(prefs.version, PREFS_VERSION);
    }
}
