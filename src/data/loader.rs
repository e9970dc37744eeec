//! RON data loader
//!
//! Loads trait trees and planner settings from external RON files, with
//! fallback to the compiled-in defaults.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::DataError;
use crate::tree::Tree;

use super::config::PlannerConfig;
use super::trees::{default_tree_defs, TreeDefs};

/// Where data files live unless `--data-dir` says otherwise
pub const DEFAULT_DATA_DIR: &str = "assets/data";

const TREES_FILE: &str = "trees.ron";
const CONFIG_FILE: &str = "planner.ron";

/// All external planner data
#[derive(Debug, Clone, PartialEq)]
pub struct DataManager {
    /// Trait trees in navigation order
    pub trees: TreeDefs,
    /// Budget and input tuning
    pub config: PlannerConfig,
}

impl DataManager {
    /// Load from `assets/data/`, using defaults for anything missing or invalid
    pub fn new() -> Self {
        Self::load_from(Path::new(DEFAULT_DATA_DIR))
    }

    /// Load from `base_path`, using defaults for anything missing or invalid
    pub fn load_from(base_path: &Path) -> Self {
        let trees = Self::load_trees(base_path).unwrap_or_else(|e| {
            log::warn!("{}. Using built-in trait trees.", e);
            default_tree_defs()
        });
        let config = Self::load_config(base_path).unwrap_or_else(|e| {
            log::warn!("{}. Using default planner settings.", e);
            PlannerConfig::default()
        });
        log::info!(
            "Loaded {} trait tree(s) from {}",
            trees.trees.len(),
            base_path.display()
        );
        Self { trees, config }
    }

    /// Read and validate `trees.ron`
    fn load_trees(base_path: &Path) -> Result<TreeDefs, DataError> {
        let path = base_path.join(TREES_FILE);
        let Some(defs) = read_ron::<TreeDefs>(&path)? else {
            return Ok(default_tree_defs());
        };
        validate_trees(&defs)?;
        Ok(defs)
    }

    /// Read and validate `planner.ron`
    fn load_config(base_path: &Path) -> Result<PlannerConfig, DataError> {
        let path = base_path.join(CONFIG_FILE);
        let Some(config) = read_ron::<PlannerConfig>(&path)? else {
            return Ok(PlannerConfig::default());
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for DataManager {
    fn default() -> Self {
        Self {
            trees: default_tree_defs(),
            config: PlannerConfig::default(),
        }
    }
}

/// Check every tree builds and tree keys are unique
pub fn validate_trees(defs: &TreeDefs) -> Result<(), DataError> {
    let mut keys = HashSet::new();
    for def in &defs.trees {
        if !keys.insert(def.key.as_str()) {
            return Err(DataError::DuplicateTree(def.key.clone()));
        }
        Tree::from_def(def)?;
    }
    Ok(())
}

/// `Ok(None)` when the file does not exist
fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DataError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    ron::from_str(&content).map(Some).map_err(|e| DataError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn write_ron<T: Serialize>(path: &Path, value: &T) -> Result<(), DataError> {
    let io_err = |reason: String| DataError::Io {
        path: path.display().to_string(),
        reason,
    };
    let text = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|e| io_err(e.to_string()))?;
    fs::write(path, text).map_err(|e| io_err(e.to_string()))
}

/// Export the default trees and settings to RON files for editing.
/// Returns the files written.
pub fn export_default_data(base_path: &Path) -> Result<Vec<PathBuf>, DataError> {
    if !base_path.exists() {
        fs::create_dir_all(base_path).map_err(|e| DataError::Io {
            path: base_path.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    let trees_path = base_path.join(TREES_FILE);
    write_ron(&trees_path, &default_tree_defs())?;

    let config_path = base_path.join(CONFIG_FILE);
    write_ron(&config_path, &PlannerConfig::default())?;

    Ok(vec![trees_path, config_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::trees::axe_tree;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("apogea-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_export_then_load() {
        let dir = scratch_dir("export");
        let written = export_default_data(&dir).unwrap();
        assert_eq!(written.len(), 2);
        assert!(dir.join("trees.ron").exists(), "trees.ron not created");
        assert!(dir.join("planner.ron").exists(), "planner.ron not created");

        let manager = DataManager::load_from(&dir);
        assert_eq!(manager, DataManager::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_dir_uses_defaults() {
        let manager = DataManager::load_from(Path::new("/nonexistent/apogea/data"));
        assert_eq!(manager.trees.trees.len(), 10);
        assert_eq!(manager.config, PlannerConfig::default());
    }

    #[test]
    fn test_invalid_trees_fall_back() {
        let dir = scratch_dir("invalid");
        fs::create_dir_all(&dir).unwrap();

        let mut broken = axe_tree();
        broken.skills[1].requires.push(crate::tree::Requirement::new("nope", 1));
        write_ron(&dir.join(TREES_FILE), &TreeDefs { trees: vec![broken] }).unwrap();
        fs::write(dir.join(CONFIG_FILE), "(points_divisor: 0)").unwrap();

        let manager = DataManager::load_from(&dir);
        assert_eq!(manager.trees, default_tree_defs());
        assert_eq!(manager.config, PlannerConfig::default());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cyclic_trees_fall_back() {
        let mut looped = axe_tree();
        // steady-bloodflow already requires going-big
        looped.skills[0].requires.push(crate::tree::Requirement::new("steady-bloodflow", 1));
        let defs = TreeDefs { trees: vec![looped] };
        assert!(matches!(
            validate_trees(&defs),
            Err(DataError::CyclicRequirement { .. })
        ));

        let dir = scratch_dir("cyclic");
        fs::create_dir_all(&dir).unwrap();
        write_ron(&dir.join(TREES_FILE), &defs).unwrap();
        let manager = DataManager::load_from(&dir);
        assert_eq!(manager.trees, default_tree_defs());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_custom_trees_are_kept() {
        let dir = scratch_dir("custom");
        fs::create_dir_all(&dir).unwrap();
        let custom = TreeDefs { trees: vec![axe_tree()] };
        write_ron(&dir.join(TREES_FILE), &custom).unwrap();
        fs::write(dir.join(CONFIG_FILE), "(default_level: 20, cooldown_ms: 100)").unwrap();

        let manager = DataManager::load_from(&dir);
        assert_eq!(manager.trees, custom);
        assert_eq!(manager.config.default_level, 20);
        assert_eq!(manager.config.cap_level, 80);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_duplicate_tree_keys_rejected() {
        let defs = TreeDefs { trees: vec![axe_tree(), axe_tree()] };
        assert_eq!(validate_trees(&defs), Err(DataError::DuplicateTree("axe".to_string())));
    }
}
