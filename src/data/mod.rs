//! Static content and tuning
//!
//! Trait trees and planner settings live in RON files so trees can be
//! filled in without recompiling; compiled-in defaults cover missing or
//! broken files.

pub mod config;
pub mod loader;
pub mod trees;

pub use config::PlannerConfig;
pub use loader::{export_default_data, validate_trees, DataManager, DEFAULT_DATA_DIR};
pub use trees::{default_tree_defs, ConnectionDef, ConnectionKind, SkillDef, TreeDef, TreeDefs};
