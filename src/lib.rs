//! APOGEA companion planner
//!
//! Class picker, stat allocator and trait-tree planner for the terminal.
//! The trait engine enforces prerequisites and the shared point budget;
//! the UI only reads from it.

pub mod data;
pub mod error;
pub mod game;
pub mod lang;
pub mod progression;
pub mod render;
pub mod save;
pub mod tree;
pub mod ui;

// Re-export commonly used types
pub use error::{DataError, DenyReason, PlanError};
pub use game::{Planner, Screen, StartOptions};
pub use progression::{Budget, ClassKind, SkillState, StatKind, StatSheet, TraitEngine};
pub use tree::{Skill, SkillKey, Tree};
