//! Trait tree data model

pub mod skill;
pub mod graph;

pub use graph::{Connection, Tree};
pub use skill::{Category, Position, Prerequisite, Requirement, Skill, SkillKey, Threshold};
