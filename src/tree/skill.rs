//! Skill nodes
//!
//! A skill is one upgradeable node of a trait tree. Everything except the
//! current level is static and comes from the tree definition.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Stable handle to a skill: tree index plus skill index inside that tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SkillKey {
    pub tree: usize,
    pub skill: usize,
}

impl SkillKey {
    pub fn new(tree: usize, skill: usize) -> Self {
        Self { tree, skill }
    }
}

/// Layout coordinate in percent of the tree area (0..=100 on both axes)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Both axes finite and within 0..=100
    pub fn in_bounds(&self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

/// Display tier of a skill. No gating semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Base,
    Normal,
    Ultimate,
    Legendary,
}

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Base => "Base",
            Category::Normal => "Normal",
            Category::Ultimate => "Ultimate",
            Category::Legendary => "Legendary",
        }
    }

    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Category::Base => (200, 200, 200),
            Category::Normal => (90, 170, 255),
            Category::Ultimate => (190, 90, 240),
            Category::Legendary => (255, 170, 30),
        }
    }
}

/// Informational value shown for one level of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Threshold {
    /// Character level at which this skill level is usually taken
    Level(u32),
    /// Binary skill: the single level simply activates it
    Active,
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Level(n) => write!(f, "{}", n),
            Threshold::Active => write!(f, "Active"),
        }
    }
}

/// Requirement as written in tree data: `"skill-id"` or `"skill-id:level"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Requirement {
    pub skill: String,
    pub level: u32,
}

impl Requirement {
    pub fn new(skill: impl Into<String>, level: u32) -> Self {
        Self {
            skill: skill.into(),
            level,
        }
    }
}

impl FromStr for Requirement {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || DataError::BadRequirement(s.to_string());
        let (skill, level) = match s.split_once(':') {
            Some((skill, level)) => {
                let level: u32 = level.trim().parse().map_err(|_| bad())?;
                (skill.trim(), level)
            }
            None => (s.trim(), 1),
        };
        if skill.is_empty() || level == 0 {
            return Err(bad());
        }
        Ok(Requirement::new(skill, level))
    }
}

impl TryFrom<String> for Requirement {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Requirement> for String {
    fn from(req: Requirement) -> Self {
        req.to_string()
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.skill, self.level)
    }
}

/// Requirement resolved against the owning tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prerequisite {
    /// Index of the required skill in the same tree
    pub skill: usize,
    /// Minimum level the required skill must have
    pub level: u32,
}

/// A skill node with its session level
#[derive(Debug, Clone, PartialEq)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub effect: String,
    pub icon: char,
    pub tier: u8,
    pub position: Position,
    pub category: Category,
    pub thresholds: Vec<Threshold>,
    pub requires: Vec<Prerequisite>,
    max_level: u32,
    level: u32,
}

impl Skill {
    /// Build a skill at level 0. Validation happens in [`crate::tree::Tree::from_def`].
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: String,
        name: String,
        description: String,
        effect: String,
        icon: char,
        tier: u8,
        position: Position,
        category: Category,
        thresholds: Vec<Threshold>,
        requires: Vec<Prerequisite>,
        max_level: u32,
    ) -> Self {
        Self {
            id,
            name,
            description,
            effect,
            icon,
            tier,
            position,
            category,
            thresholds,
            requires,
            max_level,
            level: 0,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn is_maxed(&self) -> bool {
        self.level >= self.max_level
    }

    /// At least one point invested
    pub fn is_active(&self) -> bool {
        self.level > 0
    }

    pub(crate) fn raise(&mut self) {
        debug_assert!(self.level < self.max_level);
        self.level += 1;
    }

    pub(crate) fn lower(&mut self) {
        debug_assert!(self.level > 0);
        self.level -= 1;
    }

    /// Clear the level, returning the points it held
    pub(crate) fn clear(&mut self) -> u32 {
        std::mem::take(&mut self.level)
    }
}
