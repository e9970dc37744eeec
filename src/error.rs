//! Error types shared by the planner core
//!
//! Every rejected operation is reported as a value; none of these abort the
//! session and none leave partially applied state behind.

use thiserror::Error;

/// Why an upgrade was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DenyReason {
    /// No unspent points left in the budget
    NoPoints,
    /// At least one prerequisite is below its required level
    PrereqUnmet,
    /// The skill is already at its maximum level
    AlreadyMax,
}

impl DenyReason {
    /// Translation key for the feedback message
    pub fn message_key(&self) -> &'static str {
        match self {
            DenyReason::NoPoints => "feedback.noPoints",
            DenyReason::PrereqUnmet => "feedback.prereqUnmet",
            DenyReason::AlreadyMax => "feedback.alreadyMax",
        }
    }
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenyReason::NoPoints => write!(f, "no points available"),
            DenyReason::PrereqUnmet => write!(f, "prerequisites not met"),
            DenyReason::AlreadyMax => write!(f, "already at max level"),
        }
    }
}

/// Errors returned by budget, engine and stat-sheet operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("upgrade denied: {0}")]
    UpgradeDenied(DenyReason),

    #[error("downgrade blocked by {}", .dependents.join(", "))]
    DowngradeBlocked { dependents: Vec<String> },

    #[error("level change would exceed the budget by {deficit} point(s)")]
    WouldExceedBudget { deficit: u32 },

    #[error("invalid level {value}: must be between 1 and 100")]
    InvalidLevel { value: i32 },

    #[error("nothing to remove: {0} has no points")]
    NotAllocated(String),

    #[error("input ignored: {0} changed too recently")]
    Throttled(String),

    #[error("stat {0} cannot be edited")]
    StatLocked(String),

    #[error("stat {stat} is capped at {cap} point(s) for this level")]
    StatCapped { stat: String, cap: u32 },

    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    #[error("unknown tree: {0}")]
    UnknownTree(String),
}

/// Errors raised while loading or validating static content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    #[error("tree {tree}: duplicate skill id {skill}")]
    DuplicateSkill { tree: String, skill: String },

    #[error("duplicate tree key {0}")]
    DuplicateTree(String),

    #[error("tree {tree}: skill {skill} must have a max level of at least 1")]
    ZeroMaxLevel { tree: String, skill: String },

    #[error("tree {tree}: skill {skill} has {found} threshold(s) for {expected} level(s)")]
    ThresholdCount {
        tree: String,
        skill: String,
        expected: u32,
        found: usize,
    },

    #[error("tree {tree}: skill {skill} requires unknown skill {required}")]
    UnknownRequirement {
        tree: String,
        skill: String,
        required: String,
    },

    #[error("tree {tree}: skill {skill} cannot require itself")]
    SelfRequirement { tree: String, skill: String },

    #[error("tree {tree}: skill {skill} requires {required} at level {level}, above its max of {max}")]
    RequirementAboveMax {
        tree: String,
        skill: String,
        required: String,
        level: u32,
        max: u32,
    },

    #[error("tree {tree}: requirement cycle through {}", .skills.join(", "))]
    CyclicRequirement { tree: String, skills: Vec<String> },

    #[error("tree {tree}: skill {skill} is placed at {position}, outside 0..=100")]
    InvalidPosition {
        tree: String,
        skill: String,
        position: String,
    },

    #[error("tree {tree}: connection {from} -> {to} references an unknown skill")]
    UnknownConnection { tree: String, from: String, to: String },

    #[error("malformed requirement {0:?}: expected \"skill-id\" or \"skill-id:level\"")]
    BadRequirement(String),

    #[error("invalid planner config: {0}")]
    InvalidConfig(String),

    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_message_lists_dependents() {
        let err = PlanError::DowngradeBlocked {
            dependents: vec!["berserker".to_string(), "wrecking-it".to_string()],
        };
        assert_eq!(err.to_string(), "downgrade blocked by berserker, wrecking-it");
    }

    #[test]
    fn test_deny_reason_display() {
        let err = PlanError::UpgradeDenied(DenyReason::NoPoints);
        assert_eq!(err.to_string(), "upgrade denied: no points available");
    }
}
