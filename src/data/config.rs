//! Planner tuning values
//!
//! Loaded from `planner.ron` next to the tree data, falling back to the
//! defaults below.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::progression::budget::{PointFormula, MAX_LEVEL, MIN_LEVEL};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Levels above this grant no extra trait points
    pub cap_level: u32,
    /// Levels per trait point
    pub points_divisor: u32,
    /// Character level the trait planner starts at
    pub default_level: u32,
    /// Cooldown between two changes of the same skill, in milliseconds
    pub cooldown_ms: u64,
    /// Stat points granted per level above 1
    pub stat_points_per_level: u32,
    /// Character level the stat sheet starts at
    pub stat_default_level: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            cap_level: 80,
            points_divisor: 2,
            // 30 trait points
            default_level: 60,
            cooldown_ms: 60,
            stat_points_per_level: 3,
            stat_default_level: 1,
        }
    }
}

impl PlannerConfig {
    pub fn trait_formula(&self) -> PointFormula {
        PointFormula::Capped {
            cap_level: self.cap_level,
            divisor: self.points_divisor,
        }
    }

    pub fn stat_formula(&self) -> PointFormula {
        PointFormula::PerLevel {
            per_level: self.stat_points_per_level,
        }
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        let level_range = MIN_LEVEL..=MAX_LEVEL;
        if self.points_divisor == 0 {
            return Err(DataError::InvalidConfig("points_divisor must be at least 1".into()));
        }
        if !level_range.contains(&self.cap_level) {
            return Err(DataError::InvalidConfig(format!(
                "cap_level {} outside {}..={}",
                self.cap_level, MIN_LEVEL, MAX_LEVEL
            )));
        }
        for (name, level) in [
            ("default_level", self.default_level),
            ("stat_default_level", self.stat_default_level),
        ] {
            if !level_range.contains(&level) {
                return Err(DataError::InvalidConfig(format!(
                    "{} {} outside {}..={}",
                    name, level, MIN_LEVEL, MAX_LEVEL
                )));
            }
        }
        Ok(())
    }
}
