//! Point budget
//!
//! Derives allocatable points from character level and tracks how many are
//! spent. Level math lives here in the spirit of the XP helpers: small pure
//! functions plus one value object that owns the mutable counters.

use serde::{Deserialize, Serialize};

use crate::error::{DenyReason, PlanError};

/// Lowest selectable character level
pub const MIN_LEVEL: u32 = 1;
/// Highest selectable character level
pub const MAX_LEVEL: u32 = 100;

/// How a level turns into points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointFormula {
    /// `floor(min(level, cap_level) / divisor)` (trait trees)
    Capped { cap_level: u32, divisor: u32 },
    /// `(level - 1) * per_level` (stat points)
    PerLevel { per_level: u32 },
}

impl PointFormula {
    /// Trait-tree formula: 1 point every 2 levels, capped at level 80 (40 points)
    pub const TRAITS: PointFormula = PointFormula::Capped {
        cap_level: 80,
        divisor: 2,
    };

    /// Stat formula: 3 points per level above 1
    pub const STATS: PointFormula = PointFormula::PerLevel { per_level: 3 };

    /// Points granted at `level`
    pub fn total_points(&self, level: u32) -> u32 {
        match *self {
            PointFormula::Capped { cap_level, divisor } => level.min(cap_level) / divisor.max(1),
            PointFormula::PerLevel { per_level } => level.saturating_sub(1) * per_level,
        }
    }
}

/// Validate a requested character level
pub fn check_level(value: i32) -> Result<u32, PlanError> {
    if value < MIN_LEVEL as i32 || value > MAX_LEVEL as i32 {
        Err(PlanError::InvalidLevel { value })
    } else {
        Ok(value as u32)
    }
}

/// Result of an accepted level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    pub from: u32,
    pub to: u32,
}

impl LevelChange {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Level plus spent points for one shared pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Budget {
    formula: PointFormula,
    level: u32,
    used: u32,
}

impl Budget {
    pub fn new(formula: PointFormula, level: i32) -> Result<Self, PlanError> {
        Ok(Self {
            formula,
            level: check_level(level)?,
            used: 0,
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn used_points(&self) -> u32 {
        self.used
    }

    pub fn total_points(&self) -> u32 {
        self.formula.total_points(self.level)
    }

    pub fn total_points_at(&self, level: u32) -> u32 {
        self.formula.total_points(level)
    }

    /// Unspent points; negative only while a lowered level is unresolved
    pub fn available_points(&self) -> i64 {
        self.total_points() as i64 - self.used as i64
    }

    pub fn has_points(&self) -> bool {
        self.available_points() > 0
    }

    /// Points missing if the level became `level`
    pub fn deficit_at(&self, level: u32) -> u32 {
        self.used.saturating_sub(self.total_points_at(level))
    }

    /// Apply a level change only when the spent points still fit.
    ///
    /// Refusal leaves the budget untouched; the caller decides whether to
    /// reset everything and use [`Budget::force_level`], or to give up.
    pub fn request_level_change(&mut self, new_level: i32) -> Result<LevelChange, PlanError> {
        let to = check_level(new_level)?;
        let deficit = self.deficit_at(to);
        if deficit > 0 {
            return Err(PlanError::WouldExceedBudget { deficit });
        }
        let from = std::mem::replace(&mut self.level, to);
        Ok(LevelChange { from, to })
    }

    /// Set the level without checking spent points. Callers reset first.
    pub(crate) fn force_level(&mut self, new_level: i32) -> Result<LevelChange, PlanError> {
        let to = check_level(new_level)?;
        let from = std::mem::replace(&mut self.level, to);
        Ok(LevelChange { from, to })
    }

    pub(crate) fn spend(&mut self) -> Result<(), PlanError> {
        if !self.has_points() {
            return Err(PlanError::UpgradeDenied(DenyReason::NoPoints));
        }
        self.used += 1;
        Ok(())
    }

    pub(crate) fn refund(&mut self, points: u32) {
        debug_assert!(points <= self.used);
        self.used = self.used.saturating_sub(points);
    }

    pub(crate) fn clear(&mut self) {
        self.used = 0;
    }
}
