//! Class picker and stat allocator
//!
//! A separate point pool from the trait trees: `(level - 1) * 3` points,
//! with no more than `level` points in any single stat.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;

use super::budget::{check_level, Budget, LevelChange, PointFormula};

/// Playable class; only changes stat multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Squire,
    #[default]
    Knight,
    Mage,
    Rogue,
}

impl ClassKind {
    pub const ALL: [ClassKind; 4] = [
        ClassKind::Squire,
        ClassKind::Knight,
        ClassKind::Mage,
        ClassKind::Rogue,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ClassKind::Squire => "squire",
            ClassKind::Knight => "knight",
            ClassKind::Mage => "mage",
            ClassKind::Rogue => "rogue",
        }
    }

    /// Multiplier applied to the point bonus of `stat`
    pub fn multiplier(&self, stat: StatKind) -> f64 {
        use StatKind::*;
        match (self, stat) {
            (ClassKind::Squire, _) => 1.0,

            (ClassKind::Knight, Skill | Ability | HpRegen) => 1.25,
            (ClassKind::Knight, Magic | Mana | MpRegen) => 0.5,
            (ClassKind::Knight, Armor | Defense | Capacity) => 1.5,
            (ClassKind::Knight, Health) => 2.0,

            (ClassKind::Mage, Magic | Mana | MpRegen) => 2.0,
            (ClassKind::Mage, Skill | Armor | Defense | Health | Capacity | HpRegen) => 0.75,

            (ClassKind::Rogue, Skill | Magic) => 1.5,
            (ClassKind::Rogue, Mana | AttackSpeed) => 1.25,

            _ => 1.0,
        }
    }

    pub fn next(&self) -> ClassKind {
        let i = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> ClassKind {
        let i = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ClassKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown class {:?} (squire, knight, mage, rogue)", s))
    }
}

/// Character stat, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatKind {
    Health,
    Mana,
    Magic,
    Damage,
    Movespeed,
    Ability,
    Skill,
    AttackSpeed,
    HpRegen,
    MpRegen,
    Range,
    Armor,
    Defense,
    Capacity,
}

impl StatKind {
    pub const COUNT: usize = 14;

    pub const ALL: [StatKind; Self::COUNT] = [
        StatKind::Health,
        StatKind::Mana,
        StatKind::Magic,
        StatKind::Damage,
        StatKind::Movespeed,
        StatKind::Ability,
        StatKind::Skill,
        StatKind::AttackSpeed,
        StatKind::HpRegen,
        StatKind::MpRegen,
        StatKind::Range,
        StatKind::Armor,
        StatKind::Defense,
        StatKind::Capacity,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Translation key suffix (`stats.<key>`)
    pub fn key(&self) -> &'static str {
        match self {
            StatKind::Health => "health",
            StatKind::Mana => "mana",
            StatKind::Magic => "magic",
            StatKind::Damage => "damage",
            StatKind::Movespeed => "movespeed",
            StatKind::Ability => "ability",
            StatKind::Skill => "skill",
            StatKind::AttackSpeed => "attackSpeed",
            StatKind::HpRegen => "hpRegen",
            StatKind::MpRegen => "mpRegen",
            StatKind::Range => "range",
            StatKind::Armor => "armor",
            StatKind::Defense => "defense",
            StatKind::Capacity => "capacity",
        }
    }

    /// Value with zero points invested
    pub fn base(&self) -> f64 {
        match self {
            StatKind::Health => 150.0,
            StatKind::Mana => 15.0,
            StatKind::Movespeed => 35.0,
            StatKind::AttackSpeed => 10.0,
            StatKind::HpRegen | StatKind::MpRegen => 1.0,
            StatKind::Range => 15.0,
            StatKind::Capacity => 225.0,
            _ => 0.0,
        }
    }

    /// Bonus per invested point, `None` for stats that take no points
    pub fn per_point(&self) -> Option<f64> {
        match self {
            StatKind::Health | StatKind::Mana => Some(5.0),
            StatKind::Magic | StatKind::Ability | StatKind::HpRegen | StatKind::MpRegen => Some(1.0),
            StatKind::Capacity => Some(25.0),
            _ => None,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.per_point().is_some()
    }
}

/// Stat points of one character
#[derive(Debug, Clone, PartialEq)]
pub struct StatSheet {
    class: ClassKind,
    budget: Budget,
    points: [u32; StatKind::COUNT],
}

impl StatSheet {
    pub fn new(class: ClassKind, formula: PointFormula, level: i32) -> Result<Self, PlanError> {
        Ok(Self {
            class,
            budget: Budget::new(formula, level)?,
            points: [0; StatKind::COUNT],
        })
    }

    pub fn class(&self) -> ClassKind {
        self.class
    }

    /// Switch class; allocated points stay where they are
    pub fn set_class(&mut self, class: ClassKind) {
        if class != self.class {
            log::info!("Class {} -> {}", self.class, class);
            self.class = class;
        }
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    pub fn level(&self) -> u32 {
        self.budget.level()
    }

    pub fn points(&self, stat: StatKind) -> u32 {
        self.points[stat.index()]
    }

    /// Point bonus after the class multiplier
    pub fn bonus(&self, stat: StatKind) -> f64 {
        let raw = stat
            .per_point()
            .map(|per| per * self.points(stat) as f64)
            .unwrap_or(0.0);
        raw * self.class.multiplier(stat)
    }

    pub fn value(&self, stat: StatKind) -> f64 {
        stat.base() + self.bonus(stat)
    }

    /// Move one point into (`delta > 0`) or out of (`delta < 0`) a stat.
    /// Returns the new point count.
    pub fn adjust(&mut self, stat: StatKind, delta: i32) -> Result<u32, PlanError> {
        if !stat.is_editable() {
            return Err(PlanError::StatLocked(stat.key().to_string()));
        }
        let idx = stat.index();
        if delta > 0 {
            let cap = self.level();
            if self.points[idx] >= cap {
                return Err(PlanError::StatCapped {
                    stat: stat.key().to_string(),
                    cap,
                });
            }
            self.budget.spend()?;
            self.points[idx] += 1;
        } else if delta < 0 {
            if self.points[idx] == 0 {
                return Err(PlanError::NotAllocated(stat.key().to_string()));
            }
            self.points[idx] -= 1;
            self.budget.refund(1);
        }
        Ok(self.points[idx])
    }

    pub fn reset(&mut self) {
        self.points = [0; StatKind::COUNT];
        self.budget.clear();
    }

    /// Points that would have to go before `level` could apply
    pub fn deficit_at(&self, level: u32) -> u32 {
        let overflow: u32 = self.points.iter().map(|p| p.saturating_sub(level)).sum();
        self.budget.deficit_at(level).max(overflow)
    }

    pub fn request_level_change(&mut self, new_level: i32) -> Result<LevelChange, PlanError> {
        let to = check_level(new_level)?;
        let deficit = self.deficit_at(to);
        if deficit > 0 {
            return Err(PlanError::WouldExceedBudget { deficit });
        }
        self.budget.request_level_change(new_level)
    }

    pub fn nudge_level(&mut self, delta: i32) -> Result<LevelChange, PlanError> {
        self.request_level_change(self.level() as i32 + delta)
    }

    /// Clear every stat, then apply the level
    pub fn force_level_change(&mut self, new_level: i32) -> Result<LevelChange, PlanError> {
        check_level(new_level)?;
        self.reset();
        self.budget.force_level(new_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DenyReason;

    fn sheet(class: ClassKind, level: i32) -> StatSheet {
        StatSheet::new(class, PointFormula::STATS, level).unwrap()
    }

    #[test]
    fn test_base_values() {
        let sheet = sheet(ClassKind::Knight, 1);
        assert_eq!(sheet.value(StatKind::Health), 150.0);
        assert_eq!(sheet.value(StatKind::Capacity), 225.0);
        assert_eq!(sheet.value(StatKind::Damage), 0.0);
        assert_eq!(sheet.budget().total_points(), 0);
    }

    #[test]
    fn test_class_multipliers_apply_to_bonus() {
        let mut knight = sheet(ClassKind::Knight, 5);
        knight.adjust(StatKind::Health, 1).unwrap();
        knight.adjust(StatKind::Health, 1).unwrap();
        // 150 + 2 * 5 * 2.0
        assert_eq!(knight.value(StatKind::Health), 170.0);

        knight.set_class(ClassKind::Mage);
        assert_eq!(knight.points(StatKind::Health), 2);
        assert_eq!(knight.value(StatKind::Health), 157.5);
    }

    #[test]
    fn test_per_stat_cap_is_level() {
        let mut sheet = sheet(ClassKind::Squire, 2);
        assert_eq!(sheet.budget().total_points(), 3);
        sheet.adjust(StatKind::Mana, 1).unwrap();
        sheet.adjust(StatKind::Mana, 1).unwrap();
        assert_eq!(
            sheet.adjust(StatKind::Mana, 1),
            Err(PlanError::StatCapped { stat: "mana".to_string(), cap: 2 })
        );
        sheet.adjust(StatKind::Magic, 1).unwrap();
        assert_eq!(
            sheet.adjust(StatKind::Magic, 1),
            Err(PlanError::UpgradeDenied(DenyReason::NoPoints))
        );
        assert!(!sheet.budget().has_points());
    }

    #[test]
    fn test_locked_and_empty_stats() {
        let mut sheet = sheet(ClassKind::Rogue, 10);
        assert_eq!(
            sheet.adjust(StatKind::Armor, 1),
            Err(PlanError::StatLocked("armor".to_string()))
        );
        assert_eq!(
            sheet.adjust(StatKind::Ability, -1),
            Err(PlanError::NotAllocated("ability".to_string()))
        );
        assert_eq!(sheet.budget().used_points(), 0);
    }

    #[test]
    fn test_level_change_counts_cap_overflow() {
        let mut sheet = sheet(ClassKind::Squire, 10);
        for _ in 0..6 {
            sheet.adjust(StatKind::Capacity, 1).unwrap();
        }
        // Level 4 grants 9 points (enough) but caps each stat at 4
        assert_eq!(
            sheet.request_level_change(4),
            Err(PlanError::WouldExceedBudget { deficit: 2 })
        );
        assert_eq!(sheet.level(), 10);

        assert_eq!(sheet.force_level_change(4), Ok(LevelChange { from: 10, to: 4 }));
        assert_eq!(sheet.points(StatKind::Capacity), 0);
        assert_eq!(sheet.budget().used_points(), 0);
    }

    #[test]
    fn test_class_parse_and_cycle() {
        assert_eq!("Mage".parse::<ClassKind>(), Ok(ClassKind::Mage));
        assert!("paladin".parse::<ClassKind>().is_err());
        assert_eq!(ClassKind::Rogue.next(), ClassKind::Squire);
        assert_eq!(ClassKind::Squire.prev(), ClassKind::Rogue);
    }
}
