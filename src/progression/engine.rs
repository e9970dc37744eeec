//! Upgrade/downgrade engine
//!
//! Owns every trait tree, the shared point budget and the input throttle.
//! Each operation either applies completely or returns an error without
//! touching anything; applied operations queue [`PlannerEvent`]s.

use std::collections::HashMap;
use std::time::Duration;

use crate::data::config::PlannerConfig;
use crate::data::trees::TreeDefs;
use crate::error::{DataError, DenyReason, PlanError};
use crate::tree::{Skill, SkillKey, Tree};

use super::budget::{check_level, Budget, LevelChange};
use super::events::{EventQueue, PlannerEvent, Step};
use super::throttle::InputThrottle;

/// Upgrade availability of a skill, used for node styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkillState {
    /// A prerequisite is below its required level
    Locked,
    /// Prerequisites hold but the budget is empty
    Unaffordable,
    /// Can take another point right now
    Available,
    /// Already at max level
    MaxLevel,
}

/// Trait trees sharing one budget
#[derive(Debug)]
pub struct TraitEngine {
    trees: Vec<Tree>,
    by_key: HashMap<String, usize>,
    budget: Budget,
    throttle: InputThrottle,
    events: EventQueue,
}

impl TraitEngine {
    /// Trees must be freshly built (all levels zero)
    pub fn new(trees: Vec<Tree>, mut budget: Budget, cooldown: Duration) -> Result<Self, DataError> {
        let mut by_key = HashMap::with_capacity(trees.len());
        for (i, tree) in trees.iter().enumerate() {
            if by_key.insert(tree.key.clone(), i).is_some() {
                return Err(DataError::DuplicateTree(tree.key.clone()));
            }
        }
        budget.clear();
        let engine = Self {
            trees,
            by_key,
            budget,
            throttle: InputThrottle::new(cooldown),
            events: EventQueue::new(),
        };
        debug_assert_eq!(engine.points_invested(), 0);
        Ok(engine)
    }

    /// Build every tree from its definition and a budget from the config
    pub fn from_defs(defs: &TreeDefs, config: &PlannerConfig) -> Result<Self, DataError> {
        config.validate()?;
        let trees = defs
            .trees
            .iter()
            .map(Tree::from_def)
            .collect::<Result<Vec<_>, _>>()?;
        let budget = Budget::new(config.trait_formula(), config.default_level as i32)
            .map_err(|e| DataError::InvalidConfig(e.to_string()))?;
        Self::new(trees, budget, config.cooldown())
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn tree(&self, idx: usize) -> Option<&Tree> {
        self.trees.get(idx)
    }

    /// Index of the tree with navigation key `key`
    pub fn tree_index(&self, key: &str) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    /// Resolve `tree_key` + `skill_id` to a key
    pub fn find_skill(&self, tree_key: &str, skill_id: &str) -> Option<SkillKey> {
        let tree = self.tree_index(tree_key)?;
        let skill = self.trees[tree].find(skill_id)?;
        Some(SkillKey::new(tree, skill))
    }

    pub fn skill(&self, key: SkillKey) -> Result<&Skill, PlanError> {
        self.tree_ref(key.tree)?
            .skill(key.skill)
            .ok_or_else(|| self.unknown_skill(key))
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    /// Exact sum of every skill level across all trees
    pub fn points_invested(&self) -> u32 {
        self.trees.iter().map(Tree::points_spent).sum()
    }

    pub fn cooldown(&self) -> Duration {
        self.throttle.window()
    }

    pub fn skill_state(&self, key: SkillKey) -> Result<SkillState, PlanError> {
        let tree = self.tree_ref(key.tree)?;
        let skill = tree.skill(key.skill).ok_or_else(|| self.unknown_skill(key))?;
        Ok(if skill.is_maxed() {
            SkillState::MaxLevel
        } else if !tree.requirements_met(key.skill) {
            SkillState::Locked
        } else if !self.budget.has_points() {
            SkillState::Unaffordable
        } else {
            SkillState::Available
        })
    }

    /// Why an upgrade would fail right now, ignoring the input cooldown
    pub fn check_upgrade(&self, key: SkillKey) -> Result<(), PlanError> {
        let tree = self.tree_ref(key.tree)?;
        let skill = tree.skill(key.skill).ok_or_else(|| self.unknown_skill(key))?;
        if skill.is_maxed() {
            return Err(PlanError::UpgradeDenied(DenyReason::AlreadyMax));
        }
        if !self.budget.has_points() {
            return Err(PlanError::UpgradeDenied(DenyReason::NoPoints));
        }
        if !tree.requirements_met(key.skill) {
            return Err(PlanError::UpgradeDenied(DenyReason::PrereqUnmet));
        }
        Ok(())
    }

    pub fn can_upgrade(&self, key: SkillKey) -> bool {
        self.check_upgrade(key).is_ok()
    }

    /// Why a downgrade would fail right now, ignoring the input cooldown
    pub fn check_downgrade(&self, key: SkillKey) -> Result<(), PlanError> {
        let tree = self.tree_ref(key.tree)?;
        let skill = tree.skill(key.skill).ok_or_else(|| self.unknown_skill(key))?;
        if !skill.is_active() {
            return Err(PlanError::NotAllocated(skill.id.clone()));
        }
        let blockers = tree.blocking_dependents(key.skill, skill.level() - 1);
        if !blockers.is_empty() {
            return Err(PlanError::DowngradeBlocked {
                dependents: blockers
                    .into_iter()
                    .map(|i| tree.skills()[i].id.clone())
                    .collect(),
            });
        }
        Ok(())
    }

    /// Only checks that the skill holds points; see [`TraitEngine::check_downgrade`]
    pub fn can_downgrade(&self, key: SkillKey) -> bool {
        self.skill(key).map(Skill::is_active).unwrap_or(false)
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Advance session time (drives the input cooldown)
    pub fn tick(&mut self, delta: Duration) {
        self.throttle.advance(delta);
    }

    /// Raise a skill by one level, returning the new level
    pub fn upgrade(&mut self, key: SkillKey) -> Result<u32, PlanError> {
        self.check_ready(key)?;
        self.check_upgrade(key)?;

        let skill = self
            .trees
            .get_mut(key.tree)
            .and_then(|t| t.skill_mut(key.skill))
            .ok_or(PlanError::UnknownSkill(format!("{}#{}", key.tree, key.skill)))?;
        self.budget.spend()?;
        skill.raise();
        let level = skill.level();
        log::debug!("Upgraded {} to {}/{}", skill.id, level, skill.max_level());

        self.after_step(key, level, Step::Up);
        Ok(level)
    }

    /// Lower a skill by one level, returning the new level
    pub fn downgrade(&mut self, key: SkillKey) -> Result<u32, PlanError> {
        self.check_ready(key)?;
        self.check_downgrade(key)?;

        let skill = self
            .trees
            .get_mut(key.tree)
            .and_then(|t| t.skill_mut(key.skill))
            .ok_or(PlanError::UnknownSkill(format!("{}#{}", key.tree, key.skill)))?;
        skill.lower();
        self.budget.refund(1);
        let level = skill.level();
        log::debug!("Downgraded {} to {}/{}", skill.id, level, skill.max_level());

        self.after_step(key, level, Step::Down);
        Ok(level)
    }

    /// Change the character level if the spent points still fit
    pub fn request_level_change(&mut self, new_level: i32) -> Result<LevelChange, PlanError> {
        let change = self.budget.request_level_change(new_level)?;
        if change.changed() {
            log::info!("Character level {} -> {}", change.from, change.to);
            self.emit_budget();
        }
        Ok(change)
    }

    /// Keyboard nudge of the character level
    pub fn nudge_level(&mut self, delta: i32) -> Result<LevelChange, PlanError> {
        self.request_level_change(self.budget.level() as i32 + delta)
    }

    /// Reset every tree, then apply the level. Used after the user confirmed
    /// a [`PlanError::WouldExceedBudget`] prompt.
    pub fn force_level_change(&mut self, new_level: i32) -> Result<LevelChange, PlanError> {
        check_level(new_level)?;
        self.reset();
        let change = self.budget.force_level(new_level)?;
        log::info!("Character level forced {} -> {}", change.from, change.to);
        self.emit_budget();
        Ok(change)
    }

    /// Every skill of every tree back to zero
    pub fn reset(&mut self) {
        for (i, tree) in self.trees.iter_mut().enumerate() {
            if tree.clear() > 0 {
                self.events.push(PlannerEvent::TreeReset { tree: i });
            }
        }
        self.budget.clear();
        self.throttle.clear();
        log::info!("All trees reset");
        self.emit_budget();
    }

    /// One tree back to zero, refunding its points. Returns the refund.
    pub fn reset_tree(&mut self, idx: usize) -> Result<u32, PlanError> {
        let tree = self
            .trees
            .get_mut(idx)
            .ok_or_else(|| PlanError::UnknownTree(idx.to_string()))?;
        let refunded = tree.clear();
        self.budget.refund(refunded);
        log::info!("Tree {} reset ({} point(s) refunded)", tree.key, refunded);

        self.events.push(PlannerEvent::TreeReset { tree: idx });
        self.emit_budget();
        debug_assert_eq!(self.budget.used_points(), self.points_invested());
        Ok(refunded)
    }

    /// Take every queued notification
    pub fn drain_events(&mut self) -> Vec<PlannerEvent> {
        self.events.drain().collect()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn tree_ref(&self, idx: usize) -> Result<&Tree, PlanError> {
        self.trees
            .get(idx)
            .ok_or_else(|| PlanError::UnknownTree(idx.to_string()))
    }

    fn unknown_skill(&self, key: SkillKey) -> PlanError {
        let tree = self
            .trees
            .get(key.tree)
            .map(|t| t.key.as_str())
            .unwrap_or("?");
        PlanError::UnknownSkill(format!("{}#{}", tree, key.skill))
    }

    fn check_ready(&self, key: SkillKey) -> Result<(), PlanError> {
        let skill = self.skill(key)?;
        if self.throttle.is_ready(key) {
            Ok(())
        } else {
            Err(PlanError::Throttled(skill.id.clone()))
        }
    }

    fn after_step(&mut self, key: SkillKey, level: u32, step: Step) {
        self.throttle.record(key);
        self.events.push(PlannerEvent::SkillChanged { key, level, step });
        self.emit_budget();
        debug_assert_eq!(self.budget.used_points(), self.points_invested());
    }

    fn emit_budget(&mut self) {
        self.events.push(PlannerEvent::BudgetChanged {
            level: self.budget.level(),
            total: self.budget.total_points(),
            used: self.budget.used_points(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::trees::{axe_tree, default_tree_defs, SkillDef, TreeDef};
    use crate::progression::budget::PointFormula;
    use crate::tree::{Category, Position, Requirement, Threshold};

    const COOLDOWN: Duration = Duration::from_millis(60);

    fn skill_def(id: &str, max: u32, requires: &[(&str, u32)]) -> SkillDef {
        SkillDef {
            id: id.to_string(),
            name: id.to_string(),
            tier: 1,
            position: Position::new(10.0, 10.0),
            max_level: max,
            thresholds: (1..=max).map(Threshold::Level).collect(),
            requires: requires.iter().map(|(s, l)| Requirement::new(*s, *l)).collect(),
            category: Category::Normal,
            description: String::new(),
            effect: String::new(),
            icon: '*',
        }
    }

    fn engine_with(skills: Vec<SkillDef>, level: i32) -> TraitEngine {
        let def = TreeDef {
            key: "t".to_string(),
            name: "T".to_string(),
            icon: '*',
            skills,
            connections: Vec::new(),
        };
        let tree = Tree::from_def(&def).unwrap();
        let budget = Budget::new(PointFormula::TRAITS, level).unwrap();
        TraitEngine::new(vec![tree], budget, COOLDOWN).unwrap()
    }

    fn key(engine: &TraitEngine, id: &str) -> SkillKey {
        engine.find_skill("t", id).unwrap()
    }

    /// Upgrade, then let the cooldown pass
    fn up(engine: &mut TraitEngine, k: SkillKey) -> u32 {
        let level = engine.upgrade(k).unwrap();
        engine.tick(COOLDOWN);
        level
    }

    #[test]
    fn test_upgrade_spends_one_point() {
        let mut engine = engine_with(vec![skill_def("a", 3, &[])], 10);
        let a = key(&engine, "a");

        assert_eq!(engine.upgrade(a), Ok(1));
        assert_eq!(engine.budget().used_points(), 1);
        assert_eq!(engine.budget().available_points(), 4);

        let events = engine.drain_events();
        assert_eq!(
            events,
            vec![
                PlannerEvent::SkillChanged { key: a, level: 1, step: Step::Up },
                PlannerEvent::BudgetChanged { level: 10, total: 5, used: 1 },
            ]
        );
    }

    #[test]
    fn test_upgrade_denial_reasons() {
        let mut engine = engine_with(vec![skill_def("a", 1, &[]), skill_def("b", 2, &[("a", 1)])], 4);
        let a = key(&engine, "a");
        let b = key(&engine, "b");

        assert_eq!(
            engine.upgrade(b),
            Err(PlanError::UpgradeDenied(DenyReason::PrereqUnmet))
        );
        up(&mut engine, a);
        assert_eq!(
            engine.upgrade(a),
            Err(PlanError::UpgradeDenied(DenyReason::AlreadyMax))
        );
        up(&mut engine, b);
        // Level 4 grants 2 points, both spent
        assert_eq!(
            engine.upgrade(b),
            Err(PlanError::UpgradeDenied(DenyReason::NoPoints))
        );
    }

    #[test]
    fn test_missing_points_reported_before_missing_prereq() {
        let mut engine = engine_with(vec![skill_def("a", 1, &[]), skill_def("b", 1, &[("a", 1)])], 1);
        let b = key(&engine, "b");
        assert_eq!(
            engine.upgrade(b),
            Err(PlanError::UpgradeDenied(DenyReason::NoPoints))
        );
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_skill_states() {
        let mut engine = engine_with(vec![skill_def("a", 1, &[]), skill_def("b", 1, &[("a", 1)])], 2);
        let a = key(&engine, "a");
        let b = key(&engine, "b");

        assert_eq!(engine.skill_state(a), Ok(SkillState::Available));
        assert_eq!(engine.skill_state(b), Ok(SkillState::Locked));
        up(&mut engine, a);
        assert_eq!(engine.skill_state(a), Ok(SkillState::MaxLevel));
        // Prereq met, but the single point is gone
        assert_eq!(engine.skill_state(b), Ok(SkillState::Unaffordable));
    }

    #[test]
    fn test_same_skill_is_throttled() {
        let mut engine = engine_with(vec![skill_def("a", 3, &[]), skill_def("b", 3, &[])], 20);
        let a = key(&engine, "a");
        let b = key(&engine, "b");

        engine.upgrade(a).unwrap();
        assert_eq!(engine.upgrade(a), Err(PlanError::Throttled("a".to_string())));
        assert_eq!(engine.downgrade(a), Err(PlanError::Throttled("a".to_string())));
        // Other skills are not affected
        assert_eq!(engine.upgrade(b), Ok(1));

        engine.tick(Duration::from_millis(30));
        assert!(engine.upgrade(a).is_err());
        engine.tick(Duration::from_millis(30));
        assert_eq!(engine.upgrade(a), Ok(2));
    }

    #[test]
    fn test_rejected_attempt_does_not_start_cooldown() {
        let mut engine = engine_with(vec![skill_def("a", 1, &[]), skill_def("b", 1, &[("a", 1)])], 10);
        let a = key(&engine, "a");
        let b = key(&engine, "b");

        assert!(engine.upgrade(b).is_err());
        engine.upgrade(a).unwrap();
        // b was never changed, so it is not cooling down
        assert_eq!(engine.upgrade(b), Ok(1));
    }

    #[test]
    fn test_downgrade_blocked_by_dependent() {
        let mut engine = engine_with(vec![skill_def("a", 3, &[]), skill_def("b", 1, &[("a", 2)])], 20);
        let a = key(&engine, "a");
        let b = key(&engine, "b");
        up(&mut engine, a);
        up(&mut engine, a);
        up(&mut engine, b);
        engine.drain_events();

        assert_eq!(
            engine.downgrade(a),
            Err(PlanError::DowngradeBlocked { dependents: vec!["b".to_string()] })
        );
        assert_eq!(engine.skill(a).unwrap().level(), 2);
        assert_eq!(engine.budget().used_points(), 3);
        assert!(engine.drain_events().is_empty());

        // Removing the dependent first unblocks it
        engine.downgrade(b).unwrap();
        assert_eq!(engine.downgrade(a), Ok(1));
    }

    #[test]
    fn test_downgrade_lists_every_blocker() {
        let mut engine = engine_with(
            vec![
                skill_def("root", 1, &[]),
                skill_def("left", 1, &[("root", 1)]),
                skill_def("right", 1, &[("root", 1)]),
            ],
            20,
        );
        for id in ["root", "left", "right"] {
            let k = key(&engine, id);
            up(&mut engine, k);
        }
        let root = key(&engine, "root");
        assert_eq!(
            engine.downgrade(root),
            Err(PlanError::DowngradeBlocked {
                dependents: vec!["left".to_string(), "right".to_string()]
            })
        );
    }

    #[test]
    fn test_downgrade_at_zero() {
        let mut engine = engine_with(vec![skill_def("a", 3, &[])], 20);
        let a = key(&engine, "a");
        assert!(!engine.can_downgrade(a));
        assert_eq!(engine.downgrade(a), Err(PlanError::NotAllocated("a".to_string())));
    }

    #[test]
    fn test_level_change_outcomes() {
        let mut engine = engine_with(vec![skill_def("a", 5, &[])], 20);
        let a = key(&engine, "a");
        for _ in 0..4 {
            up(&mut engine, a);
        }

        assert_eq!(
            engine.request_level_change(6),
            Err(PlanError::WouldExceedBudget { deficit: 1 })
        );
        assert_eq!(engine.budget().level(), 20);
        assert_eq!(engine.skill(a).unwrap().level(), 4);

        assert_eq!(engine.nudge_level(-12), Ok(LevelChange { from: 20, to: 8 }));
        assert_eq!(
            engine.nudge_level(100),
            Err(PlanError::InvalidLevel { value: 108 })
        );
    }

    #[test]
    fn test_force_level_change_resets_first() {
        let mut engine = engine_with(vec![skill_def("a", 5, &[])], 20);
        let a = key(&engine, "a");
        up(&mut engine, a);
        up(&mut engine, a);
        engine.drain_events();

        // Invalid levels never reset anything
        assert!(engine.force_level_change(0).is_err());
        assert_eq!(engine.skill(a).unwrap().level(), 2);

        assert_eq!(engine.force_level_change(2), Ok(LevelChange { from: 20, to: 2 }));
        assert_eq!(engine.skill(a).unwrap().level(), 0);
        assert_eq!(engine.budget().used_points(), 0);
        assert_eq!(engine.budget().total_points(), 1);

        let events = engine.drain_events();
        assert!(events.contains(&PlannerEvent::TreeReset { tree: 0 }));
        assert_eq!(
            events.last(),
            Some(&PlannerEvent::BudgetChanged { level: 2, total: 1, used: 0 })
        );
    }

    #[test]
    fn test_trees_share_budget_but_keep_state() {
        let mut second = axe_tree();
        second.key = "axe_copy".to_string();
        let trees = vec![
            Tree::from_def(&axe_tree()).unwrap(),
            Tree::from_def(&second).unwrap(),
        ];
        let budget = Budget::new(PointFormula::TRAITS, 60).unwrap();
        let mut engine = TraitEngine::new(trees, budget, COOLDOWN).unwrap();

        let first = engine.find_skill("axe", "going-big").unwrap();
        let other = engine.find_skill("axe_copy", "going-big").unwrap();
        up(&mut engine, first);
        up(&mut engine, other);
        up(&mut engine, other);
        assert_eq!(engine.budget().used_points(), 3);

        assert_eq!(engine.reset_tree(1), Ok(2));
        assert_eq!(engine.skill(first).unwrap().level(), 1);
        assert_eq!(engine.budget().used_points(), 1);
        assert_eq!(engine.points_invested(), 1);
    }

    #[test]
    fn test_from_default_defs() {
        let engine = TraitEngine::from_defs(&default_tree_defs(), &PlannerConfig::default()).unwrap();
        assert_eq!(engine.trees().len(), 10);
        assert_eq!(engine.tree_index("dagger"), Some(9));
        assert_eq!(engine.budget().total_points(), 30);
        assert_eq!(engine.cooldown(), COOLDOWN);
    }

    #[test]
    fn test_duplicate_tree_keys_rejected() {
        let trees = vec![
            Tree::from_def(&axe_tree()).unwrap(),
            Tree::from_def(&axe_tree()).unwrap(),
        ];
        let budget = Budget::new(PointFormula::TRAITS, 10).unwrap();
        assert!(matches!(
            TraitEngine::new(trees, budget, COOLDOWN),
            Err(DataError::DuplicateTree(_))
        ));
    }

    #[test]
    fn test_unknown_keys() {
        let mut engine = engine_with(vec![skill_def("a", 1, &[])], 10);
        let bogus = SkillKey::new(0, 9);
        assert!(matches!(engine.upgrade(bogus), Err(PlanError::UnknownSkill(_))));
        assert!(matches!(
            engine.upgrade(SkillKey::new(4, 0)),
            Err(PlanError::UnknownTree(_))
        ));
        assert!(engine.reset_tree(3).is_err());
    }
}
