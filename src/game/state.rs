//! Planner session
//!
//! Owns the engine, the stat sheet, one render surface per tree and the
//! focus machine, and turns user intents into engine calls plus visual cues.

use std::path::PathBuf;
use std::time::Duration;

use crate::data::DataManager;
use crate::error::{DataError, DenyReason, PlanError};
use crate::lang::Translator;
use crate::progression::{ClassKind, StatKind, StatSheet, TraitEngine};
use crate::render::{Cue, TreeSurface};
use crate::save::{load_preferences, save_preferences, Preferences};
use crate::tree::SkillKey;

use super::focus::{FocusMachine, Transition};

/// How long a status message stays visible
const STATUS_TTL: Duration = Duration::from_millis(2500);

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ClassSelect,
    Stats,
    Traits,
}

/// Which point pool a level change targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Traits,
    Stats,
}

/// Destructive action waiting for a yes/no answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    /// Lowering the level needs a full reset first
    LevelChange { pool: Pool, level: i32, deficit: u32 },
    ResetTree { tree: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
}

/// Transient message under the header
#[derive(Debug, Clone, PartialEq)]
pub struct StatusLine {
    pub text: String,
    pub kind: StatusKind,
    remaining: Duration,
}

/// Start-up navigation, read once
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    pub class: Option<ClassKind>,
    /// Key of the tree to open on the trait screen
    pub trait_key: Option<String>,
    pub level: Option<i32>,
    /// Where preferences persist; `None` keeps them in memory
    pub prefs_path: Option<PathBuf>,
}

pub struct Planner {
    screen: Screen,
    engine: TraitEngine,
    /// One per tree, same order as the engine's trees
    surfaces: Vec<TreeSurface>,
    focus: FocusMachine,
    active_tree: usize,
    stats: StatSheet,
    stat_cursor: usize,
    class_cursor: ClassKind,
    translator: Translator,
    prefs: Preferences,
    prefs_path: Option<PathBuf>,
    pending: Option<Confirm>,
    status: Option<StatusLine>,
    quit: bool,
}

/// Put `value` where the template has `{}`
fn fill(template: &str, value: impl std::fmt::Display) -> String {
    template.replacen("{}", &value.to_string(), 1)
}

impl Planner {
    pub fn new(data: &DataManager, options: StartOptions) -> Result<Self, DataError> {
        let mut engine = TraitEngine::from_defs(&data.trees, &data.config)?;
        let class = options.class.unwrap_or_default();
        let mut stats = StatSheet::new(
            class,
            data.config.stat_formula(),
            data.config.stat_default_level as i32,
        )
        .map_err(|e| DataError::InvalidConfig(e.to_string()))?;

        if let Some(level) = options.level {
            let invalid = |e: PlanError| DataError::InvalidConfig(e.to_string());
            engine.request_level_change(level).map_err(invalid)?;
            stats.request_level_change(level).map_err(invalid)?;
        }

        let surfaces = (0..engine.trees().len())
            .map(|i| TreeSurface::build(i, &engine))
            .collect();

        let mut screen = if options.class.is_some() {
            Screen::Stats
        } else {
            Screen::ClassSelect
        };
        let mut active_tree = 0;
        if let Some(key) = &options.trait_key {
            match engine.tree_index(key) {
                Some(idx) => {
                    active_tree = idx;
                    screen = Screen::Traits;
                }
                None => log::warn!("Unknown trait tree {:?}, opening the first tree", key),
            }
        }

        let prefs = options
            .prefs_path
            .as_deref()
            .map(load_preferences)
            .unwrap_or_default();

        log::info!(
            "Planner ready: {} tree(s), class {}, level {}",
            engine.trees().len(),
            class,
            engine.budget().level()
        );

        Ok(Self {
            screen,
            engine,
            surfaces,
            focus: FocusMachine::new(),
            active_tree,
            stats,
            stat_cursor: 0,
            class_cursor: class,
            translator: Translator::new(prefs.language),
            prefs,
            prefs_path: options.prefs_path,
            pending: None,
            status: None,
            quit: false,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Screen) {
        if screen != self.screen {
            log::debug!("Screen transition: {:?} -> {:?}", self.screen, screen);
            if self.screen == Screen::Traits {
                self.close_focus();
            }
            self.screen = screen;
        }
    }

    pub fn engine(&self) -> &TraitEngine {
        &self.engine
    }

    pub fn stats(&self) -> &StatSheet {
        &self.stats
    }

    pub fn active_tree(&self) -> usize {
        self.active_tree
    }

    /// Surface of the tree on screen
    pub fn surface(&self) -> Option<&TreeSurface> {
        self.surfaces.get(self.active_tree)
    }

    pub fn focused(&self) -> Option<SkillKey> {
        self.focus.focused()
    }

    pub fn stat_cursor(&self) -> StatKind {
        StatKind::ALL[self.stat_cursor.min(StatKind::COUNT - 1)]
    }

    pub fn class_cursor(&self) -> ClassKind {
        self.class_cursor
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.translator.t(key)
    }

    pub fn prefs(&self) -> &Preferences {
        &self.prefs
    }

    pub fn pending(&self) -> Option<Confirm> {
        self.pending
    }

    pub fn status(&self) -> Option<&StatusLine> {
        self.status.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        log::info!("Quit requested");
        self.quit = true;
    }

    /// Translated skill name, falling back to the data file name
    pub fn skill_name(&self, key: SkillKey) -> String {
        match self.engine.skill(key) {
            Ok(skill) => self
                .translator
                .t_or(&format!("skill.{}", skill.id), &skill.name)
                .to_string(),
            Err(_) => String::from("?"),
        }
    }

    /// Translated description and effect, falling back to the data file text
    pub fn skill_details(&self, key: SkillKey) -> (String, String) {
        match self.engine.skill(key) {
            Ok(skill) => (
                self.translator
                    .t_or(&format!("skilldesc.{}", skill.id), &skill.description)
                    .to_string(),
                self.translator
                    .t_or(&format!("skilleffect.{}", skill.id), &skill.effect)
                    .to_string(),
            ),
            Err(_) => (String::new(), String::new()),
        }
    }

    /// Translated tree name
    pub fn tree_name(&self, idx: usize) -> String {
        match self.engine.tree(idx) {
            Some(tree) => self
                .translator
                .t_or(&format!("tree.{}", tree.key), &tree.name)
                .to_string(),
            None => String::from("?"),
        }
    }

    // ------------------------------------------------------------------
    // Frame update
    // ------------------------------------------------------------------

    /// Advance session time, route engine events and refresh the visible tree
    pub fn tick(&mut self, delta: Duration) {
        self.engine.tick(delta);
        for event in self.engine.drain_events() {
            for surface in &mut self.surfaces {
                surface.apply_event(&event);
            }
        }
        for surface in &mut self.surfaces {
            surface.tick(delta);
        }
        if let Some(surface) = self.surfaces.get_mut(self.active_tree) {
            surface.refresh(&self.engine);
        }

        if let Some(status) = &mut self.status {
            status.remaining = status.remaining.saturating_sub(delta);
            if status.remaining.is_zero() {
                self.status = None;
            }
        }
    }

    fn info(&mut self, text: impl Into<String>) {
        self.set_status(text.into(), StatusKind::Info);
    }

    fn warn(&mut self, text: impl Into<String>) {
        self.set_status(text.into(), StatusKind::Warning);
    }

    fn set_status(&mut self, text: String, kind: StatusKind) {
        self.status = Some(StatusLine {
            text,
            kind,
            remaining: STATUS_TTL,
        });
    }

    // ------------------------------------------------------------------
    // Class select
    // ------------------------------------------------------------------

    pub fn move_class_cursor(&mut self, forward: bool) {
        self.class_cursor = if forward {
            self.class_cursor.next()
        } else {
            self.class_cursor.prev()
        };
    }

    /// Confirm the highlighted class and open the stat sheet
    pub fn choose_class(&mut self) {
        self.stats.set_class(self.class_cursor);
        let text = format!(
            "{}: {}",
            self.t("selected"),
            self.t(&format!("class.{}", self.class_cursor.key()))
        );
        self.info(text);
        self.set_screen(Screen::Stats);
    }

    // ------------------------------------------------------------------
    // Trait trees
    // ------------------------------------------------------------------

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Enter(key) => {
                if let Some(surface) = self.surfaces.get_mut(key.tree) {
                    surface.enter_focus(key.skill);
                }
            }
            Transition::Switch { from, to } => {
                if let Some(surface) = self.surfaces.get_mut(from.tree) {
                    surface.exit_focus();
                }
                if let Some(surface) = self.surfaces.get_mut(to.tree) {
                    surface.enter_focus(to.skill);
                }
            }
            Transition::Reselect(key) => self.try_upgrade(key),
            Transition::Close(key) => {
                if let Some(surface) = self.surfaces.get_mut(key.tree) {
                    surface.exit_focus();
                }
            }
            Transition::Noop => {}
        }
    }

    /// Select a skill of the active tree: focus it, or upgrade it if it
    /// already has focus
    pub fn select_skill(&mut self, skill: usize) -> Result<(), PlanError> {
        let key = SkillKey::new(self.active_tree, skill);
        self.engine.skill(key)?;
        let transition = self.focus.select(key);
        self.apply(transition);
        Ok(())
    }

    /// Tab / Shift+Tab
    pub fn cycle_skill(&mut self, forward: bool) {
        let current = self
            .focus
            .focused()
            .filter(|k| k.tree == self.active_tree)
            .map(|k| k.skill);
        let Some(next) = self.surface().and_then(|s| s.cycle(current, forward)) else {
            return;
        };
        let transition = self.focus.move_to(SkillKey::new(self.active_tree, next));
        self.apply(transition);
    }

    /// Space / Enter: upgrade the focused skill, or focus the first one
    pub fn activate(&mut self) {
        match self.focus.focused() {
            Some(key) => {
                let transition = self.focus.select(key);
                self.apply(transition);
            }
            None => self.cycle_skill(true),
        }
    }

    pub fn downgrade_focused(&mut self) {
        if let Some(key) = self.focus.focused() {
            self.try_downgrade(key);
        }
    }

    pub fn close_focus(&mut self) {
        let transition = self.focus.close();
        self.apply(transition);
    }

    /// Move to the neighboring tree, wrapping around. Focus closes first.
    pub fn switch_tree(&mut self, delta: i32) {
        let count = self.surfaces.len() as i32;
        if count == 0 {
            return;
        }
        let next = (self.active_tree as i32 + delta).rem_euclid(count) as usize;
        self.goto_tree(next);
    }

    /// Jump to the tree at `idx` (number keys). Out-of-range indices are
    /// ignored; focus closes first.
    pub fn goto_tree(&mut self, idx: usize) {
        if idx >= self.surfaces.len() {
            return;
        }
        self.close_focus();
        if idx != self.active_tree {
            log::info!("Switched to tree {}", self.tree_name(idx));
            self.active_tree = idx;
        }
        if let Some(surface) = self.surfaces.get_mut(self.active_tree) {
            surface.refresh(&self.engine);
        }
    }

    fn try_upgrade(&mut self, key: SkillKey) {
        match self.engine.upgrade(key) {
            Ok(_) => self.cue(key, Cue::Upgraded),
            Err(PlanError::Throttled(id)) => log::debug!("Ignored repeated input on {}", id),
            Err(PlanError::UpgradeDenied(reason)) => {
                let cue = match reason {
                    DenyReason::PrereqUnmet => Cue::FlashRequirements,
                    DenyReason::NoPoints | DenyReason::AlreadyMax => Cue::Shake,
                };
                self.cue(key, cue);
                self.warn(self.t(reason.message_key()).to_string());
            }
            Err(e) => self.warn(e.to_string()),
        }
    }

    fn try_downgrade(&mut self, key: SkillKey) {
        match self.engine.downgrade(key) {
            Ok(_) => self.cue(key, Cue::Downgraded),
            Err(PlanError::Throttled(id)) => log::debug!("Ignored repeated input on {}", id),
            Err(PlanError::DowngradeBlocked { dependents }) => {
                let names: Vec<String> = dependents
                    .iter()
                    .filter_map(|id| self.engine.find_skill(&self.engine.trees()[key.tree].key, id))
                    .map(|k| self.skill_name(k))
                    .collect();
                self.cue(key, Cue::Shake);
                self.warn(fill(self.t("feedback.downgradeBlocked"), names.join(", ")));
            }
            Err(PlanError::NotAllocated(_)) => {
                self.cue(key, Cue::Shake);
                self.warn(self.t("feedback.notAllocated").to_string());
            }
            Err(e) => self.warn(e.to_string()),
        }
    }

    fn cue(&mut self, key: SkillKey, cue: Cue) {
        if let Some(surface) = self.surfaces.get_mut(key.tree) {
            surface.trigger(key.skill, cue);
        }
    }

    /// `[` / `]` on the trait screen
    pub fn nudge_trait_level(&mut self, delta: i32) {
        let target = self.engine.budget().level() as i32 + delta;
        let result = self.engine.nudge_level(delta);
        self.handle_level_result(Pool::Traits, target, result.map(|_| ()));
    }

    /// Ctrl+R: ask before refunding the active tree
    pub fn request_reset_tree(&mut self) {
        let spent = self
            .engine
            .tree(self.active_tree)
            .map(|t| t.points_spent())
            .unwrap_or(0);
        if spent > 0 {
            self.pending = Some(Confirm::ResetTree {
                tree: self.active_tree,
            });
        }
    }

    // ------------------------------------------------------------------
    // Stat sheet
    // ------------------------------------------------------------------

    pub fn move_stat_cursor(&mut self, delta: i32) {
        let count = StatKind::COUNT as i32;
        self.stat_cursor = (self.stat_cursor as i32 + delta).rem_euclid(count) as usize;
    }

    /// `+` / `-` on the highlighted stat
    pub fn adjust_stat(&mut self, delta: i32) {
        let stat = self.stat_cursor();
        match self.stats.adjust(stat, delta) {
            Ok(points) => log::debug!("Stat {} now has {} point(s)", stat.key(), points),
            Err(PlanError::StatLocked(_)) => self.warn(self.t("feedback.statLocked").to_string()),
            Err(PlanError::StatCapped { cap, .. }) => {
                self.warn(fill(self.t("feedback.statCapped"), cap))
            }
            Err(PlanError::UpgradeDenied(reason)) => {
                self.warn(self.t(reason.message_key()).to_string())
            }
            Err(PlanError::NotAllocated(_)) => {
                self.warn(self.t("feedback.notAllocated").to_string())
            }
            Err(e) => self.warn(e.to_string()),
        }
    }

    /// `[` / `]` on the stat screen
    pub fn nudge_stat_level(&mut self, delta: i32) {
        let target = self.stats.level() as i32 + delta;
        let result = self.stats.nudge_level(delta);
        self.handle_level_result(Pool::Stats, target, result.map(|_| ()));
    }

    pub fn cycle_class(&mut self, forward: bool) {
        self.move_class_cursor(forward);
        self.stats.set_class(self.class_cursor);
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
        self.info(self.t("feedback.statsReset").to_string());
    }

    fn handle_level_result(&mut self, pool: Pool, level: i32, result: Result<(), PlanError>) {
        match result {
            Ok(()) => {}
            Err(PlanError::WouldExceedBudget { deficit }) => {
                self.pending = Some(Confirm::LevelChange {
                    pool,
                    level,
                    deficit,
                });
            }
            Err(PlanError::InvalidLevel { .. }) => {
                self.warn(self.t("feedback.invalidLevel").to_string())
            }
            Err(e) => self.warn(e.to_string()),
        }
    }

    // ------------------------------------------------------------------
    // Confirmation, preferences
    // ------------------------------------------------------------------

    /// Answer the pending confirmation
    pub fn confirm(&mut self, accept: bool) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        if !accept {
            log::debug!("Cancelled {:?}", pending);
            return;
        }
        let result = match pending {
            Confirm::LevelChange {
                pool: Pool::Traits,
                level,
                ..
            } => self.engine.force_level_change(level).map(|_| ()),
            Confirm::LevelChange {
                pool: Pool::Stats,
                level,
                ..
            } => self.stats.force_level_change(level).map(|_| ()),
            Confirm::ResetTree { tree } => self.engine.reset_tree(tree).map(|refunded| {
                log::debug!("Refunded {} point(s)", refunded);
            }),
        };
        match result {
            Ok(()) if matches!(pending, Confirm::ResetTree { .. }) => {
                self.info(self.t("feedback.treeReset").to_string())
            }
            Ok(()) => {}
            Err(e) => self.warn(e.to_string()),
        }
    }

    pub fn toggle_sound(&mut self) {
        self.prefs.sound_enabled = !self.prefs.sound_enabled;
        let key = if self.prefs.sound_enabled {
            "feedback.soundOn"
        } else {
            "feedback.soundOff"
        };
        self.info(self.t(key).to_string());
        self.persist_prefs();
    }

    pub fn toggle_language(&mut self) {
        self.prefs.language = self.prefs.language.toggled();
        self.translator.set_language(self.prefs.language);
        log::info!("Language set to {}", self.prefs.language);
        self.info(self.t("feedback.language").to_string());
        self.persist_prefs();
    }

    fn persist_prefs(&self) {
        if let Some(path) = &self.prefs_path {
            if let Err(e) = save_preferences(path, &self.prefs) {
                log::warn!("Could not save preferences: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::Language;
    use crate::render::Emphasis;

    const FRAME: Duration = Duration::from_millis(100);

    fn planner(options: StartOptions) -> Planner {
        Planner::new(&DataManager::default(), options).unwrap()
    }

    fn on_axe() -> Planner {
        planner(StartOptions {
            trait_key: Some("axe".to_string()),
            ..Default::default()
        })
    }

    fn skill(p: &Planner, id: &str) -> usize {
        p.engine().tree(0).unwrap().find(id).unwrap()
    }

    #[test]
    fn test_start_options() {
        let p = planner(StartOptions::default());
        assert_eq!(p.screen(), Screen::ClassSelect);

        let p = planner(StartOptions {
            class: Some(ClassKind::Mage),
            level: Some(20),
            ..Default::default()
        });
        assert_eq!(p.screen(), Screen::Stats);
        assert_eq!(p.stats().class(), ClassKind::Mage);
        assert_eq!(p.engine().budget().level(), 20);
        assert_eq!(p.stats().budget().total_points(), 57);

        let p = planner(StartOptions {
            trait_key: Some("bow".to_string()),
            ..Default::default()
        });
        assert_eq!(p.screen(), Screen::Traits);
        assert_eq!(p.active_tree(), 6);

        let p = planner(StartOptions {
            trait_key: Some("nope".to_string()),
            ..Default::default()
        });
        assert_eq!(p.active_tree(), 0);

        assert!(Planner::new(
            &DataManager::default(),
            StartOptions {
                level: Some(0),
                ..Default::default()
            }
        )
        .is_err());
    }

    #[test]
    fn test_select_then_reselect_upgrades() {
        let mut p = on_axe();
        let going_big = skill(&p, "going-big");

        p.select_skill(going_big).unwrap();
        assert_eq!(p.engine().budget().used_points(), 0);
        assert_eq!(
            p.surface().unwrap().node(going_big).unwrap().emphasis,
            Emphasis::Focused
        );

        p.select_skill(going_big).unwrap();
        p.tick(FRAME);
        assert_eq!(p.engine().budget().used_points(), 1);
        assert_eq!(p.surface().unwrap().node(going_big).unwrap().level, 1);
    }

    #[test]
    fn test_switching_focus_exits_first() {
        let mut p = on_axe();
        let a = skill(&p, "going-big");
        let b = skill(&p, "berserker");
        p.select_skill(a).unwrap();
        p.select_skill(b).unwrap();

        let surface = p.surface().unwrap();
        assert_eq!(surface.focused(), Some(b));
        assert_eq!(surface.node(a).unwrap().emphasis, Emphasis::Dimmed);
        let focused = surface
            .nodes()
            .iter()
            .filter(|n| n.emphasis == Emphasis::Focused)
            .count();
        assert_eq!(focused, 1);
    }

    #[test]
    fn test_denied_upgrade_cues() {
        let mut p = on_axe();
        let bloodflow = skill(&p, "steady-bloodflow");
        p.select_skill(bloodflow).unwrap();
        p.activate();

        let node = p.surface().unwrap().node(bloodflow).unwrap();
        assert_eq!(node.cue.map(|c| c.cue), Some(Cue::FlashRequirements));
        assert_eq!(p.status().unwrap().kind, StatusKind::Warning);
        assert_eq!(p.engine().budget().used_points(), 0);
    }

    #[test]
    fn test_tree_switch_closes_focus_and_wraps() {
        let mut p = on_axe();
        p.select_skill(0).unwrap();
        p.switch_tree(-1);
        assert_eq!(p.active_tree(), 9);
        assert_eq!(p.focused(), None);
        assert_eq!(p.surfaces[0].focused(), None);
        p.switch_tree(1);
        assert_eq!(p.active_tree(), 0);
    }

    #[test]
    fn test_goto_tree_by_index() {
        let mut p = on_axe();
        p.select_skill(0).unwrap();
        p.goto_tree(6);
        assert_eq!(p.active_tree(), 6);
        assert_eq!(p.focused(), None);
        assert_eq!(p.surfaces[0].focused(), None);

        p.goto_tree(10);
        assert_eq!(p.active_tree(), 6);
    }

    #[test]
    fn test_lowering_level_asks_first() {
        let mut p = planner(StartOptions {
            trait_key: Some("axe".to_string()),
            level: Some(4),
            ..Default::default()
        });
        let going_big = skill(&p, "going-big");
        p.select_skill(going_big).unwrap();
        p.activate();
        p.tick(FRAME);
        p.activate();
        p.tick(FRAME);
        assert_eq!(p.engine().budget().used_points(), 2);

        p.nudge_trait_level(-2);
        assert_eq!(
            p.pending(),
            Some(Confirm::LevelChange { pool: Pool::Traits, level: 2, deficit: 1 })
        );
        p.confirm(false);
        assert_eq!(p.engine().budget().level(), 4);
        assert_eq!(p.engine().budget().used_points(), 2);

        p.nudge_trait_level(-2);
        p.confirm(true);
        p.tick(FRAME);
        assert_eq!(p.engine().budget().level(), 2);
        assert_eq!(p.engine().budget().used_points(), 0);
        assert_eq!(p.surface().unwrap().node(going_big).unwrap().level, 0);
    }

    #[test]
    fn test_reset_tree_confirmation() {
        let mut p = on_axe();
        p.request_reset_tree();
        // Nothing spent, nothing to confirm
        assert_eq!(p.pending(), None);

        p.select_skill(0).unwrap();
        p.activate();
        p.request_reset_tree();
        assert_eq!(p.pending(), Some(Confirm::ResetTree { tree: 0 }));
        p.confirm(true);
        assert_eq!(p.engine().budget().used_points(), 0);
    }

    #[test]
    fn test_blocked_downgrade_names_dependents() {
        let mut p = on_axe();
        let going_big = skill(&p, "going-big");
        let bloodflow = skill(&p, "steady-bloodflow");
        p.select_skill(going_big).unwrap();
        p.activate();
        p.select_skill(bloodflow).unwrap();
        p.activate();
        p.select_skill(going_big).unwrap();
        p.tick(FRAME);

        p.downgrade_focused();
        assert_eq!(p.status().unwrap().text, "Required by Steady Bloodflow");
        assert_eq!(p.engine().skill(SkillKey::new(0, going_big)).unwrap().level(), 1);
    }

    #[test]
    fn test_stat_screen_actions() {
        let mut p = planner(StartOptions {
            class: Some(ClassKind::Knight),
            level: Some(3),
            ..Default::default()
        });
        p.adjust_stat(1);
        assert_eq!(p.stats().points(StatKind::Health), 1);

        p.move_stat_cursor(3);
        assert_eq!(p.stat_cursor(), StatKind::Damage);
        p.adjust_stat(1);
        assert_eq!(p.status().unwrap().text, "This stat cannot be edited");

        p.move_stat_cursor(-4);
        assert_eq!(p.stat_cursor(), StatKind::Capacity);

        p.nudge_stat_level(-2);
        assert_eq!(
            p.pending(),
            Some(Confirm::LevelChange { pool: Pool::Stats, level: 1, deficit: 1 })
        );
        p.confirm(true);
        assert_eq!(p.stats().level(), 1);
        assert_eq!(p.stats().points(StatKind::Health), 0);
    }

    #[test]
    fn test_language_toggle_translates_names() {
        let mut p = on_axe();
        assert_eq!(p.tree_name(0), "Axe");
        p.toggle_language();
        assert_eq!(p.prefs().language, Language::PtBr);
        assert_eq!(p.tree_name(0), "Machado");
        assert_eq!(p.skill_name(SkillKey::new(0, 0)), "Pensando Grande");
    }

    #[test]
    fn test_skill_details_follow_language() {
        let mut p = on_axe();
        let going_big = SkillKey::new(0, skill(&p, "going-big"));
        let (description, effect) = p.skill_details(going_big);
        assert_eq!(description, "Large weapons deal extra damage");
        assert_eq!(effect, "20% extra damage at max level");

        p.toggle_language();
        let (description, effect) = p.skill_details(going_big);
        assert_eq!(description, "Armas grandes causam dano extra");
        assert_eq!(effect, "20% de dano extra no nível máximo");
    }

    #[test]
    fn test_status_expires() {
        let mut p = on_axe();
        p.toggle_sound();
        assert!(!p.prefs().sound_enabled);
        assert!(p.status().is_some());
        for _ in 0..25 {
            p.tick(FRAME);
        }
        assert!(p.status().is_none());
    }

    #[test]
    fn test_choose_class_opens_stats() {
        let mut p = planner(StartOptions::default());
        p.move_class_cursor(true);
        assert_eq!(p.class_cursor(), ClassKind::Mage);
        p.choose_class();
        assert_eq!(p.screen(), Screen::Stats);
        assert_eq!(p.stats().class(), ClassKind::Mage);
    }
}
