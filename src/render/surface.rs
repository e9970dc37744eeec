//! Tree render surface
//!
//! Retained node-and-edge view of one trait tree. Built once per tree,
//! then kept in sync by marking skills dirty and refreshing only those
//! nodes (and the edges touching them) on the next render tick.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use crate::data::trees::ConnectionKind;
use crate::progression::{PlannerEvent, SkillState, TraitEngine};
use crate::tree::{Category, Position, SkillKey};

use super::layout::Zoom;

/// How prominently a node is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emphasis {
    #[default]
    Normal,
    Focused,
    Dimmed,
}

/// Short-lived visual feedback on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Upgrade refused for points or max level
    Shake,
    /// Upgrade refused for prerequisites; the requirement list flashes
    FlashRequirements,
    Upgraded,
    Downgraded,
}

impl Cue {
    pub fn duration(&self) -> Duration {
        match self {
            Cue::Shake => Duration::from_millis(500),
            Cue::FlashRequirements => Duration::from_millis(1500),
            Cue::Upgraded | Cue::Downgraded => Duration::from_millis(300),
        }
    }
}

/// Cue with its remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveCue {
    pub cue: Cue,
    pub remaining: Duration,
}

impl ActiveCue {
    /// Horizontal offset while shaking, alternating every 50 ms
    pub fn shake_offset(&self) -> i16 {
        if self.cue != Cue::Shake {
            return 0;
        }
        let elapsed = self.cue.duration().saturating_sub(self.remaining).as_millis();
        if (elapsed / 50) % 2 == 0 {
            1
        } else {
            -1
        }
    }
}

/// Drawn state of one skill
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub skill: usize,
    pub position: Position,
    pub tier: u8,
    pub icon: char,
    pub category: Category,
    pub level: u32,
    pub max_level: u32,
    pub state: SkillState,
    pub emphasis: Emphasis,
    pub cue: Option<ActiveCue>,
}

/// Drawn state of one connection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView {
    pub from: Position,
    pub to: Position,
    pub kind: ConnectionKind,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct TreeSurface {
    tree: usize,
    /// Ordered by tier, then top-to-bottom, then left-to-right
    nodes: Vec<NodeView>,
    /// Skill index -> node handle
    handles: HashMap<usize, usize>,
    /// Indexed like the tree's connections
    edges: Vec<EdgeView>,
    dirty: BTreeSet<usize>,
    focused: Option<usize>,
}

impl TreeSurface {
    /// Full build from the current engine state
    pub fn build(tree: usize, engine: &TraitEngine) -> Self {
        let mut surface = Self {
            tree,
            nodes: Vec::new(),
            handles: HashMap::new(),
            edges: Vec::new(),
            dirty: BTreeSet::new(),
            focused: None,
        };
        let Some(t) = engine.tree(tree) else {
            return surface;
        };

        let mut nodes: Vec<NodeView> = t
            .skills()
            .iter()
            .enumerate()
            .map(|(i, s)| NodeView {
                skill: i,
                position: s.position,
                tier: s.tier,
                icon: s.icon,
                category: s.category,
                level: s.level(),
                max_level: s.max_level(),
                state: engine
                    .skill_state(SkillKey::new(tree, i))
                    .unwrap_or(SkillState::Locked),
                emphasis: Emphasis::Normal,
                cue: None,
            })
            .collect();
        nodes.sort_by(|a, b| {
            a.tier
                .cmp(&b.tier)
                .then(b.position.y.total_cmp(&a.position.y))
                .then(a.position.x.total_cmp(&b.position.x))
        });
        surface.handles = nodes.iter().enumerate().map(|(h, n)| (n.skill, h)).collect();
        surface.nodes = nodes;

        surface.edges = t
            .connections()
            .iter()
            .map(|c| EdgeView {
                from: t.skills()[c.from].position,
                to: t.skills()[c.to].position,
                kind: c.kind,
                active: t.connection_active(c),
            })
            .collect();
        surface
    }

    pub fn tree(&self) -> usize {
        self.tree
    }

    pub fn nodes(&self) -> &[NodeView] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeView] {
        &self.edges
    }

    pub fn node(&self, skill: usize) -> Option<&NodeView> {
        self.handles.get(&skill).map(|&h| &self.nodes[h])
    }

    fn node_mut(&mut self, skill: usize) -> Option<&mut NodeView> {
        let handle = *self.handles.get(&skill)?;
        self.nodes.get_mut(handle)
    }

    /// Skill after (or before) `current` in display order, wrapping around
    pub fn cycle(&self, current: Option<usize>, forward: bool) -> Option<usize> {
        let len = self.nodes.len();
        if len == 0 {
            return None;
        }
        let next = match current.and_then(|s| self.handles.get(&s).copied()) {
            Some(h) if forward => (h + 1) % len,
            Some(h) => (h + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        Some(self.nodes[next].skill)
    }

    // ------------------------------------------------------------------
    // Update hooks
    // ------------------------------------------------------------------

    pub fn mark_dirty(&mut self, skill: usize) {
        if self.handles.contains_key(&skill) {
            self.dirty.insert(skill);
        }
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty.extend(self.handles.keys().copied());
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Queue the nodes an engine event affects
    pub fn apply_event(&mut self, event: &PlannerEvent) {
        match *event {
            PlannerEvent::SkillChanged { key, .. } if key.tree == self.tree => {
                self.mark_dirty(key.skill)
            }
            PlannerEvent::TreeReset { tree } if tree == self.tree => self.mark_all_dirty(),
            // Affordability of every node may flip
            PlannerEvent::BudgetChanged { .. } => self.mark_all_dirty(),
            _ => {}
        }
    }

    /// Redraw dirty nodes from the engine. Returns how many were refreshed.
    pub fn refresh(&mut self, engine: &TraitEngine) -> usize {
        let Some(tree) = engine.tree(self.tree) else {
            self.dirty.clear();
            return 0;
        };
        let mut dirty = std::mem::take(&mut self.dirty);
        // Dependents may lock or unlock
        let dependents: Vec<usize> = dirty
            .iter()
            .flat_map(|&s| tree.dependents(s).iter().copied())
            .collect();
        dirty.extend(dependents);
        let mut touched_edges = BTreeSet::new();

        for &skill in &dirty {
            let key = SkillKey::new(self.tree, skill);
            let (Some(s), Ok(state)) = (tree.skill(skill), engine.skill_state(key)) else {
                continue;
            };
            let level = s.level();
            if let Some(node) = self.node_mut(skill) {
                node.level = level;
                node.state = state;
            }
            touched_edges.extend(tree.connections_touching(skill));
        }

        for idx in touched_edges {
            if let (Some(edge), Some(c)) = (self.edges.get_mut(idx), tree.connections().get(idx)) {
                edge.active = tree.connection_active(c);
            }
        }
        dirty.len()
    }

    // ------------------------------------------------------------------
    // Focus and cues
    // ------------------------------------------------------------------

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Emphasize `skill` and dim every other node. Requires no current focus.
    pub fn enter_focus(&mut self, skill: usize) {
        debug_assert!(self.focused.is_none(), "enter_focus while focused");
        if !self.handles.contains_key(&skill) {
            return;
        }
        for node in &mut self.nodes {
            node.emphasis = if node.skill == skill {
                Emphasis::Focused
            } else {
                Emphasis::Dimmed
            };
        }
        self.focused = Some(skill);
    }

    /// Revert all emphasis
    pub fn exit_focus(&mut self) {
        for node in &mut self.nodes {
            node.emphasis = Emphasis::Normal;
        }
        self.focused = None;
    }

    /// Layout transform while a node is focused
    pub fn zoom(&self) -> Option<Zoom> {
        self.focused
            .and_then(|s| self.node(s))
            .map(|n| Zoom::on(n.position))
    }

    /// Start `cue` on `skill`, replacing any running cue
    pub fn trigger(&mut self, skill: usize, cue: Cue) {
        if let Some(node) = self.node_mut(skill) {
            node.cue = Some(ActiveCue {
                cue,
                remaining: cue.duration(),
            });
        }
    }

    /// Advance cue timers
    pub fn tick(&mut self, delta: Duration) {
        for node in &mut self.nodes {
            if let Some(active) = &mut node.cue {
                active.remaining = active.remaining.saturating_sub(delta);
                if active.remaining.is_zero() {
                    node.cue = None;
                }
            }
        }
    }
}
