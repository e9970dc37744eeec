//! Outward notifications
//!
//! The engine queues these after every applied mutation. The session drains
//! the queue once per frame and hands each event to the render surfaces and
//! the points display. Nothing in the engine depends on anyone listening.

use std::collections::VecDeque;

use crate::tree::SkillKey;

/// Direction of a single-step level change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Up,
    Down,
}

/// Something observable changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerEvent {
    /// Level, total or spent points changed
    BudgetChanged { level: u32, total: u32, used: u32 },
    /// One skill moved one level
    SkillChanged { key: SkillKey, level: u32, step: Step },
    /// Every skill of a tree went back to zero
    TreeReset { tree: usize },
}

/// FIFO of pending events
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: VecDeque<PlannerEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PlannerEvent) {
        self.pending.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take every pending event in the order it was queued
    pub fn drain(&mut self) -> impl Iterator<Item = PlannerEvent> + '_ {
        self.pending.drain(..)
    }
}
