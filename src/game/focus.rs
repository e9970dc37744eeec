//! Selection/focus state machine
//!
//! At most one skill is focused. The machine only decides which transition
//! happens; the session applies it to the render surface (exit fully, then
//! enter) and to the engine (re-selecting the focused skill upgrades it).

use crate::tree::SkillKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Idle,
    Focused(SkillKey),
}

/// What the session has to do after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Idle -> Focused: emphasize the skill
    Enter(SkillKey),
    /// Focused(a) -> Focused(b): exit `from` completely, then enter `to`
    Switch { from: SkillKey, to: SkillKey },
    /// Focused(a) selected again: upgrade attempt
    Reselect(SkillKey),
    /// Focused -> Idle: revert emphasis
    Close(SkillKey),
    /// Nothing changes
    Noop,
}

#[derive(Debug, Clone, Default)]
pub struct FocusMachine {
    state: Focus,
}

impl FocusMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Focus {
        self.state
    }

    pub fn focused(&self) -> Option<SkillKey> {
        match self.state {
            Focus::Idle => None,
            Focus::Focused(key) => Some(key),
        }
    }

    /// User picked `key` (click, Enter or Space on a node)
    pub fn select(&mut self, key: SkillKey) -> Transition {
        let transition = match self.state {
            Focus::Idle => Transition::Enter(key),
            Focus::Focused(current) if current == key => Transition::Reselect(key),
            Focus::Focused(current) => Transition::Switch {
                from: current,
                to: key,
            },
        };
        self.state = Focus::Focused(key);
        transition
    }

    /// Move focus without the upgrade-on-reselect behavior (Tab cycling)
    pub fn move_to(&mut self, key: SkillKey) -> Transition {
        match self.state {
            Focus::Focused(current) if current == key => Transition::Noop,
            _ => self.select(key),
        }
    }

    /// Escape, close control or tree switch
    pub fn close(&mut self) -> Transition {
        match std::mem::take(&mut self.state) {
            Focus::Idle => Transition::Noop,
            Focus::Focused(key) => Transition::Close(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_sequence() {
        let a = SkillKey::new(0, 0);
        let b = SkillKey::new(0, 1);
        let mut focus = FocusMachine::new();

        assert_eq!(focus.select(a), Transition::Enter(a));
        assert_eq!(focus.select(a), Transition::Reselect(a));
        assert_eq!(focus.select(b), Transition::Switch { from: a, to: b });
        assert_eq!(focus.focused(), Some(b));
        assert_eq!(focus.close(), Transition::Close(b));
        assert_eq!(focus.state(), Focus::Idle);
        assert_eq!(focus.close(), Transition::Noop);
    }

    #[test]
    fn test_move_to_never_reselects() {
        let a = SkillKey::new(1, 0);
        let b = SkillKey::new(1, 4);
        let mut focus = FocusMachine::new();

        assert_eq!(focus.move_to(a), Transition::Enter(a));
        assert_eq!(focus.move_to(a), Transition::Noop);
        assert_eq!(focus.move_to(b), Transition::Switch { from: a, to: b });
    }
}
