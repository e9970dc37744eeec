//! Per-skill input cooldown
//!
//! Overlapping triggers (key auto-repeat plus a click) can fire the same
//! level change twice within a few milliseconds. The throttle keeps its own
//! session clock, advanced by the frame loop, and remembers when each skill
//! last changed.

use std::collections::HashMap;
use std::time::Duration;

use crate::tree::SkillKey;

/// Default cooldown between two level changes of the same skill
pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(60);

#[derive(Debug, Clone)]
pub struct InputThrottle {
    window: Duration,
    /// Session time, advanced by [`InputThrottle::advance`]
    now: Duration,
    last_change: HashMap<SkillKey, Duration>,
}

impl InputThrottle {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            now: Duration::ZERO,
            last_change: HashMap::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
    }

    /// Whether `key` may change right now
    pub fn is_ready(&self, key: SkillKey) -> bool {
        match self.last_change.get(&key) {
            Some(&at) => self.now.saturating_sub(at) >= self.window,
            None => true,
        }
    }

    /// Start the cooldown for `key`
    pub fn record(&mut self, key: SkillKey) {
        self.last_change.insert(key, self.now);
    }

    pub fn clear(&mut self) {
        self.last_change.clear();
    }
}

impl Default for InputThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}
