//! Point budgets and the allocation engines built on them

pub mod budget;
pub mod engine;
pub mod events;
pub mod stats;
pub mod throttle;

pub use budget::{check_level, Budget, LevelChange, PointFormula, MAX_LEVEL, MIN_LEVEL};
pub use engine::{SkillState, TraitEngine};
pub use events::{EventQueue, PlannerEvent, Step};
pub use stats::{ClassKind, StatKind, StatSheet};
pub use throttle::{InputThrottle, DEFAULT_COOLDOWN};
