//! Session state: screens, focus and the planner that ties them together

mod focus;
mod state;

pub use focus::{Focus, FocusMachine, Transition};
pub use state::{Confirm, Planner, Pool, Screen, StartOptions, StatusKind, StatusLine};
