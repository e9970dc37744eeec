//! User Interface module
//!
//! Terminal UI using ratatui: one screen per planner view.

pub mod app;
pub mod widgets;

pub use app::App;
