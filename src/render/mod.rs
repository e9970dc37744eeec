//! Retained tree view and layout math
//!
//! The surface tracks what each node looks like; the layout helpers map
//! percent positions to terminal cells. Drawing itself lives in `ui`.

pub mod layout;
pub mod surface;

pub use layout::{clip_segment, line_cells, line_glyph, project, project_raw, Zoom, FOCUS_ZOOM};
pub use surface::{ActiveCue, Cue, EdgeView, Emphasis, NodeView, TreeSurface};
