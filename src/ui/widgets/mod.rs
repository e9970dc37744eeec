//! UI widgets

pub mod stats_table;
pub mod tree_view;

pub use stats_table::StatsTable;
pub use tree_view::{category_color, TreeView};
