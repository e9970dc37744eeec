//! Trait tree widget for ratatui
//!
//! Draws a [`TreeSurface`]: connection lines first, then one node per skill
//! with its level counter.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::data::trees::ConnectionKind;
use crate::progression::SkillState;
use crate::render::{clip_segment, line_cells, line_glyph, project, project_raw, Cue, EdgeView, Emphasis, NodeView, TreeSurface};
use crate::tree::Category;

/// Widget for rendering one trait tree
pub struct TreeView<'a> {
    surface: &'a TreeSurface,
    title: &'a str,
    empty_text: &'a str,
}

impl<'a> TreeView<'a> {
    pub fn new(surface: &'a TreeSurface) -> Self {
        Self {
            surface,
            title: "",
            empty_text: "",
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// Shown centered when the tree has no skills yet
    pub fn empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = text;
        self
    }

    /// Cells nodes are projected into when the widget is drawn at `area`.
    /// The last row is kept for the level counter under the lowest node.
    pub fn canvas(area: Rect) -> Rect {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        }
    }

    fn render_edge(&self, edge: &EdgeView, inner: Rect, buf: &mut Buffer) {
        let zoom = self.surface.zoom();
        let from = project_raw(edge.from, inner, zoom);
        let to = project_raw(edge.to, inner, zoom);
        let glyph = line_glyph(from, to);
        let style = edge_style(edge);

        let Some((start, end)) = clip_segment(from, to, inner) else {
            return;
        };
        // Endpoints belong to the nodes
        for (x, y) in line_cells(start, end) {
            if (x, y) == from || (x, y) == to || !contains(inner, x, y) {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x as u16, y as u16)) {
                cell.set_char(glyph).set_style(style);
            }
        }
    }

    fn render_node(&self, node: &NodeView, inner: Rect, buf: &mut Buffer) {
        let Some((x, y)) = project(node.position, inner, self.surface.zoom()) else {
            return;
        };
        let shake = node.cue.map(|c| c.shake_offset()).unwrap_or(0);
        let x = (x as i32 + shake as i32).clamp(inner.x as i32, (inner.x + inner.width).saturating_sub(1) as i32) as u16;

        let style = node_style(node);
        if let Some(cell) = buf.cell_mut((x, y)) {
            cell.set_char(node.icon).set_style(style);
        }

        // Level counter under the icon, centered
        let counter = format!("{}/{}", node.level, node.max_level);
        let row = y + 1;
        if row < inner.y + inner.height {
            let start = x.saturating_sub(counter.len() as u16 / 2).max(inner.x);
            let room = (inner.x + inner.width).saturating_sub(start) as usize;
            let counter_style = match node.emphasis {
                Emphasis::Dimmed => Style::default().fg(Color::Rgb(70, 70, 80)),
                _ => Style::default().fg(Color::Rgb(170, 170, 180)),
            };
            buf.set_stringn(start, row, &counter, room, counter_style);
        }
    }
}

impl<'a> Widget for TreeView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(100, 100, 120)));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width < 3 || inner.height < 3 {
            return;
        }

        if self.surface.nodes().is_empty() {
            let text = self.empty_text;
            let x = inner.x + inner.width.saturating_sub(text.chars().count() as u16) / 2;
            let y = inner.y + inner.height / 2;
            buf.set_stringn(x, y, text, inner.width as usize, Style::default().fg(Color::DarkGray));
            return;
        }

        let canvas = Self::canvas(area);
        for edge in self.surface.edges() {
            self.render_edge(edge, canvas, buf);
        }
        for node in self.surface.nodes() {
            self.render_node(node, canvas, buf);
        }
    }
}

fn contains(area: Rect, x: i32, y: i32) -> bool {
    x >= area.x as i32
        && y >= area.y as i32
        && x < (area.x + area.width) as i32
        && y < (area.y + area.height) as i32
}

/// Get the color for a skill category
pub fn category_color(category: Category) -> Color {
    let (r, g, b) = category.color();
    Color::Rgb(r, g, b)
}

fn edge_style(edge: &EdgeView) -> Style {
    if !edge.active {
        return Style::default().fg(Color::Rgb(55, 55, 65));
    }
    match edge.kind {
        ConnectionKind::Normal => Style::default().fg(Color::Rgb(90, 170, 255)),
        ConnectionKind::Strong => Style::default()
            .fg(Color::Rgb(120, 200, 255))
            .add_modifier(Modifier::BOLD),
        ConnectionKind::Secondary => Style::default().fg(Color::Rgb(110, 110, 160)),
        ConnectionKind::Ultimate => Style::default()
            .fg(Color::Rgb(255, 170, 30))
            .add_modifier(Modifier::BOLD),
    }
}

fn node_style(node: &NodeView) -> Style {
    let mut style = match node.state {
        SkillState::Locked => Style::default().fg(Color::Rgb(80, 80, 90)),
        SkillState::Unaffordable => Style::default().fg(Color::Rgb(140, 140, 150)),
        SkillState::Available => Style::default().fg(category_color(node.category)),
        SkillState::MaxLevel => Style::default()
            .fg(Color::Rgb(255, 215, 0))
            .add_modifier(Modifier::BOLD),
    };

    match node.emphasis {
        Emphasis::Focused => {
            style = style
                .bg(Color::Rgb(50, 50, 70))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        }
        Emphasis::Dimmed => style = style.add_modifier(Modifier::DIM),
        Emphasis::Normal => {}
    }

    match node.cue.map(|c| c.cue) {
        Some(Cue::Upgraded) => style.bg(Color::Rgb(30, 110, 50)),
        Some(Cue::Downgraded) => style.bg(Color::Rgb(110, 60, 30)),
        Some(Cue::Shake) => style.fg(Color::Rgb(230, 70, 70)),
        Some(Cue::FlashRequirements) | None => style,
    }
}
