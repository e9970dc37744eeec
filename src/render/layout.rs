//! Percent-to-cell projection and line rasterizing

use ratatui::layout::Rect;

use crate::tree::Position;

/// Scale applied around the focused node
pub const FOCUS_ZOOM: f32 = 1.8;

/// Layout transform that centers `center` and scales around it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    pub center: Position,
    pub scale: f32,
}

impl Zoom {
    pub fn on(center: Position) -> Self {
        Self {
            center,
            scale: FOCUS_ZOOM,
        }
    }

    /// Position after zooming, still in percent
    pub fn apply(&self, pos: Position) -> Position {
        Position::new(
            50.0 + (pos.x - self.center.x) * self.scale,
            50.0 + (pos.y - self.center.y) * self.scale,
        )
    }
}

/// Cell for a percent position inside `area`, `None` when it falls outside
pub fn project(pos: Position, area: Rect, zoom: Option<Zoom>) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let pos = zoom.map(|z| z.apply(pos)).unwrap_or(pos);
    if !(0.0..=100.0).contains(&pos.x) || !(0.0..=100.0).contains(&pos.y) {
        return None;
    }
    let (col, row) = to_cell(pos, area);
    Some((col as u16, row as u16))
}

/// Like [`project`] but unclipped, for lines that leave the view
pub fn project_raw(pos: Position, area: Rect, zoom: Option<Zoom>) -> (i32, i32) {
    to_cell(zoom.map(|z| z.apply(pos)).unwrap_or(pos), area)
}

fn to_cell(pos: Position, area: Rect) -> (i32, i32) {
    let col = area.x as f32 + pos.x / 100.0 * area.width.saturating_sub(1) as f32;
    let row = area.y as f32 + pos.y / 100.0 * area.height.saturating_sub(1) as f32;
    (col.round() as i32, row.round() as i32)
}

/// Cells of the segment between two points, endpoints included (Bresenham)
pub fn line_cells(from: (i32, i32), to: (i32, i32)) -> Vec<(i32, i32)> {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut cells = Vec::with_capacity((dx.max(-dy) + 1) as usize);
    loop {
        cells.push((x, y));
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

/// Part of the segment inside `area` (Liang-Barsky), `None` when it misses.
/// Rasterize the result instead of the raw segment: zoomed edges can end far
/// outside the view.
pub fn clip_segment(
    from: (i32, i32),
    to: (i32, i32),
    area: Rect,
) -> Option<((i32, i32), (i32, i32))> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
    let (xmin, ymin) = (area.x as f64, area.y as f64);
    let xmax = xmin + (area.width - 1) as f64;
    let ymax = ymin + (area.height - 1) as f64;

    let mut enter = 0.0_f64;
    let mut leave = 1.0_f64;
    for (p, q) in [(-dx, x0 - xmin), (dx, xmax - x0), (-dy, y0 - ymin), (dy, ymax - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > leave {
                return None;
            }
            enter = enter.max(r);
        } else {
            if r < enter {
                return None;
            }
            leave = leave.min(r);
        }
    }

    let point = |t: f64| {
        (
            (x0 + t * dx).round().clamp(xmin, xmax) as i32,
            (y0 + t * dy).round().clamp(ymin, ymax) as i32,
        )
    };
    Some((point(enter), point(leave)))
}

/// Box-drawing glyph for a line with the given direction
pub fn line_glyph(from: (i32, i32), to: (i32, i32)) -> char {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    if dy == 0 {
        '─'
    } else if dx == 0 || dx.abs() < dy.abs() / 2 {
        '│'
    } else if dy.abs() < dx.abs() / 3 {
        '─'
    } else if (dx > 0) == (dy > 0) {
        '╲'
    } else {
        '╱'
    }
}
