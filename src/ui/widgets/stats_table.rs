//! Stat sheet widget for ratatui

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use crate::lang::Translator;
use crate::progression::{StatKind, StatSheet};

/// Column offsets inside the table
const COL_PTS: u16 = 18;
const COL_BASE: u16 = 24;
const COL_BONUS: u16 = 32;
const COL_TOTAL: u16 = 41;

/// Widget for rendering the stat table
pub struct StatsTable<'a> {
    sheet: &'a StatSheet,
    translator: &'a Translator,
    cursor: StatKind,
    title: &'a str,
}

impl<'a> StatsTable<'a> {
    pub fn new(sheet: &'a StatSheet, translator: &'a Translator) -> Self {
        Self {
            sheet,
            translator,
            cursor: StatKind::Health,
            title: "",
        }
    }

    pub fn cursor(mut self, cursor: StatKind) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
}

/// Whole numbers without decimals, everything else with one
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

impl<'a> Widget for StatsTable<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(100, 100, 120)));

        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let put = |buf: &mut Buffer, col: u16, y: u16, text: &str, style: Style| {
            if col < inner.width {
                buf.set_stringn(inner.x + col, y, text, width - col as usize, style);
            }
        };

        let header = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let mut y = inner.y;
        if y >= inner.y + inner.height {
            return;
        }
        put(buf, 2, y, self.translator.t("stats.stat"), header);
        put(buf, COL_PTS, y, self.translator.t("stats.pts"), header);
        put(buf, COL_BASE, y, self.translator.t("stats.base"), header);
        put(buf, COL_BONUS, y, self.translator.t("stats.bonus"), header);
        put(buf, COL_TOTAL, y, self.translator.t("stats.total"), header);
        y += 1;

        for stat in StatKind::ALL {
            if y >= inner.y + inner.height {
                break;
            }
            let selected = stat == self.cursor;
            let mut style = if stat.is_editable() {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Rgb(110, 110, 120))
            };
            if selected {
                style = style.bg(Color::Rgb(40, 40, 60)).add_modifier(Modifier::BOLD);
                buf.set_style(Rect::new(inner.x, y, inner.width, 1), style);
                put(buf, 0, y, "▶", style.fg(Color::Yellow));
            }

            let name = self.translator.t_or(&format!("stats.{}", stat.key()), stat.key());
            put(buf, 2, y, name, style);

            let points = if stat.is_editable() {
                self.sheet.points(stat).to_string()
            } else {
                "-".to_string()
            };
            put(buf, COL_PTS, y, &points, style);
            put(buf, COL_BASE, y, &format_value(stat.base()), style);

            let bonus = self.sheet.bonus(stat);
            let bonus_style = if bonus > 0.0 {
                style.fg(Color::Rgb(100, 255, 100))
            } else {
                style
            };
            put(buf, COL_BONUS, y, &format!("+{}", format_value(bonus)), bonus_style);
            put(buf, COL_TOTAL, y, &format_value(self.sheet.value(stat)), style);
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::{ClassKind, PointFormula};

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(150.0), "150");
        assert_eq!(format_value(157.5), "157.5");
    }

    #[test]
    fn test_renders_rows() {
        let mut sheet = StatSheet::new(ClassKind::Mage, PointFormula::STATS, 5).unwrap();
        sheet.adjust(StatKind::Health, 1).unwrap();
        let translator = Translator::default();
        let area = Rect::new(0, 0, 60, 18);
        let mut buf = Buffer::empty(area);
        StatsTable::new(&sheet, &translator).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Health"));
        assert!(text.contains("Capacity"));
        assert!(text.contains("153.8") || text.contains("153.7"));
    }
}
