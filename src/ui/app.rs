//! Main UI Application
//!
//! Coordinates rendering and input handling across all screens.

use anyhow::Result;
use std::cell::Cell;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::game::{Confirm, Planner, Screen, StatusKind};
use crate::progression::{ClassKind, SkillState};
use crate::render::{project, Cue};
use crate::tree::{SkillKey, Threshold};

use super::widgets::{category_color, StatsTable, TreeView};

/// Truncate a string to fit within max_len characters, adding "…" if truncated
fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else if max_len <= 1 {
        "…".to_string()
    } else {
        let truncated: String = name.chars().take(max_len - 1).collect();
        format!("{}…", truncated)
    }
}

/// Main UI application
#[derive(Debug, Default)]
pub struct App {
    /// Key reference overlay
    show_help: bool,
    /// Where the tree canvas was last drawn, for mouse hit tests
    tree_canvas: Cell<Rect>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press. Returns `true` when the program should exit.
    pub fn handle_input(&mut self, key: KeyEvent, planner: &mut Planner) -> Result<bool> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global quit shortcut
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            planner.quit();
            return Ok(true);
        }

        // A pending confirmation swallows everything else
        if planner.pending().is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => planner.confirm(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => planner.confirm(false),
                _ => {}
            }
            return Ok(false);
        }

        if self.show_help {
            self.show_help = false;
            return Ok(false);
        }

        match key.code {
            KeyCode::Char('?') => {
                self.show_help = true;
                return Ok(false);
            }
            KeyCode::Char('m') => {
                planner.toggle_sound();
                return Ok(false);
            }
            KeyCode::Char('g') => {
                planner.toggle_language();
                return Ok(false);
            }
            _ => {}
        }

        match planner.screen() {
            Screen::ClassSelect => self.handle_class_input(key, planner),
            Screen::Stats => self.handle_stats_input(key, planner),
            Screen::Traits => self.handle_traits_input(key, planner, ctrl),
        }
        Ok(planner.should_quit())
    }

    /// Left click on a node selects it (a second click upgrades); a click
    /// on empty canvas closes focus.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, planner: &mut Planner) -> Result<bool> {
        if planner.screen() != Screen::Traits || planner.pending().is_some() || self.show_help {
            return Ok(false);
        }
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(false);
        }

        let canvas = self.tree_canvas.get();
        let (col, row) = (mouse.column, mouse.row);
        match self.skill_at(planner, col, row) {
            Some(skill) => planner.select_skill(skill)?,
            None => {
                let inside = col >= canvas.x
                    && col < canvas.x + canvas.width
                    && row >= canvas.y
                    && row < canvas.y + canvas.height;
                if inside {
                    planner.close_focus();
                }
            }
        }
        Ok(planner.should_quit())
    }

    /// Skill drawn at a terminal cell: its icon or the level counter below it
    fn skill_at(&self, planner: &Planner, col: u16, row: u16) -> Option<usize> {
        let canvas = self.tree_canvas.get();
        let surface = planner.surface()?;
        surface.nodes().iter().find_map(|node| {
            let (x, y) = project(node.position, canvas, surface.zoom())?;
            let hit = (row == y && col == x) || (row == y + 1 && col.abs_diff(x) <= 1);
            hit.then_some(node.skill)
        })
    }

    fn handle_class_input(&mut self, key: KeyEvent, planner: &mut Planner) {
        match key.code {
            KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                planner.move_class_cursor(false)
            }
            KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                planner.move_class_cursor(true)
            }
            KeyCode::Enter | KeyCode::Char(' ') => planner.choose_class(),
            KeyCode::Char('q') | KeyCode::Esc => planner.quit(),
            _ => {}
        }
    }

    fn handle_stats_input(&mut self, key: KeyEvent, planner: &mut Planner) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => planner.move_stat_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => planner.move_stat_cursor(1),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Enter => planner.adjust_stat(1),
            KeyCode::Char('-') | KeyCode::Backspace => planner.adjust_stat(-1),
            KeyCode::Left | KeyCode::Char('h') => planner.cycle_class(false),
            KeyCode::Right | KeyCode::Char('l') => planner.cycle_class(true),
            KeyCode::Char('[') => planner.nudge_stat_level(-1),
            KeyCode::Char(']') => planner.nudge_stat_level(1),
            KeyCode::Char('r') => planner.reset_stats(),
            KeyCode::Char('t') | KeyCode::Tab => planner.set_screen(Screen::Traits),
            KeyCode::Char('q') | KeyCode::Esc => planner.set_screen(Screen::ClassSelect),
            _ => {}
        }
    }

    fn handle_traits_input(&mut self, key: KeyEvent, planner: &mut Planner, ctrl: bool) {
        match key.code {
            KeyCode::Char('r') if ctrl => planner.request_reset_tree(),
            KeyCode::Tab => planner.cycle_skill(true),
            KeyCode::BackTab => planner.cycle_skill(false),
            KeyCode::Left => planner.switch_tree(-1),
            KeyCode::Right => planner.switch_tree(1),
            KeyCode::Char(' ') | KeyCode::Enter => planner.activate(),
            KeyCode::Char('-') | KeyCode::Backspace => planner.downgrade_focused(),
            KeyCode::Char('[') => planner.nudge_trait_level(-1),
            KeyCode::Char(']') => planner.nudge_trait_level(1),
            // 1-9 pick the first nine trees, 0 the tenth
            KeyCode::Char(c @ '0'..='9') => {
                if let Some(digit) = c.to_digit(10) {
                    let idx = if digit == 0 { 9 } else { digit as usize - 1 };
                    planner.goto_tree(idx);
                }
            }
            KeyCode::Esc => {
                if planner.focused().is_some() {
                    planner.close_focus();
                } else {
                    planner.set_screen(Screen::Stats);
                }
            }
            KeyCode::Char('q') => planner.set_screen(Screen::Stats),
            _ => {}
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    pub fn render(&self, frame: &mut Frame, planner: &Planner) {
        // Clear the entire screen first to prevent artifacts
        frame.render_widget(Clear, frame.area());

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(8),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], planner);
        self.render_status(frame, chunks[1], planner);
        match planner.screen() {
            Screen::ClassSelect => self.render_class_select(frame, chunks[2], planner),
            Screen::Stats => self.render_stats(frame, chunks[2], planner),
            Screen::Traits => self.render_traits(frame, chunks[2], planner),
        }
        self.render_footer(frame, chunks[3], planner);

        if let Some(pending) = planner.pending() {
            self.render_confirm_popup(frame, planner, pending);
        } else if self.show_help {
            self.render_help(frame, planner);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, planner: &Planner) {
        let title_style = Style::default()
            .fg(Color::Rgb(255, 200, 80))
            .add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(Color::DarkGray);

        let mut spans = vec![Span::styled(format!(" {} ", planner.t("page.title")), title_style)];
        match planner.screen() {
            Screen::ClassSelect => {
                spans.push(Span::styled(planner.t("subtitle").to_string(), Style::default().fg(Color::White)));
            }
            Screen::Stats => {
                let stats = planner.stats();
                let budget = stats.budget();
                spans.push(Span::styled(
                    planner.t(&format!("class.{}", stats.class().key())).to_string(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(
                    format!(
                        "  {} {}  {} {}/{}",
                        planner.t("stats.level"),
                        stats.level(),
                        planner.t("stats.points"),
                        budget.available_points(),
                        budget.total_points()
                    ),
                    Style::default().fg(Color::White),
                ));
            }
            Screen::Traits => {
                let budget = planner.engine().budget();
                let available = budget.available_points();
                let points_style = if available > 0 {
                    Style::default().fg(Color::Rgb(100, 255, 100)).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Rgb(230, 70, 70)).add_modifier(Modifier::BOLD)
                };
                spans.push(Span::styled(
                    format!("{} {}  ", planner.t("stats.level"), budget.level()),
                    Style::default().fg(Color::White),
                ));
                spans.push(Span::styled(format!("{}: ", planner.t("traits.points")), dim));
                spans.push(Span::styled(
                    format!("{}/{}", available, budget.total_points()),
                    points_style,
                ));
            }
        }

        let prefs = planner.prefs();
        spans.push(Span::styled(
            format!(
                "   {} {}",
                if prefs.sound_enabled { "♪" } else { "×" },
                prefs.language.code()
            ),
            dim,
        ));

        let header = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(100, 100, 120))),
        );
        frame.render_widget(header, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, planner: &Planner) {
        let Some(status) = planner.status() else {
            return;
        };
        let style = match status.kind {
            StatusKind::Info => Style::default().fg(Color::Rgb(120, 200, 255)),
            StatusKind::Warning => Style::default().fg(Color::Rgb(255, 150, 80)),
        };
        let text = truncate_name(&status.text, area.width.saturating_sub(2) as usize);
        frame.render_widget(Paragraph::new(Span::styled(format!(" {}", text), style)), area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, planner: &Planner) {
        let key = match planner.screen() {
            Screen::ClassSelect => "help.classes",
            Screen::Stats => "help.stats",
            Screen::Traits => "help.traits",
        };
        let text = truncate_name(planner.t(key), area.width as usize);
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray))),
            area,
        );
    }

    fn render_class_select(&self, frame: &mut Frame, area: Rect, planner: &Planner) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(centered_rect(90, 60, area));

        for (class, &card) in ClassKind::ALL.iter().zip(cards.iter()) {
            let selected = *class == planner.class_cursor();
            let border = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(100, 100, 120))
            };
            let name_style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(planner.t(&format!("class.{}", class.key())).to_string(), name_style)),
                Line::from(""),
            ];
            // Multipliers that differ from a squire
            for stat in crate::progression::StatKind::ALL {
                let mult = class.multiplier(stat);
                if (mult - 1.0).abs() > f64::EPSILON {
                    let color = if mult > 1.0 {
                        Color::Rgb(100, 255, 100)
                    } else {
                        Color::Rgb(230, 110, 110)
                    };
                    lines.push(Line::from(vec![
                        Span::styled(
                            format!("{} ", planner.translator().t_or(&format!("stats.{}", stat.key()), stat.key())),
                            Style::default().fg(Color::Gray),
                        ),
                        Span::styled(format!("×{:.2}", mult), Style::default().fg(color)),
                    ]));
                }
            }
            if selected {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    planner.t("instructions").to_string(),
                    Style::default().fg(Color::DarkGray),
                )));
            }

            let widget = Paragraph::new(lines)
                .alignment(ratatui::layout::Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(border));
            frame.render_widget(widget, card);
        }
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect, planner: &Planner) {
        let title = format!(" {} ", planner.t("screen.stats"));
        let table = StatsTable::new(planner.stats(), planner.translator())
            .cursor(planner.stat_cursor())
            .title(&title);
        frame.render_widget(table, area);
    }

    fn render_traits(&self, frame: &mut Frame, area: Rect, planner: &Planner) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(6)])
            .split(area);

        // Tree tabs
        let mut tabs = Vec::new();
        for (i, tree) in planner.engine().trees().iter().enumerate() {
            let style = if i == planner.active_tree() {
                Style::default().fg(Color::Black).bg(Color::Rgb(255, 200, 80)).add_modifier(Modifier::BOLD)
            } else if tree.points_spent() > 0 {
                Style::default().fg(Color::Rgb(120, 200, 255))
            } else {
                Style::default().fg(Color::Gray)
            };
            tabs.push(Span::styled(format!(" {} {} ", tree.icon, planner.tree_name(i)), style));
        }
        frame.render_widget(Paragraph::new(Line::from(tabs)), rows[0]);

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(rows[1]);

        let Some(surface) = planner.surface() else {
            return;
        };
        self.tree_canvas.set(TreeView::canvas(cols[0]));
        let title = format!(" {} ", planner.tree_name(planner.active_tree()));
        let view = TreeView::new(surface)
            .title(&title)
            .empty_text(planner.t("traits.comingSoon"));
        frame.render_widget(view, cols[0]);

        match planner.focused() {
            Some(key) => self.render_info_panel(frame, cols[1], planner, key),
            None => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Rgb(60, 60, 70)));
                frame.render_widget(block, cols[1]);
            }
        }
    }

    /// Details of the focused skill
    fn render_info_panel(&self, frame: &mut Frame, area: Rect, planner: &Planner, key: SkillKey) {
        let (Ok(skill), Some(tree)) = (planner.engine().skill(key), planner.engine().tree(key.tree)) else {
            return;
        };
        let node = planner.surface().and_then(|s| s.node(key.skill));
        let flashing = node
            .and_then(|n| n.cue)
            .map(|c| c.cue == Cue::FlashRequirements)
            .unwrap_or(false);
        let state = node.map(|n| n.state).unwrap_or(SkillState::Locked);
        let tr = planner.translator();

        let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{} {}", skill.icon, planner.skill_name(key)),
                Style::default().fg(category_color(skill.category)).add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(format!("[{}] ", skill.category.name()), Style::default().fg(category_color(skill.category))),
                Span::styled(
                    format!("{}/{}", skill.level(), skill.max_level()),
                    if state == SkillState::MaxLevel {
                        Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(Color::White)
                    },
                ),
            ]),
            Line::from(""),
        ];

        let (description, effect) = planner.skill_details(key);
        if !description.is_empty() {
            lines.push(Line::from(Span::styled(description, Style::default().fg(Color::Gray))));
            lines.push(Line::from(""));
        }
        if !effect.is_empty() {
            lines.push(Line::from(Span::styled(tr.t("traits.effect").to_string(), heading)));
            lines.push(Line::from(Span::styled(effect, Style::default().fg(Color::Rgb(100, 255, 100)))));
            lines.push(Line::from(""));
        }

        // Thresholds, reached ones highlighted
        lines.push(Line::from(Span::styled(tr.t("traits.thresholds").to_string(), heading)));
        let mut thresholds = Vec::new();
        for (i, threshold) in skill.thresholds.iter().enumerate() {
            let reached = (i as u32) < skill.level();
            let style = if reached {
                Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let text = match threshold {
                Threshold::Active => tr.t_or("traits.active", "Active").to_string(),
                Threshold::Level(n) => n.to_string(),
            };
            thresholds.push(Span::styled(text, style));
            thresholds.push(Span::raw(" "));
        }
        lines.push(Line::from(thresholds));
        lines.push(Line::from(""));

        // Requirements, unmet ones marked
        let req_heading = if flashing {
            heading.fg(Color::Rgb(255, 80, 80)).add_modifier(Modifier::REVERSED)
        } else {
            heading
        };
        lines.push(Line::from(Span::styled(tr.t("traits.requirements").to_string(), req_heading)));
        if skill.requires.is_empty() {
            lines.push(Line::from(Span::styled(
                tr.t("traits.noRequirements").to_string(),
                Style::default().fg(Color::DarkGray),
            )));
        }
        let unmet = tree.unmet_requirements(key.skill);
        for req in &skill.requires {
            let met = !unmet.contains(req);
            let (mark, color) = if met {
                ("✓", Color::Rgb(100, 255, 100))
            } else {
                ("✗", Color::Rgb(255, 80, 80))
            };
            let mut style = Style::default().fg(color);
            if flashing && !met {
                style = style.add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK);
            }
            let name = planner.skill_name(SkillKey::new(key.tree, req.skill));
            lines.push(Line::from(Span::styled(format!("{} {} {}", mark, name, req.level), style)));
        }

        let panel = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(category_color(skill.category))),
        );
        frame.render_widget(panel, area);
    }

    fn render_confirm_popup(&self, frame: &mut Frame, planner: &Planner, pending: Confirm) {
        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);

        let (title, body) = match pending {
            Confirm::LevelChange { deficit, .. } => (
                planner.t("confirm.levelTitle"),
                planner.t("confirm.levelBody").replacen("{}", &deficit.to_string(), 1),
            ),
            Confirm::ResetTree { .. } => (
                planner.t("confirm.resetTitle"),
                planner.t("confirm.resetBody").to_string(),
            ),
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(body, Style::default().fg(Color::White))),
            Line::from(""),
            Line::from(Span::styled(
                planner.t("confirm.hint").to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
        ];
        let popup = Paragraph::new(lines)
            .alignment(ratatui::layout::Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(format!(" {} ", title))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Rgb(255, 150, 80))),
            );
        frame.render_widget(popup, area);
    }

    fn render_help(&self, frame: &mut Frame, planner: &Planner) {
        let area = centered_rect(70, 40, frame.area());
        frame.render_widget(Clear, area);

        let lines: Vec<Line> = ["help.classes", "help.stats", "help.traits"]
            .iter()
            .flat_map(|key| {
                [
                    Line::from(Span::styled(planner.t(key).to_string(), Style::default().fg(Color::White))),
                    Line::from(""),
                ]
            })
            .collect();
        let help = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" ? ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(100, 100, 120))),
        );
        frame.render_widget(help, area);
    }
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
