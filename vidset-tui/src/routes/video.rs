use std::time::Instant;

use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::{
    router::{RouteAction, RouteHandler},
    routes::revert::RevertRoute,
    state::AppState,
};

// ==================================================================
// Video Settings Route Implementation
// ==================================================================

#[derive(Debug, Clone)]
pub struct VideoRoute;

impl RouteHandler for VideoRoute {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        draw_video_panel(frame, area, state);
    }

    fn handle_input(&mut self, key: KeyCode, state: &mut AppState) -> anyhow::Result<RouteAction> {
        match key {
            KeyCode::Left => {
                state.controller.stage_previous_resolution();
            }
            KeyCode::Right => {
                state.controller.stage_next_resolution();
            }
            KeyCode::Char('f') => state.select_window_mode(true),
            KeyCode::Char('w') => state.select_window_mode(false),
            KeyCode::Char(' ') => {
                let fullscreen = state.panel().fullscreen_checked;
                state.select_window_mode(!fullscreen);
            }
            KeyCode::Char('r') => state.apply_resolution(),
            KeyCode::Char('m') => state.apply_window_mode(),
            KeyCode::Char('a') | KeyCode::Enter => {
                state.apply_with_revert_window(Instant::now());
                // A zero timeout has already reverted
                if state.controller.is_pending_confirmation() {
                    return Ok(RouteAction::Push(Box::new(RevertRoute)));
                }
            }
            _ => {}
        }
        Ok(RouteAction::None)
    }

    fn name(&self) -> &str {
        "Video"
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![
            ("←/→", "Resolution"),
            ("F/W", "Fullscreen/Windowed"),
            ("A", "Apply"),
            ("R/M", "Apply Res/Mode Only"),
            ("Tab", "Switch Tab"),
            ("Q", "Quit"),
        ]
    }
}

/// Draw the video settings panel
pub fn draw_video_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Resolution selector
            Constraint::Length(3), // Window mode toggles
            Constraint::Min(0),    // Available modes
        ])
        .split(area);

    draw_resolution_selector(f, chunks[0], state);
    draw_window_mode(f, chunks[1], state);
    draw_mode_list(f, chunks[2], state);
}

fn draw_resolution_selector(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" 🖥  Resolution ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let label = &state.panel().resolution_text;
    let line = Line::from(vec![
        Span::styled("◀ ", Style::default().fg(Color::Yellow)),
        Span::styled(
            label.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(Color::Yellow)),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_window_mode(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Window Mode ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let panel = state.panel();
    let toggle = |checked: bool, label: &'static str| {
        let (mark, style) = if checked {
            (
                "[x] ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("[ ] ", Style::default().fg(Color::Gray))
        };
        Span::styled(format!("{}{}", mark, label), style)
    };

    let line = Line::from(vec![
        toggle(panel.fullscreen_checked, "Fullscreen"),
        Span::raw("    "),
        toggle(panel.windowed_checked, "Windowed"),
    ]);

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_mode_list(f: &mut Frame, area: Rect, state: &AppState) {
    let controller = &state.controller;
    let block = Block::default()
        .title(format!(
            " Available Modes ({}) ",
            controller.available_resolutions().len()
        ))
        .borders(Borders::ALL);

    let items: Vec<ListItem> = controller
        .available_resolutions()
        .iter()
        .enumerate()
        .map(|(i, res)| {
            let is_staged = controller.staged_resolution_index() == i;
            let is_confirmed = controller.confirmed_resolution_index() == i;

            let prefix = if is_staged { "▶ " } else { "  " };
            let style = if is_staged {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![Span::styled(format!("{}{}", prefix, res), style)];
            if is_confirmed {
                spans.push(Span::styled("  (confirmed)", Style::default().fg(Color::Green)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    if items.is_empty() {
        let empty_msg = Paragraph::new("The display reported no modes.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty_msg, area);
    } else {
        f.render_widget(List::new(items).block(block), area);
    }
}
