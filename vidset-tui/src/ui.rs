use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strum::IntoEnumIterator;

use crate::router::{Router, Tab};
use crate::state::AppState;

/// Draw the TUI interface
pub fn draw(f: &mut Frame, state: &AppState, router: &Router) {
    // Main horizontal split: Sidebar (left) and Main Content (right)
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([
            Constraint::Length(15), // Sidebar navigation
            Constraint::Min(40),    // Main content area
        ])
        .split(f.area());

    draw_sidebar(f, main_chunks[0], router);
    draw_main_content(f, main_chunks[1], state, router);
}

/// Draw the sidebar navigation
fn draw_sidebar(f: &mut Frame, area: Rect, router: &Router) {
    let block = Block::default()
        .title(" Navigation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let base = router.underlying().unwrap_or_else(|| router.current());
    let active = Tab::from_name(base.name());

    // Navigation items - generated from Tab enum
    let nav_text: Vec<Line> = Tab::iter()
        .map(|tab| {
            let is_active = active == Some(tab);
            let prefix = if is_active { "▶ " } else { "  " };
            let style = if is_active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(format!("{}{}", prefix, tab), style))
        })
        .collect();

    f.render_widget(Paragraph::new(nav_text), inner);
}

/// Draw the current route with global footers
fn draw_main_content(f: &mut Frame, area: Rect, state: &AppState, router: &Router) {
    // Split the main area into Content (top) and Footer (bottom)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Route specific content
            Constraint::Length(3), // Controls info
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    let content_area = chunks[0];

    // Modals draw on top of the route they cover
    if let Some(below) = router.underlying() {
        below.render(f, content_area, state);
    }
    router.current().render(f, content_area, state);

    draw_controls(f, chunks[1], state, router);
    draw_status(f, chunks[2], state);
}

/// Draw the controls help section
fn draw_controls(f: &mut Frame, area: Rect, state: &AppState, router: &Router) {
    let mut controls = Vec::new();
    for (key, label) in router.current().help_items(state) {
        let color = match key {
            "Q" => Color::Red,
            "Tab" => Color::Magenta,
            _ => Color::Yellow,
        };
        controls.push(Span::styled(format!("[{}]", key), Style::default().fg(color)));
        controls.push(Span::raw(format!(" {}  ", label)));
    }

    let paragraph = Paragraph::new(Line::from(controls))
        .block(Block::default().borders(Borders::ALL).title(" Controls "));

    f.render_widget(paragraph, area);
}

/// Draw the status section
fn draw_status(f: &mut Frame, area: Rect, state: &AppState) {
    let (text, status_style) = match &state.error_message {
        Some(err) => (format!("Error: {}", err), Style::default().fg(Color::Red)),
        None if state.controller.is_pending_confirmation() => (
            state.status_message.clone(),
            Style::default().fg(Color::Yellow),
        ),
        None => (
            state.status_message.clone(),
            Style::default().fg(Color::Green),
        ),
    };

    let paragraph = Paragraph::new(text)
        .style(status_style)
        .block(Block::default().borders(Borders::ALL).title(" Status "));

    f.render_widget(paragraph, area);
}
