use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

use crate::{
    logger::log_widget,
    router::{RouteAction, RouteHandler},
    state::AppState,
};

// ==================================================================
// Log Route Implementation
// ==================================================================

#[derive(Debug, Clone)]
pub struct LogRoute;

impl RouteHandler for LogRoute {
    fn render(&self, frame: &mut Frame, area: Rect, _state: &AppState) {
        let block = Block::default()
            .title(" 📋 Log ")
            .borders(Borders::ALL)
            .border_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );

        frame.render_widget(log_widget(block), area);
    }

    fn handle_input(&mut self, _key: KeyCode, _state: &mut AppState) -> anyhow::Result<RouteAction> {
        Ok(RouteAction::None)
    }

    fn name(&self) -> &str {
        "Log"
    }
}
