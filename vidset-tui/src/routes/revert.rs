use ratatui::{
    Frame,
    crossterm::event::KeyCode,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    router::{RouteAction, RouteHandler},
    state::AppState,
};

// ==================================================================
// Revert Dialogue Route Implementation
// ==================================================================

/// Modal shown while applied video settings await confirmation.
#[derive(Debug, Clone)]
pub struct RevertRoute;

impl RouteHandler for RevertRoute {
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        draw_revert_dialog(frame, area, state);
    }

    fn handle_input(&mut self, key: KeyCode, state: &mut AppState) -> anyhow::Result<RouteAction> {
        match key {
            KeyCode::Enter | KeyCode::Char('y') => {
                state.confirm();
                Ok(RouteAction::Pop)
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                state.revert();
                Ok(RouteAction::Pop)
            }
            _ => Ok(RouteAction::None),
        }
    }

    fn name(&self) -> &str {
        "Revert"
    }

    fn on_tick(&mut self, state: &AppState) -> RouteAction {
        // Countdown ran out and the controller already reverted
        if state.controller.is_pending_confirmation() {
            RouteAction::None
        } else {
            RouteAction::Pop
        }
    }

    fn is_modal(&self) -> bool {
        true
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![("Enter/Y", "Keep"), ("Esc/N", "Revert"), ("Q", "Quit")]
    }
}

/// Draw the keep-or-revert dialog overlay
fn draw_revert_dialog(f: &mut Frame, area: Rect, state: &AppState) {
    if !state.is_dialog_open() {
        return;
    }

    // Calculate centered dialog area
    let dialog_width = 44u16.min(area.width);
    let dialog_height = 7u16.min(area.height);
    let x = area.x + (area.width.saturating_sub(dialog_width)) / 2;
    let y = area.y + (area.height.saturating_sub(dialog_height)) / 2;
    let dialog_area = Rect::new(x, y, dialog_width, dialog_height);

    // Clear the area behind dialog
    f.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Keep these settings? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let text = vec![
        Line::from(Span::styled(
            state.panel().countdown_text.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green)),
            Span::raw(" Keep   "),
            Span::styled("[Esc]", Style::default().fg(Color::Red)),
            Span::raw(" Revert"),
        ]),
    ];

    f.render_widget(Paragraph::new(text), inner);
}
