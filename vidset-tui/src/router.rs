use anyhow::Result;
use ratatui::crossterm::event::KeyCode;
use ratatui::{Frame, layout::Rect};
use strum::EnumIter;

use crate::routes::{log::LogRoute, video::VideoRoute};
use crate::state::AppState;

/// Trait that all routes must implement
/// This enables dynamic dispatch and polymorphic behavior
pub trait RouteHandler: std::fmt::Debug {
    /// Render this route's UI
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState);

    /// Handle keyboard input for this route
    /// Returns Ok(RouteAction) to indicate what should happen next
    fn handle_input(&mut self, key: KeyCode, state: &mut AppState) -> Result<RouteAction>;

    /// Get the display name for breadcrumbs/navigation
    fn name(&self) -> &str;

    /// Optional: Called when entering this route
    fn on_enter(&mut self, _state: &mut AppState) -> Result<()> {
        Ok(())
    }

    /// Optional: Called when leaving this route
    fn on_exit(&mut self, _state: &mut AppState) -> Result<()> {
        Ok(())
    }

    /// Optional: Called every frame after the controller has been updated
    fn on_tick(&mut self, _state: &AppState) -> RouteAction {
        RouteAction::None
    }

    /// Modal routes swallow global keys such as tab switching
    fn is_modal(&self) -> bool {
        false
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![("Tab", "Switch Tab"), ("Q", "Quit")]
    }
}

/// Actions that can be returned from route handlers
#[derive(Debug)]
pub enum RouteAction {
    /// Do nothing, stay on current route
    None,
    /// Go back to previous route
    Pop,
    /// Navigate to a new route
    Push(Box<dyn RouteHandler>),
}

/// Router manages the navigation stack
pub struct Router {
    /// Stack of route handlers, last element is current route
    stack: Vec<Box<dyn RouteHandler>>,
}

impl Router {
    pub fn new(initial_route: Box<dyn RouteHandler>) -> Self {
        Self {
            stack: vec![initial_route],
        }
    }

    /// Get current route (top of stack)
    pub fn current(&self) -> &dyn RouteHandler {
        self.stack
            .last()
            .expect("Stack should never be empty")
            .as_ref()
    }

    /// Get mutable reference to current route
    pub fn current_mut(&mut self) -> &mut Box<dyn RouteHandler> {
        self.stack.last_mut().expect("Stack should never be empty")
    }

    /// Route drawn underneath a modal, if any
    pub fn underlying(&self) -> Option<&dyn RouteHandler> {
        let len = self.stack.len();
        if len > 1 && self.current().is_modal() {
            self.stack.get(len - 2).map(|r| r.as_ref())
        } else {
            None
        }
    }

    /// Execute a route action
    pub fn execute_action(&mut self, action: RouteAction, state: &mut AppState) -> Result<()> {
        match action {
            RouteAction::None => {}
            RouteAction::Pop => {
                self.pop(state)?;
            }
            RouteAction::Push(route) => {
                self.push(route, state)?;
            }
        }
        Ok(())
    }

    /// Navigate to a new route (push onto stack)
    pub fn push(&mut self, mut route: Box<dyn RouteHandler>, state: &mut AppState) -> Result<()> {
        route.on_enter(state)?;
        self.stack.push(route);
        Ok(())
    }

    /// Go back (pop from stack)
    pub fn pop(&mut self, state: &mut AppState) -> Result<Option<Box<dyn RouteHandler>>> {
        // Keep at least one route in the stack
        if self.stack.len() > 1 {
            if let Some(mut route) = self.stack.pop() {
                route.on_exit(state)?;
                return Ok(Some(route));
            }
        }
        Ok(None)
    }

    /// Replace current route (useful for tab switching)
    pub fn replace(&mut self, mut new_route: Box<dyn RouteHandler>, state: &mut AppState) -> Result<()> {
        if let Some(mut old_route) = self.stack.pop() {
            old_route.on_exit(state)?;
        }
        new_route.on_enter(state)?;
        self.stack.push(new_route);
        Ok(())
    }
}

/// Main tabs, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, strum::Display)]
pub enum Tab {
    Video,
    Log,
}

impl Tab {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Video" => Some(Tab::Video),
            "Log" => Some(Tab::Log),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Video => Tab::Log,
            Tab::Log => Tab::Video,
        }
    }

    pub fn route(self) -> Box<dyn RouteHandler> {
        match self {
            Tab::Video => Box::new(VideoRoute),
            Tab::Log => Box::new(LogRoute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Video.next(), Tab::Log);
        assert_eq!(Tab::Log.next(), Tab::Video);
    }

    #[test]
    fn test_tab_names_match_routes() {
        use strum::IntoEnumIterator;
        for tab in Tab::iter() {
            let route = tab.route();
            assert_eq!(route.name(), tab.to_string());
            assert_eq!(Tab::from_name(route.name()), Some(tab));
        }
    }
}
