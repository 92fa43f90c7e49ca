use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use vidset_core::{PanelModel, SimulatedDisplay, TomlStore, VideoSettingsController};

mod config;
mod logger;
mod router;
mod routes;
mod state;
mod ui;

use config::CliArgs;
use router::{Router, Tab};
use state::AppState;

fn main() -> anyhow::Result<()> {
    logger::setup_logging()?;

    log::info!("Starting vidset");

    let args = CliArgs::parse();
    let mut config = config::load(args.config.as_deref())?;
    if let Some(prefs) = args.prefs {
        config.prefs_path = Some(prefs);
    }

    let modes = config.resolutions()?;
    let prefs_path = config.resolve_prefs_path()?;
    log::info!("Using preferences at {}", prefs_path.display());

    let controller = VideoSettingsController::new(
        SimulatedDisplay::new(modes),
        TomlStore::open_or_empty(prefs_path),
        PanelModel::new(),
    );
    let state = AppState::new(controller, config.revert_timeout_secs);

    run_tui(state)
}

fn run_tui(mut state: AppState) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut router = Router::new(Tab::Video.route());

    let result = event_loop(&mut terminal, &mut state, &mut router);

    // Never leave the user on settings they did not accept
    if state.controller.is_pending_confirmation() {
        log::info!("Quit during revert window, restoring confirmed settings");
        state.revert();
    }
    state.controller.detach();
    state.flush_prefs();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut ratatui::Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    router: &mut Router,
) -> anyhow::Result<()> {
    loop {
        // Advance the revert countdown
        state.tick(Instant::now());
        let action = router.current_mut().on_tick(state);
        router.execute_action(action, state)?;

        // Draw UI
        terminal.draw(|f| ui::draw(f, &*state, &*router))?;

        // Handle input
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let should_quit = handle_global_keys(key.code, state, router)?;
                    if should_quit {
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Handle global keys and delegate route-specific input to router
fn handle_global_keys(key: KeyCode, state: &mut AppState, router: &mut Router) -> anyhow::Result<bool> {
    // Global keys that work regardless of route
    match key {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Tab if !router.current().is_modal() => {
            let current = Tab::from_name(router.current().name()).unwrap_or(Tab::Video);
            router.replace(current.next().route(), state)?;
            return Ok(false);
        }
        _ => {}
    }

    // Delegate to the current route's input handler
    let action = router.current_mut().handle_input(key, state)?;
    router.execute_action(action, state)?;
    Ok(false)
}
