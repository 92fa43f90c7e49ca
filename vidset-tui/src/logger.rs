use anyhow::Context;
use log::{Level, LevelFilter};
use ratatui::style::{Color, Style};
use ratatui::widgets::Block;
use tui_logger::TuiLoggerWidget;

/// Route all `log` records into the in-app log buffer.
pub fn setup_logging() -> anyhow::Result<()> {
    tui_logger::init_logger(LevelFilter::Debug).context("failed to init tui_logger")?;
    tui_logger::set_default_level(LevelFilter::Debug);
    Ok(())
}

// Helper to get color based on level
pub fn level_style(level: Level) -> Style {
    match level {
        Level::Error => Style::default().fg(Color::Red),
        Level::Warn => Style::default().fg(Color::Yellow),
        Level::Info => Style::default().fg(Color::Cyan),
        Level::Debug => Style::default().fg(Color::Green),
        Level::Trace => Style::default().fg(Color::Magenta),
    }
}

/// Log widget with per-level colors.
pub fn log_widget(block: Block<'_>) -> TuiLoggerWidget<'_> {
    TuiLoggerWidget::default()
        .block(block)
        .style_error(level_style(Level::Error))
        .style_warn(level_style(Level::Warn))
        .style_info(level_style(Level::Info))
        .style_debug(level_style(Level::Debug))
        .style_trace(level_style(Level::Trace))
        .style(Style::default().fg(Color::White))
}
