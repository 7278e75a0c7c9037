//! Stockboard TUI — closing-price dashboard in the terminal.
//!
//! Layout:
//! - Sidebar: lookback slider, price range sliders, company checklist
//! - Main: wide price table above a multi-series line chart
//! - Status bar: provider, key hints, last status or error
//!
//! Every control change re-runs the pipeline synchronously on the main
//! thread; fetches block the UI for their duration.

mod app;
mod input;
mod logging;
mod theme;
mod ui;

#[cfg(test)]
mod test_helpers;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use stockboard_core::{AppConfig, PriceProvider, SyntheticProvider, TickerRegistry, YahooProvider};

use crate::app::AppState;

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    // Paths
    let config_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stockboard")
        .join("config.toml");
    let log_path = logging::default_log_path();

    logging::init_file_tracing(&log_path)?;

    let config = AppConfig::load_or_default(None, Some(&config_path))
        .with_context(|| format!("load {}", config_path.display()))?;
    let registry = TickerRegistry::default();
    let params = config.initial_params(&registry)?;
    let provider = build_provider(&config)?;
    tracing::info!(
        provider = provider.name(),
        days = params.days.days(),
        companies = params.selection.len(),
        "starting dashboard"
    );

    // Runs the first pass (and first fetch) before the terminal switches over.
    let mut app = AppState::new(provider, registry, params);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("dashboard closed");
    result
}

fn build_provider(config: &AppConfig) -> Result<Box<dyn PriceProvider>> {
    if config.provider.offline {
        return Ok(Box::new(SyntheticProvider::ending_today(config.provider.seed)));
    }
    let yahoo = YahooProvider::new(config.provider.timeout()).context("build HTTP client")?;
    Ok(Box::new(yahoo))
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 2. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        // 3. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
