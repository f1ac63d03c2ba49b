//! Terminal UI: the favorites grid
//!
//! The UI thread owns the [`App`] and drains the list binding once per tick.
//! Provider calls run on a tokio runtime owned by [`run`].

mod app;
pub mod context;
mod event;
pub mod theme;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::config::FavreelConfig;
use crate::db::Database;
use crate::provider::LocalProvider;
use context::ContextRegistry;
use theme::{CustomTheme, Theme};

pub use app::{App, FavoritesView, GridState, LoadMoreStatus, Placeholder, SelectableList};

/// How long in-flight provider calls get once the screen is closed
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

type Backend = CrosstermBackend<io::Stdout>;

/// Open the favorites grid and block until the user quits
pub fn run(config: &FavreelConfig, db: Arc<Database>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("favreel-provider")
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let provider = Arc::new(LocalProvider::new(db, config.page_size));
    let contexts = Arc::new(ContextRegistry::new());
    let width = crossterm::terminal::size().map(|(w, _)| w).unwrap_or(80);
    let mut app = App::new(
        config,
        provider,
        runtime.handle().clone(),
        contexts.clone(),
        load_custom_theme(),
        width,
    );

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    info!("tui started");
    let result = run_app(&mut terminal, &mut app);

    app.shutdown();
    contexts.clear();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableFocusChange,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    info!("tui stopped");
    result
}

fn run_app(terminal: &mut Terminal<Backend>, app: &mut App) -> Result<()> {
    let _initial = app.start();
    while app.running {
        app.tick();
        terminal.draw(|frame| ui::render(frame, app))?;
        event::handle_events(app)?;
    }
    Ok(())
}

/// Custom theme from `custom-theme.json`, if present and valid
fn load_custom_theme() -> Option<Theme> {
    let path = CustomTheme::file_path().ok()?;
    if !path.exists() {
        return None;
    }
    match CustomTheme::load_from(&path) {
        Ok(custom) => Some(custom.to_theme()),
        Err(err) => {
            warn!(error = %err, "ignoring custom theme");
            None
        }
    }
}
