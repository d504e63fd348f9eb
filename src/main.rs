//! Lead TUI - Terminal User Interface for tracking sales leads
//!
//! A Ratatui-based TUI for creating leads, moving them through the sales
//! pipeline and deleting them, backed by a lead store.

mod app;
mod config;
mod error;
mod platform;
mod service;
mod state;
mod store;
mod ui;

use anyhow::Result;
use app::App;
use config::{TuiConfig, ADDRESS_ENV};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use service::LeadService;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How long to wait for input before redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = TuiConfig::load().unwrap_or_else(|err| {
        tracing::warn!("Ignoring unreadable config: {err:#}");
        TuiConfig::default()
    });
    let address = config.resolve_address(std::env::var(ADDRESS_ENV).ok());
    let store = store::open(&address)?;

    let mut app = App::new(LeadService::new(store), config, address);
    app.connect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = app.save_preferences() {
        tracing::warn!("Could not save preferences: {err:#}");
    }

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick(Instant::now());

        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle crossterm events
        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key).await?;
                }
            }
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}

/// Log to a file in the data directory; the terminal belongs to the UI.
/// Falls back to stderr when no data directory is available.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "lead_tui=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match open_log_file() {
        Some(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

fn open_log_file() -> Option<File> {
    let dirs = TuiConfig::project_dirs()?;
    let dir = dirs.data_dir();
    fs::create_dir_all(dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("lead-tui.log"))
        .ok()
}
