//! recipebox - Personal Recipe Catalog
//!
//! Launches the terminal client, or runs a single CLI command when one is
//! given on the command line.

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use colored::Colorize;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use recipebox::app::App;
use recipebox::cli::{self, Cli};
use recipebox::config::{self, Config};
use recipebox::handlers;
use recipebox::models::StorageManager;
use recipebox::store::{MemoryStore, RecipeStore, SupabaseStore};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "recipebox.log";

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = config::load(cli.config.as_deref()).map_err(|e| eyre!("{:#}", e))?;
    let storage = open_storage(&config);
    if let Some(storage) = &storage {
        init_logging(&config, cli.verbose, storage.data_directory())?;
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting recipebox");

    let store = build_store(&config, cli.offline);

    match cli.command {
        Some(command) => {
            cli::execute_cli(command, store, storage).map_err(|e| eyre!("{:#}", e))
        }
        None => run_tui(store, storage),
    }
}

fn open_storage(config: &Config) -> Option<StorageManager> {
    let storage = match &config.data_dir {
        Some(dir) => StorageManager::at(dir),
        None => StorageManager::new(),
    };
    match storage {
        Ok(storage) => Some(storage),
        Err(e) => {
            eprintln!(
                "{}  {} favorites and login will not be saved: {:#}",
                "┃".bright_magenta(),
                "Warning:".bright_yellow(),
                e
            );
            None
        }
    }
}

/// Logs go to a file so they never tear the TUI
fn init_logging(config: &Config, verbose: bool, dir: &Path) -> Result<()> {
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| eyre!("Failed to open log file {}: {}", path.display(), e))?;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

fn build_store(config: &Config, offline: bool) -> Arc<dyn RecipeStore> {
    if offline {
        info!("offline mode requested");
        return Arc::new(MemoryStore::with_samples());
    }

    let reason = match config.remote() {
        Some(remote) => match SupabaseStore::new(&remote) {
            Ok(store) => {
                info!(endpoint = %store.endpoint(), "using remote recipe table");
                return Arc::new(store);
            }
            Err(e) => e.to_string(),
        },
        None => format!(
            "{} and {} are not set",
            config::ENV_SUPABASE_URL,
            config::ENV_SUPABASE_KEY
        ),
    };

    warn!(%reason, "falling back to offline sample recipes");
    eprintln!(
        "{}  {} {}; using offline sample recipes",
        "┃".bright_magenta(),
        "Warning:".bright_yellow(),
        reason
    );
    Arc::new(MemoryStore::with_samples())
}

fn run_tui(store: Arc<dyn RecipeStore>, storage: Option<StorageManager>) -> Result<()> {
    let mut app = App::new(store, storage).map_err(|e| eyre!("{:#}", e))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    info!("recipebox closed");

    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let mut should_quit = false;

    while !should_quit {
        if app.needs_redraw {
            force_redraw(terminal, app)?;
            app.needs_redraw = false;
        } else {
            terminal.draw(|frame| app.render(frame))?;
        }
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                should_quit = handlers::keys::handle_key_events(key, app);
            }
        }
        app.tick();
    }

    Ok(())
}

/// Forces a complete redraw of the terminal UI
fn force_redraw<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    terminal.clear()?;
    terminal.draw(|frame| app.render(frame))?;
    Ok(())
}
