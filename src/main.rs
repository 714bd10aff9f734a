//! usuarios-tui binary entry point.
//!
//! Parses the CLI, initializes logging and the terminal in raw mode, runs
//! the TUI event loop, and restores the terminal state on exit.
//!
use crate::error::Result;
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod error;
mod search;
mod ui;

#[derive(Parser)]
#[command(name = "usuarios-tui")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL returning the JSON array of users.
    #[arg(long, env = "USUARIOS_ENDPOINT", default_value = api::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout for the initial fetch, in seconds.
    #[arg(long, default_value_t = api::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Theme config file (created with defaults if missing).
    #[arg(long, default_value = "theme.conf")]
    theme: String,

    /// Keybindings config file (created with defaults if missing).
    #[arg(long, default_value = "keybinds.conf")]
    keybinds: String,

    /// Append log output to this file. Without it nothing is logged, which
    /// keeps the raw-mode terminal clean.
    #[arg(long)]
    log_file: Option<String>,
}

/// Install a `tracing` subscriber writing to the given file, honoring
/// `RUST_LOG` and defaulting to `info`.
fn init_tracing(log_file: Option<&str>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let opts = app::Options {
        endpoint: cli.endpoint,
        timeout: Duration::from_secs(cli.timeout),
        theme_path: cli.theme,
        keybinds_path: cli.keybinds,
    };

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = app::run(&mut terminal, &opts);

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        eprintln!("application error: {err}");
    }
    Ok(())
}
