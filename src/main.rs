//! Pokédex - terminal Pokémon lookup backed by PokéAPI
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! pokedex-tui
//!
//! # CLI mode (for scripting)
//! pokedex-tui lookup pikachu --json
//! ```

use std::io::{stdout, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use pokedex_tui::api::PokeApiClient;
use pokedex_tui::app::{App, AppCommand, AppMessage};
use pokedex_tui::cli::{Cli, Command, ExitCode, Output};
use pokedex_tui::config::{Config, Settings};
use pokedex_tui::{commands, logging, ui, worker};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<std::process::ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    let settings = Settings::resolve(&cli, &config);

    if let Err(e) = logging::init(&settings.log_file, &settings.log_level) {
        // Not fatal; the app works without a log
        if !cli.quiet {
            eprintln!("Warning: {:#}", e);
        }
    }

    let client = PokeApiClient::with_options(&settings.base_url, settings.timeout);
    info!(base_url = %client.base_url(), dark = settings.dark, "starting");

    if cli.is_cli_mode() {
        // CLI mode: execute command, exit status carries the outcome
        Ok(run_cli(cli, &client).await.into())
    } else {
        // TUI mode: launch interactive interface
        run_tui(client, settings.dark).await?;
        Ok(std::process::ExitCode::SUCCESS)
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, client: &PokeApiClient) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Some(Command::Lookup(cmd)) => commands::lookup_cmd(cmd, client, &output).await,
        None => ExitCode::Success,
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(client: PokeApiClient, dark: bool) -> Result<()> {
    let mut terminal = init_terminal()?;

    let (mut app, cmd_rx) = App::with_theme(dark).connect();
    let result = run_event_loop(&mut terminal, &mut app, Arc::new(client), cmd_rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;
    info!("exiting");

    result
}

/// Main event loop - handles input, dispatches commands, applies results
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    client: Arc<PokeApiClient>,
    mut cmd_rx: mpsc::UnboundedReceiver<AppCommand>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<AppMessage>();

    while app.running {
        terminal.draw(|frame| ui::render::draw(frame, app))?;

        // Poll for events with timeout so finished lookups get drawn promptly
        if event::poll(TICK_RATE)? {
            match event::read()? {
                // Only handle key press events (ignore releases on Windows)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                }
                Event::Resize(width, height) => {
                    info!(width, height, "terminal resized");
                }
                _ => {}
            }
        }

        while let Ok(cmd) = cmd_rx.try_recv() {
            worker::spawn_command(Arc::clone(&client), cmd, msg_tx.clone());
        }

        while let Ok(msg) = msg_rx.try_recv() {
            app.handle_message(msg);
        }
    }

    Ok(())
}
