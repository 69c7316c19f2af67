//! CLI - Command Line Interface for the Pokédex
//!
//! Run without arguments for the interactive TUI. The `lookup` subcommand
//! performs a single search and prints the result, JSON-parseable with
//! `--json` or when stdout is not a terminal.
//!
//! # Examples
//!
//! ```bash
//! pokedex-tui
//! pokedex-tui --theme dark
//! pokedex-tui lookup pikachu
//! pokedex-tui lookup "Mr. Mime" --json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments (e.g. blank name)
    InvalidArgs = 2,
    /// Network error or unreadable response
    NetworkError = 3,
    /// Pokémon not found
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Pokédex - look up Pokémon from the terminal
///
/// Run without arguments to launch the interactive TUI.
#[derive(Parser, Debug)]
#[command(
    name = "pokedex-tui",
    version,
    about = "Terminal Pokédex backed by PokéAPI",
    long_about = "Search Pokémon by name and see their height, weight, types and sprite.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use the lookup subcommand for scripting.",
    after_help = "EXAMPLES:\n\
                  pokedex-tui                          Launch interactive TUI\n\
                  pokedex-tui --theme dark             Start in dark mode\n\
                  pokedex-tui lookup pikachu           Print one Pokémon\n\
                  pokedex-tui lookup eevee --json      Print as JSON"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Starting theme (overrides config)
    #[arg(long, short = 't', value_enum, global = true)]
    pub theme: Option<ThemeArg>,

    /// PokéAPI base URL (overrides POKEDEX_API_URL and config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Path to log file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

/// Theme selection on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Light,
    Dark,
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Look up a single Pokémon by name
    #[command(visible_alias = "l")]
    Lookup(LookupCmd),
}

/// Look up a Pokémon and print its card
#[derive(Args, Debug)]
pub struct LookupCmd {
    /// Pokémon name (case-insensitive, surrounding whitespace ignored)
    #[arg(required = true)]
    pub name: String,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero", default)]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data wrapped in `JsonOutput`
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        println!("{}", self.render(data)?);
        Ok(())
    }

    /// The string `print` would write
    pub fn render<T: Serialize>(&self, data: T) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(&JsonOutput::success(data))?)
    }

    /// Print plain text to stdout
    pub fn text(&self, text: impl std::fmt::Display) {
        println!("{}", text);
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
