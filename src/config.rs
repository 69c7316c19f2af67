//! Configuration management for the Pokédex
//!
//! Handles config file loading and resolution of the effective settings.
//! Config is stored at ~/.config/pokedex-tui/config.toml and is only ever
//! read; toggling the theme at runtime is not written back.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::pokeapi::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::cli::{Cli, ThemeArg};

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "POKEDEX_API_URL";

/// Log level used when neither RUST_LOG nor the config sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// PokéAPI base URL (without /api/v2)
    pub api_base_url: Option<String>,
    /// Start in dark mode
    pub dark_theme: Option<bool>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
    /// Where to write the log file
    pub log_file: Option<PathBuf>,
    /// tracing filter directive, e.g. "debug" or "pokedex_tui=trace"
    pub log_level: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/pokedex-tui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pokedex-tui").join("config.toml"))
    }

    /// Load config from the default location, or return default if not found
    pub fn load() -> Self {
        Self::path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit path; a missing or malformed file is an error
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }
}

/// Default log file (~/.cache/pokedex-tui/pokedex-tui.log)
pub fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("pokedex-tui")
        .join("pokedex-tui.log")
}

/// Effective settings after merging CLI, environment and config file
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub timeout: Duration,
    pub dark: bool,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Settings {
    /// Resolve with the process environment
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self::resolve_with_env(cli, config, std::env::var(API_URL_ENV).ok())
    }

    /// Precedence: CLI flag, then environment (base URL only), then config, then default
    pub fn resolve_with_env(cli: &Cli, config: &Config, env_url: Option<String>) -> Self {
        let base_url = cli
            .api_url
            .clone()
            .or(env_url.filter(|u| !u.trim().is_empty()))
            .or_else(|| config.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let dark = match cli.theme {
            Some(ThemeArg::Dark) => true,
            Some(ThemeArg::Light) => false,
            None => config.dark_theme.unwrap_or(false),
        };

        let timeout = config
            .request_timeout_secs
            .filter(|&s| s > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        let log_file = cli
            .log_file
            .clone()
            .or_else(|| config.log_file.clone())
            .unwrap_or_else(default_log_file);

        let log_level = config
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Self {
            base_url,
            timeout,
            dark,
            log_file,
            log_level,
        }
    }
}
