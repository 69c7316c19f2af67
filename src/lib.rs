//! Pokédex - terminal Pokémon lookup backed by PokéAPI
//!
//! Type a name, press Enter, get height, weight, types and a half-block
//! rendering of the sprite. Light and dark themes, a collapsible nav menu.
//!
//! # Modules
//!
//! - `models` - View model, query normalization, status messages
//! - `api` - PokéAPI client
//! - `app` - Application state and transitions
//! - `worker` - Runs app commands on the tokio runtime
//! - `document` - Root attribute store the theme is mirrored onto
//! - `ui` - Page projection and ratatui rendering
//! - `config`, `cli`, `commands`, `logging` - Process plumbing

pub mod models;
pub mod api;
pub mod app;
pub mod worker;
pub mod document;
pub mod ui;
pub mod config;
pub mod cli;
pub mod commands;
pub mod logging;

// Re-export commonly used types
pub use models::{normalize_query, PokemonView, SearchPhase};
pub use api::{PokeApiClient, PokeApiError};
pub use app::{App, AppCommand, AppMessage, InputMode, Section};
pub use document::Document;
pub use config::{Config, Settings};
