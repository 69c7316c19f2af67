//! Core data types for the Pokédex
//!
//! The view model shown on the result card, query normalization, and the
//! user-facing status messages.

use serde::{Deserialize, Serialize};

// =============================================================================
// User-facing messages
// =============================================================================

/// Shown when the search box is empty after trimming
pub const EMPTY_QUERY_MESSAGE: &str = "Enter a name first!";

/// Shown for any non-2xx response from the lookup endpoint
pub const NOT_FOUND_MESSAGE: &str = "Pokémon not found!";

/// Shown when the request or response parsing failed
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Try again.";

// =============================================================================
// Query
// =============================================================================

/// Normalize a raw search query: trim and lower-case.
///
/// Returns `None` when nothing is left after trimming.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

// =============================================================================
// View Model
// =============================================================================

/// The slice of a PokéAPI response the UI actually displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonView {
    /// Canonical lower-case name
    pub name: String,
    /// Height in decimetres (API-native unit)
    pub height: u32,
    /// Weight in hectograms (API-native unit)
    pub weight: u32,
    /// Front sprite URL, if the API has one
    pub sprite: Option<String>,
    /// Elemental types in slot order; `None` when the API omitted them
    pub types: Option<Vec<String>>,
}

impl PokemonView {
    /// Display title for the result card
    pub fn title(&self) -> String {
        self.name.to_uppercase()
    }

    /// Type names, empty when absent
    pub fn type_names(&self) -> &[String] {
        self.types.as_deref().unwrap_or(&[])
    }
}

// =============================================================================
// Search Phase
// =============================================================================

/// Where the search flow currently sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// Nothing submitted yet
    #[default]
    Idle,
    /// A request is in flight
    Loading,
    /// Last request produced a card
    Success,
    /// Empty query or non-2xx response
    NotFound,
    /// Transport or parse failure
    Failed,
}
