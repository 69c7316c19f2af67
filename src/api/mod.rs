//! API clients for external services
//!
//! - PokéAPI: creature lookup by name and sprite download

pub mod pokeapi;

pub use pokeapi::{PokeApiClient, PokeApiError};
