//! PokéAPI client
//!
//! Looks up a single Pokémon by name and downloads its front sprite.
//! API docs: https://pokeapi.co/docs/v2

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::PokemonView;

/// Public PokéAPI host
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// PokéAPI error types
#[derive(Error, Debug)]
pub enum PokeApiError {
    /// Any non-2xx status; the API does not distinguish causes we care about
    #[error("Not found (HTTP {0})")]
    NotFound(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

impl PokeApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PokeApiError::NotFound(_))
    }
}

/// PokéAPI client
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl Default for PokeApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl PokeApiClient {
    /// Create a client against the public API
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing or mirrors)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_options(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_options(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    error = %e,
                    ?timeout,
                    "HTTP client setup failed, falling back to defaults without timeout"
                );
                reqwest::Client::default()
            });
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint URL for a (normalized) name
    pub fn pokemon_url(&self, name: &str) -> String {
        format!(
            "{}/api/v2/pokemon/{}",
            self.base_url,
            urlencoding::encode(name)
        )
    }

    /// Fetch a Pokémon by its normalized name
    pub async fn lookup(&self, name: &str) -> Result<PokemonView, PokeApiError> {
        let url = self.pokemon_url(name);
        debug!(%url, "GET pokemon");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PokeApiError::NotFound(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: PokemonResponse = serde_json::from_str(&body)
            .map_err(|e| PokeApiError::InvalidResponse(format!("JSON parse error: {}", e)))?;
        Ok(parsed.into_view())
    }

    /// Download raw sprite bytes
    pub async fn fetch_sprite(&self, url: &str) -> Result<Vec<u8>, PokeApiError> {
        debug!(%url, "GET sprite");
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.bytes().await?.to_vec()),
            status => Err(PokeApiError::NotFound(status.as_u16())),
        }
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct PokemonResponse {
    name: String,
    height: u32,
    weight: u32,
    sprites: SpritesRaw,
    #[serde(default)]
    types: Option<Vec<TypeSlotRaw>>,
}

impl PokemonResponse {
    fn into_view(self) -> PokemonView {
        PokemonView {
            name: self.name,
            height: self.height,
            weight: self.weight,
            sprite: self.sprites.front_default,
            types: self
                .types
                .map(|slots| slots.into_iter().map(|s| s.kind.name).collect()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SpritesRaw {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeSlotRaw {
    #[serde(rename = "type")]
    kind: NamedRaw,
}

#[derive(Debug, Deserialize)]
struct NamedRaw {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = PokeApiClient::with_base_url("http://localhost:1234///");
        assert_eq!(client.base_url(), "http://localhost:1234");
        assert_eq!(PokeApiClient::new().base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_pokemon_url_escapes_name() {
        let client = PokeApiClient::with_base_url("http://localhost:1234/");
        assert_eq!(
            client.pokemon_url("pikachu"),
            "http://localhost:1234/api/v2/pokemon/pikachu"
        );
        assert_eq!(
            client.pokemon_url("mr. mime"),
            "http://localhost:1234/api/v2/pokemon/mr.%20mime"
        );
        assert_eq!(
            client.pokemon_url("a/b"),
            "http://localhost:1234/api/v2/pokemon/a%2Fb"
        );
    }

    #[test]
    fn test_response_projection() {
        let body = r#"{
            "id": 25,
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "base_experience": 112,
            "sprites": {"front_default": "url", "back_default": "back"},
            "types": [{"slot": 1, "type": {"name": "electric", "url": "x"}}]
        }"#;
        let parsed: PokemonResponse = serde_json::from_str(body).unwrap();
        let view = parsed.into_view();

        assert_eq!(view.name, "pikachu");
        assert_eq!(view.height, 4);
        assert_eq!(view.weight, 60);
        assert_eq!(view.sprite.as_deref(), Some("url"));
        assert_eq!(view.types, Some(vec!["electric".to_string()]));
    }

    #[test]
    fn test_response_without_types_or_sprite() {
        let body = r#"{
            "name": "missingno",
            "height": 10,
            "weight": 100,
            "sprites": {"front_default": null}
        }"#;
        let view = serde_json::from_str::<PokemonResponse>(body)
            .unwrap()
            .into_view();

        assert!(view.sprite.is_none());
        assert!(view.types.is_none());
    }

    #[test]
    fn test_response_missing_required_field_fails() {
        let body = r#"{"name": "pikachu", "sprites": {"front_default": null}}"#;
        assert!(serde_json::from_str::<PokemonResponse>(body).is_err());
    }
}
