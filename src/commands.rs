//! CLI Command Handlers
//!
//! Each handler takes CLI args and Output, returns ExitCode.

use tracing::{info, warn};

use crate::api::{PokeApiClient, PokeApiError};
use crate::cli::{ExitCode, LookupCmd, Output};
use crate::models::{
    normalize_query, PokemonView, EMPTY_QUERY_MESSAGE, NOT_FOUND_MESSAGE, SEARCH_FAILED_MESSAGE,
};

// =============================================================================
// Lookup Command
// =============================================================================

pub async fn lookup_cmd(cmd: LookupCmd, client: &PokeApiClient, output: &Output) -> ExitCode {
    let Some(name) = normalize_query(&cmd.name) else {
        return output.error(EMPTY_QUERY_MESSAGE, ExitCode::InvalidArgs);
    };

    output.info(format!("Looking up: {}", name));
    info!(%name, "cli lookup");

    match client.lookup(&name).await {
        Ok(view) => {
            if output.json {
                if let Err(e) = output.print(&view) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else {
                output.text(format_card(&view));
            }
            ExitCode::Success
        }
        Err(e) => {
            warn!(%name, error = %e, "cli lookup failed");
            lookup_error(&e, output)
        }
    }
}

fn lookup_error(e: &PokeApiError, output: &Output) -> ExitCode {
    if e.is_not_found() {
        output.error(NOT_FOUND_MESSAGE, ExitCode::NotFound)
    } else {
        output.error(SEARCH_FAILED_MESSAGE, ExitCode::NetworkError)
    }
}

/// Plain-text card, same fields as the TUI result card
pub fn format_card(view: &PokemonView) -> String {
    let mut lines = vec![
        view.title(),
        format!("Height: {}", view.height),
        format!("Weight: {}", view.weight),
    ];
    if !view.type_names().is_empty() {
        lines.push(format!("Types:  {}", view.type_names().join(", ")));
    }
    match &view.sprite {
        Some(url) => lines.push(format!("Sprite: {}", url)),
        None => lines.push("Sprite: none".to_string()),
    }
    lines.join("\n")
}
