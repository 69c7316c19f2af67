//! End-to-end search flow tests
//!
//! Drives the App through its command channel with the worker running
//! against a mock PokéAPI server.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use image::{ImageFormat, Rgba, RgbaImage};
use mockito::Server;
use tokio::sync::mpsc;

use pokedex_tui::api::PokeApiClient;
use pokedex_tui::app::{App, AppCommand, AppMessage, InputMode, Section};
use pokedex_tui::document::THEME_ATTRIBUTE;
use pokedex_tui::models::{SearchPhase, NOT_FOUND_MESSAGE, SEARCH_FAILED_MESSAGE};
use pokedex_tui::worker;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
}

fn pikachu_body(sprite_url: &str) -> String {
    format!(
        r#"{{
            "name": "pikachu",
            "height": 4,
            "weight": 60,
            "sprites": {{"front_default": "{}"}},
            "types": [{{"slot": 1, "type": {{"name": "electric"}}}}]
        }}"#,
        sprite_url
    )
}

fn png_bytes() -> Vec<u8> {
    let mut img = RgbaImage::new(4, 4);
    for (x, y, px) in img.enumerate_pixels_mut() {
        if (1..3).contains(&x) && (1..3).contains(&y) {
            *px = Rgba([250, 210, 40, 255]);
        }
    }
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Run every queued command through the worker and apply the results
async fn pump(app: &mut App, client: &PokeApiClient, cmd_rx: &mut mpsc::UnboundedReceiver<AppCommand>) {
    while let Ok(cmd) = cmd_rx.try_recv() {
        let msg = worker::execute(client, cmd).await;
        app.handle_message(msg);
    }
}

// =============================================================================
// Search Outcomes
// =============================================================================

#[tokio::test]
async fn test_successful_lookup_shows_card_and_sprite() {
    let mut server = Server::new_async().await;
    let sprite_url = format!("{}/sprites/25.png", server.url());

    let lookup = server
        .mock("GET", "/api/v2/pokemon/pikachu")
        .with_status(200)
        .with_body(pikachu_body(&sprite_url))
        .create_async()
        .await;
    let sprite = server
        .mock("GET", "/sprites/25.png")
        .with_status(200)
        .with_body(png_bytes())
        .create_async()
        .await;

    let client = PokeApiClient::with_base_url(server.url());
    let (mut app, mut cmd_rx) = App::with_channels();

    app.search.set_query("  PIKACHU ");
    app.submit_search();
    assert!(app.loading);
    assert_eq!(app.search.phase, SearchPhase::Loading);

    pump(&mut app, &client, &mut cmd_rx).await;

    lookup.assert_async().await;
    sprite.assert_async().await;

    assert!(!app.loading);
    assert!(app.error.is_none());
    assert_eq!(app.search.phase, SearchPhase::Success);

    let view = app.pokemon.as_ref().expect("card shown");
    assert_eq!(view.name, "pikachu");
    assert_eq!(view.height, 4);
    assert_eq!(view.weight, 60);
    assert_eq!(view.sprite.as_deref(), Some(sprite_url.as_str()));
    assert_eq!(view.types, Some(vec!["electric".to_string()]));

    // Transparent border cropped away
    let thumb = app.sprite.as_ref().expect("sprite decoded");
    assert_eq!((thumb.width, thumb.height), (2, 2));
}

#[tokio::test]
async fn test_not_found_clears_card() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/api/v2/pokemon/agumon")
        .with_status(404)
        .with_body("Not Found")
        .create_async()
        .await;

    let client = PokeApiClient::with_base_url(server.url());
    let (mut app, mut cmd_rx) = App::with_channels();

    app.search.set_query("agumon");
    app.submit_search();
    assert!(app.loading);

    pump(&mut app, &client, &mut cmd_rx).await;

    assert!(!app.loading);
    assert!(app.pokemon.is_none());
    assert_eq!(app.error.as_deref(), Some(NOT_FOUND_MESSAGE));
    assert_eq!(app.search.phase, SearchPhase::NotFound);
}

#[tokio::test]
async fn test_transport_error_asks_to_retry() {
    let client = PokeApiClient::with_base_url("http://127.0.0.1:1");
    let (mut app, mut cmd_rx) = App::with_channels();

    app.search.set_query("pikachu");
    app.submit_search();
    assert!(app.loading);

    pump(&mut app, &client, &mut cmd_rx).await;

    assert!(!app.loading);
    assert!(app.pokemon.is_none());
    assert_eq!(app.error.as_deref(), Some(SEARCH_FAILED_MESSAGE));
    assert_eq!(app.search.phase, SearchPhase::Failed);
}

#[tokio::test]
async fn test_invalid_body_asks_to_retry() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/api/v2/pokemon/pikachu")
        .with_status(200)
        .with_body("{ nope")
        .create_async()
        .await;

    let client = PokeApiClient::with_base_url(server.url());
    let (mut app, mut cmd_rx) = App::with_channels();

    app.search.set_query("pikachu");
    app.submit_search();
    pump(&mut app, &client, &mut cmd_rx).await;

    assert_eq!(app.error.as_deref(), Some(SEARCH_FAILED_MESSAGE));
    assert!(app.pokemon.is_none());
}

#[tokio::test]
async fn test_broken_sprite_keeps_card() {
    let mut server = Server::new_async().await;
    let sprite_url = format!("{}/sprites/25.png", server.url());

    let _lookup = server
        .mock("GET", "/api/v2/pokemon/pikachu")
        .with_status(200)
        .with_body(pikachu_body(&sprite_url))
        .create_async()
        .await;
    let _sprite = server
        .mock("GET", "/sprites/25.png")
        .with_status(200)
        .with_body("not a png")
        .create_async()
        .await;

    let client = PokeApiClient::with_base_url(server.url());
    let (mut app, mut cmd_rx) = App::with_channels();

    app.search.set_query("pikachu");
    app.submit_search();
    pump(&mut app, &client, &mut cmd_rx).await;

    assert!(app.pokemon.is_some());
    assert!(app.sprite.is_none());
    assert!(app.error.is_none());
}

// =============================================================================
// Overlapping Requests
// =============================================================================

#[tokio::test]
async fn test_last_submit_wins_when_responses_reorder() {
    let mut server = Server::new_async().await;

    let _pikachu = server
        .mock("GET", "/api/v2/pokemon/pikachu")
        .with_status(200)
        .with_body(pikachu_body("x"))
        .create_async()
        .await;
    let _missing = server
        .mock("GET", "/api/v2/pokemon/missingno")
        .with_status(404)
        .create_async()
        .await;

    let client = PokeApiClient::with_base_url(server.url());
    let (mut app, mut cmd_rx) = App::with_channels();

    app.search.set_query("pikachu");
    app.submit_search();
    let first = cmd_rx.try_recv().unwrap();

    app.search.set_query("missingno");
    app.submit_search();
    let second = cmd_rx.try_recv().unwrap();

    // Newer response lands first, older one afterwards
    let second_msg = worker::execute(&client, second).await;
    let first_msg = worker::execute(&client, first).await;
    app.handle_message(second_msg);
    app.handle_message(first_msg);

    assert!(app.pokemon.is_none());
    assert_eq!(app.error.as_deref(), Some(NOT_FOUND_MESSAGE));
    assert!(!app.loading);
    // The stale success never asked for its sprite
    assert!(cmd_rx.try_recv().is_err());
}

#[tokio::test]
async fn test_spawned_worker_reports_back() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/api/v2/pokemon/pikachu")
        .with_status(200)
        .with_body(pikachu_body("x"))
        .create_async()
        .await;

    let client = Arc::new(PokeApiClient::with_base_url(server.url()));
    let (mut app, mut cmd_rx) = App::with_channels();
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<AppMessage>();

    app.search.set_query("pikachu");
    app.submit_search();

    let cmd = cmd_rx.try_recv().unwrap();
    worker::spawn_command(Arc::clone(&client), cmd, msg_tx)
        .await
        .unwrap();

    let msg = msg_rx.recv().await.expect("worker sent a message");
    app.handle_message(msg);

    assert_eq!(app.pokemon.as_ref().map(|p| p.name.as_str()), Some("pikachu"));
}

// =============================================================================
// Keyboard Driven Flow
// =============================================================================

#[tokio::test]
async fn test_keyboard_search_theme_and_menu() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("GET", "/api/v2/pokemon/pikachu")
        .with_status(200)
        .with_body(pikachu_body("x"))
        .create_async()
        .await;

    let client = PokeApiClient::with_base_url(server.url());
    let (mut app, mut cmd_rx) = App::with_channels();

    // Search via keyboard
    app.handle_key(key(KeyCode::Char('/')));
    assert_eq!(app.input_mode, InputMode::Editing);
    type_text(&mut app, "Pikachu");
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.loading);

    pump(&mut app, &client, &mut cmd_rx).await;
    assert_eq!(app.pokemon.as_ref().map(|p| p.name.as_str()), Some("pikachu"));

    // Theme toggle twice
    app.handle_key(key(KeyCode::Char('t')));
    assert!(app.dark);
    assert_eq!(app.document.attribute(THEME_ATTRIBUTE), Some("dark"));
    app.handle_key(key(KeyCode::Char('t')));
    assert!(!app.dark);
    assert_eq!(app.document.attribute(THEME_ATTRIBUTE), Some("light"));

    // Menu open, then follow the About link
    app.handle_key(key(KeyCode::Char('m')));
    assert!(app.menu_open);
    app.handle_key(key(KeyCode::Char('2')));
    assert!(!app.menu_open);
    assert_eq!(app.active_section, Section::About);

    // Card survives all of it
    assert!(app.pokemon.is_some());
}
