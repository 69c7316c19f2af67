//! Background execution of app commands
//!
//! Each `AppCommand` runs on its own tokio task and reports back a single
//! `AppMessage`. Nothing here touches UI state.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::PokeApiClient;
use crate::app::{AppCommand, AppMessage};
use crate::ui::sprite::SpriteThumb;

/// Run a command to completion and produce the message for the App
pub async fn execute(client: &PokeApiClient, cmd: AppCommand) -> AppMessage {
    match cmd {
        AppCommand::Lookup { generation, name } => {
            let result = client.lookup(&name).await;
            debug!(generation, %name, ok = result.is_ok(), "lookup finished");
            AppMessage::LookupFinished { generation, result }
        }
        AppCommand::FetchSprite { generation, url } => {
            let sprite = match client.fetch_sprite(&url).await {
                Ok(bytes) => match SpriteThumb::decode(&bytes) {
                    Ok(thumb) => Some(thumb),
                    Err(e) => {
                        warn!(%url, error = %e, "sprite decode failed");
                        None
                    }
                },
                Err(e) => {
                    warn!(%url, error = %e, "sprite download failed");
                    None
                }
            };
            AppMessage::SpriteLoaded { generation, sprite }
        }
    }
}

/// Spawn a command on the runtime; the result is sent on `msg_tx`
pub fn spawn_command(
    client: Arc<PokeApiClient>,
    cmd: AppCommand,
    msg_tx: mpsc::UnboundedSender<AppMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let msg = execute(&client, cmd).await;
        if msg_tx.send(msg).is_err() {
            debug!("message channel closed, UI already gone");
        }
    })
}
