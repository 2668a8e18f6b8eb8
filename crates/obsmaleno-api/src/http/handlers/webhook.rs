//! Telegram webhook receiver.
//!
//! Telegram retries any update that is not answered with a 2xx, so this
//! handler always answers `200 OK`: turn failures are handled inside the
//! dispatcher and malformed payloads are only logged.

use axum::body::Bytes;
use axum::extract::State;
use tracing::{debug, warn};

use obsmaleno_core::messenger::Messenger;
use obsmaleno_types::event::InboundEvent;
use obsmaleno_types::telegram::Update;

use crate::state::AppState;

/// POST /webhook - Receive one update and handle it to completion.
pub async fn receive_update<M: Messenger + 'static>(
    State(state): State<AppState<M>>,
    body: Bytes,
) -> &'static str {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, bytes = body.len(), "discarding malformed update");
            return "OK";
        }
    };

    match InboundEvent::from_update(&update) {
        Some(event) => {
            let report = state.dispatcher.handle(&event).await;
            debug!(update_id = update.update_id, ?report, "update handled");
        }
        None => {
            debug!(update_id = update.update_id, "update carries no text message, skipped");
        }
    }

    "OK"
}
