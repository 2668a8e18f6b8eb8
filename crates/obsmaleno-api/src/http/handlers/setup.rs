//! Manual webhook (re)registration.

use axum::extract::State;
use tracing::{info, warn};

use obsmaleno_core::messenger::Messenger;

use crate::state::AppState;

/// GET /setup - Register the webhook URL with Telegram.
///
/// Always answers 200; the body says whether the platform accepted it.
pub async fn setup_webhook<M: Messenger + 'static>(State(state): State<AppState<M>>) -> String {
    match state.register_webhook().await {
        Ok(()) => {
            info!(url = %state.webhook_url, "webhook set via /setup");
            format!("Webhook set to {}", state.webhook_url)
        }
        Err(e) => {
            warn!(error = %e, "webhook setup failed");
            format!("Webhook setup failed: {e}")
        }
    }
}
