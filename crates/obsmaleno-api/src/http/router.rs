//! Axum router configuration with middleware.
//!
//! Routes:
//! - `POST /webhook` Telegram updates
//! - `GET /setup` re-register the webhook
//! - `GET /` and `GET /health` liveness
//!
//! Middleware: request tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use obsmaleno_core::messenger::Messenger;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router<M: Messenger + 'static>(state: AppState<M>) -> Router {
    Router::new()
        .route("/", get(handlers::health::index))
        .route("/health", get(handlers::health::health_check))
        .route("/webhook", post(handlers::webhook::receive_update::<M>))
        .route("/setup", get(handlers::setup::setup_webhook::<M>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
