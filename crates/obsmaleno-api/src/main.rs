//! Obsmaleno support bot entry point.
//!
//! Binary name: `obsmaleno`
//!
//! Reads configuration from the environment (and an optional `.env` file),
//! wires the Gemini provider and Telegram client, registers the webhook,
//! then serves the webhook endpoint until Ctrl+C or SIGTERM.

mod cli;
mod http;
mod state;

use clap::Parser;
use tracing::{info, warn};

use obsmaleno_observe::tracing_setup::{init_tracing, shutdown_tracing};

use cli::Cli;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(cli.log_format, cli.otel_stdout).map_err(|e| anyhow::anyhow!(e))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.bot_config();
    config.validate()?;

    let model = config.gemini_model.clone();
    let state = AppState::from_config(config)?;
    info!(%model, webhook_url = %state.webhook_url, "bot configured");

    if cli.register_webhook {
        if let Err(e) = state.register_webhook().await {
            warn!(error = %e, "webhook registration failed, retry via GET /setup");
        }
    }

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "ObsmalenoBot listening");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
