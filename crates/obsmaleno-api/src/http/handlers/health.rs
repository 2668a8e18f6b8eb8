//! Liveness endpoints.

/// Body returned by `GET /`.
pub const BANNER: &str = "ObsmalenoBot is running! Use /webhook for updates.";

/// GET / - Static banner confirming the process is up.
pub async fn index() -> &'static str {
    BANNER
}

/// GET /health - Simple health check for the container platform.
pub async fn health_check() -> &'static str {
    "OK"
}
