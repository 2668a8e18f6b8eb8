//! HTTP layer: the Telegram webhook endpoint plus liveness routes.

pub mod handlers;
pub mod router;
