//! Messenger trait definition.
//!
//! The outbound side of the messaging platform: delivering reply text to
//! a chat and registering the webhook URL. `TelegramClient` in
//! obsmaleno-infra is the production implementation.

use obsmaleno_types::ChatId;
use obsmaleno_types::error::MessengerError;

/// Outbound messaging platform operations.
pub trait Messenger: Send + Sync {
    /// Deliver `text` to `chat_id`.
    fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), MessengerError>> + Send;

    /// Point the platform's webhook at `url`.
    fn register_webhook(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<(), MessengerError>> + Send;
}
