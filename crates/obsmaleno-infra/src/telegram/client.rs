//! TelegramClient -- [`Messenger`] implementation for the Telegram Bot API.
//!
//! Calls `https://api.telegram.org/bot{token}/{method}` with JSON bodies.
//! The bot token is wrapped in [`SecretString`] and only exposed while
//! building the request URL; it is scrubbed from error messages because
//! reqwest errors include the URL.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info};

use obsmaleno_core::messenger::Messenger;
use obsmaleno_types::ChatId;
use obsmaleno_types::error::MessengerError;

use super::split::{MAX_MESSAGE_CHARS, split_message};
use super::types::{ApiResponse, SendMessageRequest, SetWebhookRequest};

/// Default Bot API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Update kinds the webhook subscribes to.
const ALLOWED_UPDATES: &[&str] = &["message"];

/// Telegram Bot API client.
///
/// Does NOT derive Debug, so the bot token can never leak through `{:?}`.
pub struct TelegramClient {
    client: reqwest::Client,
    token: SecretString,
    api_url: String,
}

impl TelegramClient {
    /// Create a client for the bot identified by `token`.
    pub fn new(token: SecretString, timeout: Duration) -> Result<Self, MessengerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MessengerError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token,
            api_url: DEFAULT_API_URL.to_string(),
        })
    }

    /// Override the Bot API URL (useful for testing or a local Bot API server).
    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url.trim_end_matches('/').to_string();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token.expose_secret(), method)
    }

    /// Remove the token from text that may echo the request URL.
    fn scrub(&self, text: &str) -> String {
        text.replace(self.token.expose_secret(), "<redacted>")
    }

    async fn call<B: Serialize + ?Sized>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<(), MessengerError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| MessengerError::Http(self.scrub(&e.to_string())))?;

        let status = response.status();
        let envelope: ApiResponse = response.json().await.map_err(|e| {
            MessengerError::Deserialization(format!(
                "{method} returned HTTP {status} with unreadable body: {}",
                self.scrub(&e.to_string())
            ))
        })?;

        check_envelope(envelope)
    }
}

/// Turn a Bot API envelope into a result.
fn check_envelope(envelope: ApiResponse) -> Result<(), MessengerError> {
    if envelope.ok {
        Ok(())
    } else {
        Err(MessengerError::Api {
            code: envelope.error_code,
            description: envelope
                .description
                .unwrap_or_else(|| "no description".to_string()),
        })
    }
}

impl Messenger for TelegramClient {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), MessengerError> {
        let chunks = split_message(text, MAX_MESSAGE_CHARS);
        if chunks.len() > 1 {
            debug!(chat_id, chunks = chunks.len(), "splitting long reply");
        }

        for chunk in chunks {
            self.call("sendMessage", &SendMessageRequest {
                chat_id,
                text: chunk,
            })
            .await?;
        }
        Ok(())
    }

    async fn register_webhook(&self, url: &str) -> Result<(), MessengerError> {
        self.call("setWebhook", &SetWebhookRequest {
            url,
            allowed_updates: ALLOWED_UPDATES,
        })
        .await?;
        info!(url, "webhook registered with Telegram");
        Ok(())
    }
}
