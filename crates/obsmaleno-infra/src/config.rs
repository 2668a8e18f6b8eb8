//! Runtime configuration for the bot process.
//!
//! Values arrive from the environment (see the `obsmaleno` binary's
//! command-line parser). [`BotConfig::validate`] catches what the parser
//! cannot: blank secrets and a malformed public base URL.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use obsmaleno_types::error::ConfigError;

use crate::llm::gemini::DEFAULT_MODEL;

/// Path the platform posts updates to.
pub const WEBHOOK_PATH: &str = "/webhook";

/// Default timeout for outbound model calls.
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for Telegram Bot API calls.
pub const TELEGRAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to wire the provider, messenger and webhook.
pub struct BotConfig {
    pub gemini_api_key: SecretString,
    pub telegram_bot_token: SecretString,
    /// Public base URL of this service, e.g. `https://bot.example.run.app`.
    pub service_url: String,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,
    pub llm_timeout: Duration,
}

impl BotConfig {
    pub fn new(
        gemini_api_key: SecretString,
        telegram_bot_token: SecretString,
        service_url: impl Into<String>,
    ) -> Self {
        Self {
            gemini_api_key,
            telegram_bot_token,
            service_url: service_url.into(),
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: None,
            llm_timeout: DEFAULT_LLM_TIMEOUT,
        }
    }

    /// Reject blank required values and a non-HTTP service URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gemini_api_key.expose_secret().trim().is_empty() {
            return Err(ConfigError::Missing("GEMINI_API_KEY"));
        }
        if self.telegram_bot_token.expose_secret().trim().is_empty() {
            return Err(ConfigError::Missing("TELEGRAM_BOT_TOKEN"));
        }

        let service_url = self.service_url.trim();
        if service_url.is_empty() {
            return Err(ConfigError::Missing("SERVICE_URL"));
        }
        if !(service_url.starts_with("https://") || service_url.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                name: "SERVICE_URL",
                reason: format!("'{service_url}' must start with http:// or https://"),
            });
        }

        if self.gemini_model.trim().is_empty() {
            return Err(ConfigError::Invalid {
                name: "GEMINI_MODEL",
                reason: "model name is blank".to_string(),
            });
        }
        if self.llm_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                name: "LLM_TIMEOUT_SECS",
                reason: "timeout must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// Full URL registered with Telegram.
    pub fn webhook_url(&self) -> String {
        format!("{}{WEBHOOK_PATH}", self.service_url.trim().trim_end_matches('/'))
    }
}
