//! Command-line and environment configuration.
//!
//! Every option can be given as a flag or through its environment variable,
//! which is how the bot is configured in containers.

use std::time::Duration;

use clap::{ArgAction, Parser};
use secrecy::SecretString;

use obsmaleno_infra::config::BotConfig;
use obsmaleno_infra::llm::gemini::DEFAULT_MODEL;
use obsmaleno_observe::tracing_setup::LogFormat;

#[derive(Parser)]
#[command(
    name = "obsmaleno",
    about = "Obsmaleno coffee shop support bot (Telegram webhook + Gemini)",
    version
)]
pub struct Cli {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: String,

    /// Telegram bot token
    #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
    pub telegram_bot_token: String,

    /// Public base URL of this service; the webhook is registered at {url}/webhook
    #[arg(long, env = "SERVICE_URL")]
    pub service_url: String,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,

    /// Override the Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL")]
    pub gemini_base_url: Option<String>,

    /// Timeout for a single model call, in seconds
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = 60)]
    pub llm_timeout_secs: u64,

    /// Register the webhook with Telegram at startup
    #[arg(long, env = "REGISTER_WEBHOOK", default_value_t = true, action = ArgAction::Set)]
    pub register_webhook: bool,

    /// Log output format: text or json
    #[arg(long, env = "LOG_FORMAT", default_value = "text")]
    pub log_format: LogFormat,

    /// Also export spans to stdout through OpenTelemetry
    #[arg(long, env = "OTEL_STDOUT", default_value_t = false, action = ArgAction::Set)]
    pub otel_stdout: bool,
}

impl Cli {
    pub fn bot_config(&self) -> BotConfig {
        let mut config = BotConfig::new(
            SecretString::from(self.gemini_api_key.clone()),
            SecretString::from(self.telegram_bot_token.clone()),
            self.service_url.clone(),
        );
        config.gemini_model = self.gemini_model.clone();
        config.gemini_base_url = self.gemini_base_url.clone();
        config.llm_timeout = Duration::from_secs(self.llm_timeout_secs);
        config
    }
}
