//! Application state shared by the HTTP handlers.
//!
//! Holds the webhook dispatcher (which owns the session registry and the
//! messenger) and the public webhook URL. Generic over the messenger so
//! handlers can be exercised without the Telegram API.

use std::sync::Arc;

use obsmaleno_core::chat::registry::SessionRegistry;
use obsmaleno_core::chat::session::SessionSettings;
use obsmaleno_core::chat::store::InMemorySessionStore;
use obsmaleno_core::dispatch::Dispatcher;
use obsmaleno_core::messenger::Messenger;
use obsmaleno_core::persona::SYSTEM_INSTRUCTION;
use obsmaleno_infra::config::{BotConfig, TELEGRAM_TIMEOUT};
use obsmaleno_infra::llm::create_provider;
use obsmaleno_infra::telegram::TelegramClient;
use obsmaleno_types::error::MessengerError;

pub type ConcreteDispatcher<M> = Dispatcher<InMemorySessionStore, M>;

pub struct AppState<M: Messenger> {
    pub dispatcher: Arc<ConcreteDispatcher<M>>,
    pub webhook_url: Arc<str>,
}

impl<M: Messenger> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            webhook_url: Arc::clone(&self.webhook_url),
        }
    }
}

impl<M: Messenger> AppState<M> {
    pub fn new(dispatcher: ConcreteDispatcher<M>, webhook_url: impl Into<Arc<str>>) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            webhook_url: webhook_url.into(),
        }
    }

    /// Point the platform webhook at this service.
    pub async fn register_webhook(&self) -> Result<(), MessengerError> {
        self.dispatcher
            .messenger()
            .register_webhook(&self.webhook_url)
            .await
    }
}

impl AppState<TelegramClient> {
    /// Wire the production provider, messenger and session registry.
    pub fn from_config(config: BotConfig) -> anyhow::Result<Self> {
        let webhook_url = config.webhook_url();

        let provider = create_provider(
            config.gemini_api_key,
            &config.gemini_model,
            config.gemini_base_url.as_deref(),
            config.llm_timeout,
        )?;
        let messenger = TelegramClient::new(config.telegram_bot_token, TELEGRAM_TIMEOUT)?;

        let registry = SessionRegistry::new(
            InMemorySessionStore::new(),
            Arc::new(provider),
            SYSTEM_INSTRUCTION,
            SessionSettings::default(),
        );

        Ok(Self::new(Dispatcher::new(registry, messenger), webhook_url))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use obsmaleno_core::llm::box_provider::BoxLlmProvider;
    use obsmaleno_core::llm::provider::LlmProvider;
    use obsmaleno_types::ChatId;
    use obsmaleno_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};

    use super::*;

    /// Answers `echo: <last user text>`, or fails when `failing` is set.
    pub struct EchoProvider {
        pub failing: bool,
    }

    impl LlmProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            if self.failing {
                return Err(LlmError::Overloaded("try later".to_string()));
            }
            let last = request
                .messages
                .last()
                .map(|m| m.content.as_str())
                .unwrap_or_default();
            Ok(CompletionResponse {
                id: "echo".to_string(),
                content: format!("echo: {last}"),
                model: "echo-1".to_string(),
                stop_reason: StopReason::EndTurn,
                usage: Usage::default(),
            })
        }
    }

    /// Records outbound messages and webhook registrations.
    #[derive(Default)]
    pub struct RecordingMessenger {
        pub sent: Mutex<Vec<(ChatId, String)>>,
        pub registered: Mutex<Vec<String>>,
        pub reject_webhook: AtomicBool,
    }

    impl Messenger for RecordingMessenger {
        async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), MessengerError> {
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            Ok(())
        }

        async fn register_webhook(&self, url: &str) -> Result<(), MessengerError> {
            if self.reject_webhook.load(Ordering::SeqCst) {
                return Err(MessengerError::Api {
                    code: Some(400),
                    description: "Bad Request: bad webhook: HTTPS url must be provided".to_string(),
                });
            }
            self.registered.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    pub fn test_state(failing: bool) -> AppState<RecordingMessenger> {
        let registry = SessionRegistry::new(
            InMemorySessionStore::new(),
            Arc::new(BoxLlmProvider::new(EchoProvider { failing })),
            "persona",
            SessionSettings::default(),
        );
        AppState::new(
            Dispatcher::new(registry, RecordingMessenger::default()),
            "https://bot.example.com/webhook",
        )
    }
}
