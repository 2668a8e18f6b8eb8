//! Session handle for one user's conversation with the model.
//!
//! A `ChatSession` retains every completed turn as context. The model API
//! is stateless, so the full history is sent on each call. Turns on one
//! session are serialized by an async mutex; different users never contend.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use obsmaleno_types::UserId;
use obsmaleno_types::llm::{CompletionRequest, LlmError, Message};

use crate::llm::box_provider::BoxLlmProvider;

/// Generation settings applied to every turn of a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub max_tokens: u32,
    pub temperature: Option<f64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: None,
        }
    }
}

#[derive(Debug, Default)]
struct Conversation {
    history: Vec<Message>,
    seeded: bool,
    turns: u32,
}

/// An ongoing multi-turn exchange with the chat model.
pub struct ChatSession {
    user_id: UserId,
    provider: Arc<BoxLlmProvider>,
    system_instruction: Arc<str>,
    settings: SessionSettings,
    created_at: DateTime<Utc>,
    conversation: Mutex<Conversation>,
}

impl ChatSession {
    /// Create an unseeded session. No network call is made.
    pub fn new(
        user_id: UserId,
        provider: Arc<BoxLlmProvider>,
        system_instruction: Arc<str>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            user_id,
            provider,
            system_instruction,
            settings,
            created_at: Utc::now(),
            conversation: Mutex::new(Conversation::default()),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Send the system instruction as the opening turn, once.
    ///
    /// A no-op when the session is already seeded. On failure the session
    /// stays unseeded and the next `seed` or `send` tries again.
    pub async fn seed(&self) -> Result<(), LlmError> {
        let mut conversation = self.conversation.lock().await;
        self.seed_locked(&mut conversation).await
    }

    /// Send one user turn and return the model's reply.
    ///
    /// Seeds the session first if needed. A failed turn leaves the history
    /// unchanged.
    pub async fn send(&self, text: &str) -> Result<String, LlmError> {
        let mut conversation = self.conversation.lock().await;
        self.seed_locked(&mut conversation).await?;

        let reply = self.exchange(&mut conversation, text).await?;
        conversation.turns += 1;
        Ok(reply)
    }

    /// Whether the system instruction has been delivered.
    pub async fn is_seeded(&self) -> bool {
        self.conversation.lock().await.seeded
    }

    /// Completed user turns, not counting the seed.
    pub async fn turn_count(&self) -> u32 {
        self.conversation.lock().await.turns
    }

    /// Messages retained as context, including the seed exchange.
    pub async fn history_len(&self) -> usize {
        self.conversation.lock().await.history.len()
    }

    async fn seed_locked(&self, conversation: &mut Conversation) -> Result<(), LlmError> {
        if conversation.seeded {
            return Ok(());
        }

        self.exchange(conversation, &self.system_instruction).await?;
        conversation.seeded = true;

        debug!(user_id = self.user_id, "session seeded with system instruction");
        Ok(())
    }

    async fn exchange(
        &self,
        conversation: &mut Conversation,
        text: &str,
    ) -> Result<String, LlmError> {
        // History only changes once the reply is in hand, so a dropped or
        // failed call leaves it alternating.
        let request = CompletionRequest {
            model: String::new(),
            messages: conversation
                .history
                .iter()
                .cloned()
                .chain([Message::user(text)])
                .collect(),
            system: None,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        let response = self.provider.complete(&request).await?;
        conversation.history.push(Message::user(text));
        conversation
            .history
            .push(Message::assistant(response.content.clone()));
        Ok(response.content)
    }
}
