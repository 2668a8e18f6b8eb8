//! Lookup-or-create entry point for per-user sessions.

use std::sync::Arc;

use tracing::info;

use obsmaleno_types::UserId;
use obsmaleno_types::llm::LlmError;

use super::session::{ChatSession, SessionSettings};
use super::store::{PutOutcome, SessionStore};
use crate::llm::box_provider::BoxLlmProvider;

/// A session handed out by [`SessionRegistry::get_or_create`].
pub struct AcquiredSession {
    pub session: Arc<ChatSession>,
    /// True when this call created (and seeded) the session.
    pub created: bool,
}

/// Owns the session store and the recipe for new sessions.
///
/// At most one session exists per user id. A new session is stored first
/// and then seeded with the system instruction; if seeding fails the
/// stored session stays unseeded and seeds itself on its next turn.
pub struct SessionRegistry<S: SessionStore> {
    store: S,
    provider: Arc<BoxLlmProvider>,
    system_instruction: Arc<str>,
    settings: SessionSettings,
}

impl<S: SessionStore> SessionRegistry<S> {
    pub fn new(
        store: S,
        provider: Arc<BoxLlmProvider>,
        system_instruction: impl Into<Arc<str>>,
        settings: SessionSettings,
    ) -> Self {
        Self {
            store,
            provider,
            system_instruction: system_instruction.into(),
            settings,
        }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The stored session for `user_id`, if any. Never creates.
    pub fn get(&self, user_id: UserId) -> Option<Arc<ChatSession>> {
        self.store.get(user_id)
    }

    /// Number of sessions created in this process.
    pub fn session_count(&self) -> usize {
        self.store.len()
    }

    /// Return the user's session, creating and seeding it on first contact.
    ///
    /// # Errors
    ///
    /// Returns the model error when seeding a newly created session fails.
    /// The session is still stored in that case.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<AcquiredSession, LlmError> {
        if let Some(session) = self.store.get(user_id) {
            return Ok(AcquiredSession {
                session,
                created: false,
            });
        }

        let candidate = Arc::new(ChatSession::new(
            user_id,
            Arc::clone(&self.provider),
            Arc::clone(&self.system_instruction),
            self.settings.clone(),
        ));

        match self.store.put_if_absent(user_id, candidate) {
            PutOutcome::Existing(session) => Ok(AcquiredSession {
                session,
                created: false,
            }),
            PutOutcome::Inserted(session) => {
                info!(
                    user_id,
                    sessions = self.store.len(),
                    "created chat session"
                );
                session.seed().await?;
                Ok(AcquiredSession {
                    session,
                    created: true,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::session::test_support::ScriptedProvider;
    use crate::chat::store::InMemorySessionStore;

    fn registry(provider: &ScriptedProvider) -> SessionRegistry<InMemorySessionStore> {
        SessionRegistry::new(
            InMemorySessionStore::new(),
            Arc::new(BoxLlmProvider::new(provider.clone())),
            "persona",
            SessionSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_first_contact_creates_and_seeds() {
        let provider = ScriptedProvider::new();
        let registry = registry(&provider);

        let acquired = registry.get_or_create(42).await.unwrap();
        assert!(acquired.created);
        assert!(acquired.session.is_seeded().await);
        assert_eq!(registry.session_count(), 1);
        assert_eq!(provider.sent_count("persona"), 1);
    }

    #[tokio::test]
    async fn test_second_contact_reuses_handle() {
        let provider = ScriptedProvider::new();
        let registry = registry(&provider);

        let first = registry.get_or_create(42).await.unwrap();
        let second = registry.get_or_create(42).await.unwrap();
        assert!(!second.created);
        assert!(Arc::ptr_eq(&first.session, &second.session));
        assert_eq!(registry.session_count(), 1);
        assert_eq!(provider.sent_count("persona"), 1);
    }

    #[tokio::test]
    async fn test_get_never_creates() {
        let provider = ScriptedProvider::new();
        let registry = registry(&provider);
        assert!(registry.get(5).is_none());
        assert_eq!(registry.session_count(), 0);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_seed_failure_keeps_session_stored() {
        let provider = ScriptedProvider::new();
        provider.fail_next(LlmError::AuthenticationFailed);
        let registry = registry(&provider);

        assert!(registry.get_or_create(8).await.is_err());
        let stored = registry.get(8).unwrap();
        assert!(!stored.is_seeded().await);

        let again = registry.get_or_create(8).await.unwrap();
        assert!(!again.created);
        assert!(Arc::ptr_eq(&stored, &again.session));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_contact_creates_one_session() {
        let provider = ScriptedProvider::new();
        let registry = Arc::new(registry(&provider));

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            tasks.push(tokio::spawn(async move {
                registry.get_or_create(77).await.unwrap().created
            }));
        }

        let mut created = 0;
        for task in tasks {
            if task.await.unwrap() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(registry.session_count(), 1);
        assert_eq!(provider.sent_count("persona"), 1);
    }
}
