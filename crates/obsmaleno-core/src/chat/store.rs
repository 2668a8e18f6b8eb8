//! Session store abstraction and the in-memory implementation.
//!
//! Sessions live for the process lifetime: there is no expiry, eviction,
//! or removal. `put_if_absent` is atomic, so two concurrent first contacts
//! from one user can never leave two handles behind.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use obsmaleno_types::UserId;

use super::session::ChatSession;

/// Result of [`SessionStore::put_if_absent`].
pub enum PutOutcome {
    /// The candidate was stored and is now the user's session.
    Inserted(Arc<ChatSession>),
    /// Another handle was already stored; the candidate was discarded.
    Existing(Arc<ChatSession>),
}

impl PutOutcome {
    /// The handle now stored for the user, whichever branch was taken.
    pub fn session(&self) -> &Arc<ChatSession> {
        match self {
            PutOutcome::Inserted(s) | PutOutcome::Existing(s) => s,
        }
    }

    pub fn into_session(self) -> Arc<ChatSession> {
        match self {
            PutOutcome::Inserted(s) | PutOutcome::Existing(s) => s,
        }
    }

    pub fn was_inserted(&self) -> bool {
        matches!(self, PutOutcome::Inserted(_))
    }
}

/// Mapping from user id to that user's session handle.
pub trait SessionStore: Send + Sync {
    /// Look up the stored handle for `user_id`.
    fn get(&self, user_id: UserId) -> Option<Arc<ChatSession>>;

    /// Store `session` for `user_id` unless one is already stored.
    ///
    /// Must be atomic with respect to concurrent callers for the same id.
    fn put_if_absent(&self, user_id: UserId, session: Arc<ChatSession>) -> PutOutcome;

    /// Number of stored sessions.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime session store backed by `DashMap`.
///
/// Handles are cloned out on read so no `DashMap` guard is ever held
/// across an await.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<UserId, Arc<ChatSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, user_id: UserId) -> Option<Arc<ChatSession>> {
        self.sessions.get(&user_id).map(|r| Arc::clone(r.value()))
    }

    fn put_if_absent(&self, user_id: UserId, session: Arc<ChatSession>) -> PutOutcome {
        match self.sessions.entry(user_id) {
            Entry::Occupied(existing) => PutOutcome::Existing(Arc::clone(existing.get())),
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&session));
                PutOutcome::Inserted(session)
            }
        }
    }

    fn len(&self) -> usize {
        self.sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::session::SessionSettings;
    use crate::chat::session::test_support::ScriptedProvider;
    use crate::llm::box_provider::BoxLlmProvider;

    fn candidate(user_id: UserId) -> Arc<ChatSession> {
        Arc::new(ChatSession::new(
            user_id,
            Arc::new(BoxLlmProvider::new(ScriptedProvider::new())),
            Arc::from("persona"),
            SessionSettings::default(),
        ))
    }

    #[test]
    fn test_get_missing() {
        let store = InMemorySessionStore::new();
        assert!(store.get(42).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_put_if_absent_inserts_once() {
        let store = InMemorySessionStore::new();
        let first = candidate(42);

        let outcome = store.put_if_absent(42, Arc::clone(&first));
        assert!(outcome.was_inserted());
        assert!(Arc::ptr_eq(outcome.session(), &first));

        let second = candidate(42);
        let outcome = store.put_if_absent(42, second);
        assert!(!outcome.was_inserted());
        assert!(Arc::ptr_eq(&outcome.into_session(), &first));

        assert_eq!(store.len(), 1);
        assert!(Arc::ptr_eq(&store.get(42).unwrap(), &first));
    }

    #[test]
    fn test_users_are_independent() {
        let store = InMemorySessionStore::new();
        store.put_if_absent(1, candidate(1));
        store.put_if_absent(2, candidate(2));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1).unwrap().user_id(), 1);
        assert_eq!(store.get(2).unwrap().user_id(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_put_keeps_one_handle() {
        let store = Arc::new(InMemorySessionStore::new());
        let mut tasks = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            tasks.push(tokio::spawn(async move {
                store.put_if_absent(99, candidate(99)).was_inserted()
            }));
        }

        let mut inserted = 0;
        for task in tasks {
            if task.await.unwrap() {
                inserted += 1;
            }
        }
        assert_eq!(inserted, 1);
        assert_eq!(store.len(), 1);
    }
}
