use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::models::posting::Language;
use crate::models::session::UserSession;

pub type SessionHandle = Arc<Mutex<UserSession>>;

/// Per-user conversation sessions.
///
/// Each user has an independent lock, so unrelated users never contend. A
/// session is created on first use and dropped again once it is idle and
/// nobody holds its handle.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<i64, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The map shard is released before this returns; lock the handle, never
    /// the map, while working on a session.
    pub fn handle(&self, user_id: i64, language: Language) -> SessionHandle {
        self.sessions
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(UserSession::new(language))))
            .clone()
    }

    /// Drops the session if it is idle and unused. Call after the caller's own
    /// handle has been dropped.
    pub fn release(&self, user_id: i64) {
        self.sessions.remove_if(&user_id, |_, handle| {
            Arc::strong_count(handle) == 1
                && handle
                    .try_lock()
                    .map(|session| session.is_idle())
                    .unwrap_or(false)
        });
    }

    pub async fn snapshot(&self, user_id: i64) -> Option<UserSession> {
        let handle = self.sessions.get(&user_id).map(|entry| entry.clone())?;
        let session = handle.lock().await;
        Some(session.clone())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::ConversationState;

    #[tokio::test]
    async fn idle_sessions_are_dropped_on_release() {
        let store = SessionStore::new();
        let handle = store.handle(1, Language::En);
        drop(handle);
        store.release(1);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn active_or_borrowed_sessions_survive_release() {
        let store = SessionStore::new();
        let handle = store.handle(1, Language::Ru);
        handle.lock().await.state = ConversationState::AwaitingPostType;

        store.release(1);
        assert_eq!(store.len(), 1, "held handle keeps the session");

        drop(handle);
        store.release(1);
        assert_eq!(store.len(), 1, "non-idle session is kept");

        let snapshot = store.snapshot(1).await.unwrap();
        assert_eq!(snapshot.state, ConversationState::AwaitingPostType);
        assert_eq!(snapshot.language, Language::Ru);
    }

    #[tokio::test]
    async fn users_get_independent_sessions() {
        let store = SessionStore::new();
        let a = store.handle(1, Language::En);
        let b = store.handle(2, Language::En);
        let _guard_a = a.lock().await;
        // Locking another user's session must not wait on user 1.
        assert!(b.try_lock().is_ok());
        assert!(Arc::ptr_eq(&a, &store.handle(1, Language::En)));
    }
}
