//! Session Registry - one logical session per user.
//!
//! The registry lock guards only map access; each session sits behind its own
//! `Mutex`, so collaborator calls made while holding a session never block
//! unrelated users.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::UserId;
use crate::domain::session::Session;

/// Owns the mapping from user identity to session state.
///
/// Sessions are created lazily on first contact and never deleted; a finished
/// flow resets the session instead of removing it.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<UserId, Arc<Mutex<Session>>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing session for `user_id` or creates a fresh one.
    ///
    /// Safe under concurrent calls for the same user: the write lock makes
    /// the insert atomic, so two racing callers always end up with the same
    /// session handle.
    pub async fn get_or_create(&self, user_id: UserId) -> Arc<Mutex<Session>> {
        // Fast path: most messages belong to an existing session.
        if let Some(session) = self.sessions.read().await.get(&user_id) {
            return Arc::clone(session);
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(user_id)
                .or_insert_with(|| Arc::new(Mutex::new(Session::new(user_id)))),
        )
    }

    /// Number of known sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_same_session_for_same_user() {
        let registry = SessionRegistry::new();

        let first = registry.get_or_create(UserId::new(1)).await;
        let second = registry.get_or_create(UserId::new(1)).await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn distinct_users_get_distinct_sessions() {
        let registry = SessionRegistry::new();

        let a = registry.get_or_create(UserId::new(1)).await;
        let b = registry.get_or_create(UserId::new(2)).await;

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn concurrent_calls_for_same_user_never_create_two_sessions() {
        let registry = SessionRegistry::new();

        let mut handles = Vec::new();
        for _ in 0..32 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry.get_or_create(UserId::new(99)).await
            }));
        }

        let sessions: Vec<_> = futures::future::join_all(handles)
            .await
            .into_iter()
            .map(|h| h.unwrap())
            .collect();

        assert_eq!(registry.len().await, 1);
        for session in &sessions[1..] {
            assert!(Arc::ptr_eq(&sessions[0], session));
        }
    }

    #[tokio::test]
    async fn mutation_is_visible_through_later_lookups() {
        let registry = SessionRegistry::new();

        {
            let session = registry.get_or_create(UserId::new(5)).await;
            session.lock().await.reset();
        }

        let session = registry.get_or_create(UserId::new(5)).await;
        let guard = session.lock().await;
        assert_eq!(guard.step(), crate::domain::session::Step::Start);
    }
}
