//! Bookmark store
//!
//! Holds the set of challenge ids the current user has bookmarked. Toggles
//! are optimistic: the local set mutates before the backend confirms, and the
//! inverse is applied if the remote call fails. Toggles on the same challenge
//! id are serialized through a per-id lock; toggles on different challenges
//! run concurrently. With no authenticated user the store is empty and inert.

use crate::api::BackendApi;
use crate::error::{AtlasError, Result};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;

/// Store for the current user's bookmark relation
pub struct BookmarkStore {
    api: Arc<dyn BackendApi>,
    user_id: Mutex<Option<String>>,
    bookmarks: Mutex<HashSet<String>>,
    error: Mutex<Option<String>>,
    /// Per-challenge-id toggle serialization
    locks: AsyncMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl BookmarkStore {
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self {
            api,
            user_id: Mutex::new(None),
            bookmarks: Mutex::new(HashSet::new()),
            error: Mutex::new(None),
            locks: AsyncMutex::new(HashMap::new()),
        }
    }

    /// Switch the owning user and reload the relation.
    ///
    /// `None` (signed out) empties the store. Continuations started under the
    /// previous user find the owner changed and apply nothing.
    pub async fn set_user(&self, user_id: Option<String>) {
        {
            *self.user_id.lock().expect("bookmark user poisoned") = user_id.clone();
            self.bookmarks.lock().expect("bookmark set poisoned").clear();
            *self.error.lock().expect("bookmark error poisoned") = None;
        }
        self.locks.lock().await.clear();
        if user_id.is_some() {
            self.refresh().await;
        }
    }

    /// Re-fetch the bookmark relation from the backend.
    ///
    /// On failure the current set is retained and the error recorded. A
    /// response that arrives after the owner changed is discarded.
    pub async fn refresh(&self) {
        let Some(user_id) = self.current_user() else {
            return;
        };
        let result = self.api.list_bookmarks(&user_id).await;
        if !self.owned_by(&user_id) {
            tracing::debug!(user_id, "discarding bookmark fetch for a previous user");
            return;
        }
        match result {
            Ok(bookmarks) => {
                let ids = bookmarks.into_iter().map(|b| b.challenge_id).collect();
                *self.bookmarks.lock().expect("bookmark set poisoned") = ids;
                *self.error.lock().expect("bookmark error poisoned") = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "bookmark fetch failed, keeping current set");
                *self.error.lock().expect("bookmark error poisoned") = Some(err.to_string());
            }
        }
    }

    /// Synchronous membership query over current local state.
    pub fn is_bookmarked(&self, challenge_id: &str) -> bool {
        self.bookmarks
            .lock()
            .expect("bookmark set poisoned")
            .contains(challenge_id)
    }

    /// Snapshot of the bookmarked challenge ids
    pub fn bookmarked_ids(&self) -> HashSet<String> {
        self.bookmarks.lock().expect("bookmark set poisoned").clone()
    }

    /// Message of the last failed operation
    pub fn last_error(&self) -> Option<String> {
        self.error.lock().expect("bookmark error poisoned").clone()
    }

    /// Dismiss the inline error indicator.
    pub fn dismiss_error(&self) {
        *self.error.lock().expect("bookmark error poisoned") = None;
    }

    /// Toggle a bookmark, optimistically.
    ///
    /// Returns the new membership state on success. On remote failure the
    /// local mutation is rolled back and the error both recorded in-store and
    /// returned. A toggle for a challenge whose previous toggle is still in
    /// flight waits its turn instead of racing. If the owner changes while the
    /// remote call is in flight, the result is returned but the store (which
    /// now belongs to someone else, or nobody) is left untouched.
    pub async fn toggle(&self, challenge_id: &str) -> Result<bool> {
        let Some(user_id) = self.current_user() else {
            return Err(AtlasError::Permission("must be signed in to bookmark".into()));
        };

        let result = {
            let lock = {
                let mut locks = self.locks.lock().await;
                locks.entry(challenge_id.to_string()).or_default().clone()
            };
            let _serialized = lock.lock().await;

            // Optimistic local mutation; the inverse restores it on failure.
            let adding = {
                let mut set = self.bookmarks.lock().expect("bookmark set poisoned");
                if set.contains(challenge_id) {
                    set.remove(challenge_id);
                    false
                } else {
                    set.insert(challenge_id.to_string());
                    true
                }
            };

            let result = if adding {
                self.api.add_bookmark(&user_id, challenge_id).await.map(|_| ())
            } else {
                self.api.remove_bookmark(&user_id, challenge_id).await
            };

            match result {
                _ if !self.owned_by(&user_id) => {
                    tracing::debug!(
                        challenge_id,
                        user_id,
                        "owner changed mid-toggle, leaving store untouched"
                    );
                    result.map(|_| adding)
                }
                Ok(()) => {
                    *self.error.lock().expect("bookmark error poisoned") = None;
                    Ok(adding)
                }
                Err(err) => {
                    tracing::warn!(challenge_id, error = %err, "bookmark toggle failed, rolling back");
                    {
                        let mut set = self.bookmarks.lock().expect("bookmark set poisoned");
                        if adding {
                            set.remove(challenge_id);
                        } else {
                            set.insert(challenge_id.to_string());
                        }
                    }
                    *self.error.lock().expect("bookmark error poisoned") = Some(err.to_string());
                    Err(err)
                }
            }
        };

        // With no other toggle holding or waiting on this id's lock, the map
        // is its only owner and the entry can go.
        {
            let mut locks = self.locks.lock().await;
            if locks.get(challenge_id).is_some_and(|entry| Arc::strong_count(entry) == 1) {
                locks.remove(challenge_id);
            }
        }

        result
    }

    fn current_user(&self) -> Option<String> {
        self.user_id.lock().expect("bookmark user poisoned").clone()
    }

    /// Whether `user_id` is still the store's owner.
    fn owned_by(&self, user_id: &str) -> bool {
        self.current_user().as_deref() == Some(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    async fn signed_in_store(api: Arc<MockApi>) -> Arc<BookmarkStore> {
        let store = Arc::new(BookmarkStore::new(api));
        store.set_user(Some("u1".into())).await;
        store
    }

    #[tokio::test]
    async fn double_toggle_returns_to_initial_state() {
        let api = Arc::new(MockApi::default());
        let store = signed_in_store(api.clone()).await;

        assert!(store.toggle("c1").await.unwrap());
        assert!(store.is_bookmarked("c1"));

        assert!(!store.toggle("c1").await.unwrap());
        assert!(!store.is_bookmarked("c1"));
        assert!(api.bookmarks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_toggle_rolls_back_local_state() {
        let api = Arc::new(MockApi::default());
        let store = signed_in_store(api.clone()).await;

        api.fail_next_bookmark.store(true, Ordering::SeqCst);
        let err = store.toggle("c1").await.unwrap_err();
        assert!(matches!(err, AtlasError::Network(_)));

        assert!(!store.is_bookmarked("c1"), "membership must match pre-toggle state");
        assert!(store.last_error().is_some());

        // The failure is non-fatal: the next toggle succeeds and clears it.
        assert!(store.toggle("c1").await.unwrap());
        assert!(store.last_error().is_none());
    }

    #[tokio::test]
    async fn inert_without_a_user() {
        let api = Arc::new(MockApi::default());
        let store = BookmarkStore::new(api);

        let err = store.toggle("c1").await.unwrap_err();
        assert!(matches!(err, AtlasError::Permission(_)));
        assert!(store.bookmarked_ids().is_empty());
    }

    #[tokio::test]
    async fn sign_out_empties_the_store() {
        let api = Arc::new(MockApi::default());
        api.bookmarks.lock().unwrap().insert(("u1".into(), "c9".into()));
        let store = signed_in_store(api).await;
        assert!(store.is_bookmarked("c9"));

        store.set_user(None).await;
        assert!(!store.is_bookmarked("c9"));
        assert!(store.bookmarked_ids().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn rollback_after_sign_out_leaves_store_empty() {
        let api = Arc::new(MockApi::default());
        api.bookmarks.lock().unwrap().insert(("u1".into(), "c1".into()));
        let store = signed_in_store(api.clone()).await;
        assert!(store.is_bookmarked("c1"));

        // A remove-toggle that will fail after a delay, with a sign-out
        // landing while it is in flight.
        *api.bookmark_delay.lock().unwrap() = Some(Duration::from_millis(100));
        api.fail_next_bookmark.store(true, Ordering::SeqCst);
        let toggle = {
            let store = store.clone();
            tokio::spawn(async move { store.toggle("c1").await })
        };
        tokio::task::yield_now().await;
        store.set_user(None).await;

        let err = toggle.await.unwrap().unwrap_err();
        assert!(matches!(err, AtlasError::Network(_)));

        // The rollback belongs to the previous owner; the signed-out store
        // stays empty and error-free.
        assert!(store.bookmarked_ids().is_empty());
        assert!(store.last_error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_bookmark_fetch_never_crosses_users() {
        let api = Arc::new(MockApi::default());
        {
            let mut bookmarks = api.bookmarks.lock().unwrap();
            bookmarks.insert(("u1".into(), "a".into()));
            bookmarks.insert(("u2".into(), "b".into()));
        }
        // u1's fetch resolves long after u2's.
        {
            let mut delays = api.list_bookmark_delays.lock().unwrap();
            delays.push_back(Duration::from_millis(200));
            delays.push_back(Duration::from_millis(10));
        }

        let store = Arc::new(BookmarkStore::new(api));
        let slow_sign_in = {
            let store = store.clone();
            tokio::spawn(async move { store.set_user(Some("u1".into())).await })
        };
        tokio::task::yield_now().await;
        store.set_user(Some("u2".into())).await;
        assert!(store.is_bookmarked("b"));

        // u1's late response must not overwrite u2's set.
        slow_sign_in.await.unwrap();
        assert_eq!(store.bookmarked_ids(), HashSet::from(["b".to_string()]));
    }

    #[tokio::test]
    async fn lock_table_is_pruned_after_toggles() {
        let api = Arc::new(MockApi::default());
        let store = signed_in_store(api).await;

        store.toggle("c1").await.unwrap();
        store.toggle("c2").await.unwrap();
        store.toggle("c1").await.unwrap();

        assert!(store.locks.lock().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn same_challenge_toggles_are_serialized() {
        let api = Arc::new(MockApi::default());
        *api.bookmark_delay.lock().unwrap() = Some(Duration::from_millis(100));
        let store = signed_in_store(api.clone()).await;

        let first = {
            let store = store.clone();
            tokio::spawn(async move { store.toggle("c1").await })
        };
        let second = {
            let store = store.clone();
            tokio::spawn(async move { store.toggle("c1").await })
        };

        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();

        // One toggle added, the other removed: back to the initial state,
        // locally and remotely.
        assert_ne!(first, second);
        assert!(!store.is_bookmarked("c1"));
        assert!(api.bookmarks.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn different_challenges_toggle_concurrently() {
        let api = Arc::new(MockApi::default());
        *api.bookmark_delay.lock().unwrap() = Some(Duration::from_millis(100));
        let store = signed_in_store(api).await;

        let started = tokio::time::Instant::now();
        let a = {
            let store = store.clone();
            tokio::spawn(async move { store.toggle("c1").await })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move { store.toggle("c2").await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        // Both waited on the backend in parallel, not back to back.
        assert!(started.elapsed() < Duration::from_millis(200));
        assert!(store.is_bookmarked("c1"));
        assert!(store.is_bookmarked("c2"));
    }
}
