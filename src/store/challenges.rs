//! Challenge store
//!
//! Reactive container for the filtered challenge result set. Every filter
//! change issues exactly one fetch, tagged with a generation counter; a
//! completion whose generation is no longer current is discarded outright,
//! so an out-of-order network response can never overwrite a newer result
//! set. Fetch failures keep the last-good data and surface as in-store
//! error state — the map never blanks on a transient failure.

use crate::api::BackendApi;
use crate::config::MapConfig;
use crate::error::AtlasError;
use crate::filter::{sort_challenges, ChallengeFilter};
use crate::geo::{fit_viewport, Viewport};
use crate::types::Challenge;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    challenges: Vec<Challenge>,
    filter: ChallengeFilter,
    loading: bool,
    error: Option<AtlasError>,
}

/// Store for the current filtered challenge result set
pub struct ChallengeStore {
    api: Arc<dyn BackendApi>,
    state: Mutex<State>,
    generation: AtomicU64,
}

impl ChallengeStore {
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self {
            api,
            state: Mutex::new(State::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Current result set, in canonical order
    pub fn challenges(&self) -> Vec<Challenge> {
        self.state.lock().expect("challenge state poisoned").challenges.clone()
    }

    /// Current filter criteria
    pub fn filter(&self) -> ChallengeFilter {
        self.state.lock().expect("challenge state poisoned").filter.clone()
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.state.lock().expect("challenge state poisoned").loading
    }

    /// Message of the last failed operation, until dismissed or superseded
    pub fn last_error(&self) -> Option<String> {
        self.state
            .lock()
            .expect("challenge state poisoned")
            .error
            .as_ref()
            .map(|e| e.to_string())
    }

    /// Dismiss the inline error indicator.
    pub fn dismiss_error(&self) {
        self.state.lock().expect("challenge state poisoned").error = None;
    }

    /// Replace the filter criteria and re-fetch once.
    pub async fn set_filter(&self, filter: ChallengeFilter) {
        self.state.lock().expect("challenge state poisoned").filter = filter;
        self.refresh().await;
    }

    /// Merge new criteria over the current ones and re-fetch once.
    pub async fn update_filter(&self, update: impl FnOnce(&mut ChallengeFilter)) {
        {
            let mut state = self.state.lock().expect("challenge state poisoned");
            update(&mut state.filter);
        }
        self.refresh().await;
    }

    /// Drop all filter criteria and re-fetch.
    pub async fn clear_filters(&self) {
        self.set_filter(ChallengeFilter::default()).await;
    }

    /// Fetch the result set for the current filter.
    ///
    /// Concurrent calls race safely: only the newest generation applies its
    /// response; older completions change nothing, not even the loading flag.
    pub async fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let filter = {
            let mut state = self.state.lock().expect("challenge state poisoned");
            state.loading = true;
            state.filter.clone()
        };

        let result = self.api.list_challenges(&filter).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding stale challenge fetch");
            return;
        }

        let mut state = self.state.lock().expect("challenge state poisoned");
        match result {
            Ok(mut challenges) => {
                sort_challenges(&mut challenges);
                state.challenges = challenges;
                state.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "challenge fetch failed, keeping last-good set");
                state.error = Some(err);
            }
        }
        state.loading = false;
    }

    /// Viewport framing every resolved location in the current result set.
    pub fn viewport(&self, config: &MapConfig) -> Viewport {
        let state = self.state.lock().expect("challenge state poisoned");
        fit_viewport(&state.challenges, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockApi;
    use crate::geo::Location;
    use crate::types::Category;
    use std::time::Duration;

    fn challenge(id: &str, severity: u8) -> Challenge {
        Challenge {
            id: id.into(),
            title: format!("challenge {id}"),
            description: None,
            category: "water".into(),
            severity,
            location: Location::point(-1.94, 29.87),
            region_name: "Kigali".into(),
            population_affected: Some(1_000),
            statistics: Default::default(),
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        }
    }

    fn store_with(api: Arc<MockApi>) -> Arc<ChallengeStore> {
        Arc::new(ChallengeStore::new(api))
    }

    #[tokio::test]
    async fn refresh_applies_and_sorts_results() {
        let api = Arc::new(MockApi::default());
        api.push_list_response(Ok(vec![challenge("a", 2), challenge("b", 5)]));
        let store = store_with(api);

        store.refresh().await;

        let ids: Vec<_> = store.challenges().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["b", "a"]);
        assert!(!store.is_loading());
        assert!(store.last_error().is_none());
    }

    #[tokio::test]
    async fn fetch_failure_keeps_last_good_set() {
        let api = Arc::new(MockApi::default());
        api.push_list_response(Ok(vec![challenge("a", 3)]));
        api.push_list_response(Err(AtlasError::Network("unreachable".into())));
        let store = store_with(api);

        store.refresh().await;
        assert_eq!(store.challenges().len(), 1);

        store.refresh().await;
        assert_eq!(store.challenges().len(), 1, "result set must not blank on failure");
        assert!(store.last_error().is_some());

        store.dismiss_error();
        assert!(store.last_error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_never_overwrites_newer_one() {
        let api = Arc::new(MockApi::default());
        // Generation 1: slow response carrying the old result set.
        api.push_list_delay(Duration::from_millis(500));
        api.push_list_response(Ok(vec![challenge("old", 1)]));
        // Generation 2: fast response carrying the new result set.
        api.push_list_delay(Duration::from_millis(10));
        api.push_list_response(Ok(vec![challenge("new", 1)]));

        let store = store_with(api);

        let slow = {
            let store = store.clone();
            tokio::spawn(async move { store.refresh().await })
        };
        // Let the slow fetch dequeue its scripted response first.
        tokio::task::yield_now().await;

        store
            .set_filter(ChallengeFilter { category: Some(Category::Water), ..Default::default() })
            .await;
        slow.await.unwrap();

        let ids: Vec<_> = store.challenges().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["new"], "generation-1 response must be discarded");
    }

    #[tokio::test]
    async fn filter_change_issues_one_fetch() {
        let api = Arc::new(MockApi::default());
        api.push_list_response(Ok(vec![challenge("a", 4)]));
        let store = store_with(api.clone());

        store
            .update_filter(|f| f.min_severity = Some(3))
            .await;

        assert_eq!(store.filter().min_severity, Some(3));
        assert!(api.list_responses.lock().unwrap().is_empty(), "exactly one fetch consumed");
    }

    #[tokio::test]
    async fn viewport_falls_back_when_empty() {
        let api = Arc::new(MockApi::default());
        let store = store_with(api);
        store.refresh().await;

        let config = MapConfig::default();
        assert!(matches!(store.viewport(&config), Viewport::Center { .. }));
    }
}
