//! Filter engine
//!
//! Builds the query predicate applied to challenge result sets. The same
//! criteria drive both the server-side query (via [`ChallengeFilter::query_pairs`])
//! and the client-side predicate (via [`ChallengeFilter::matches`]), so the
//! two can never disagree. Also owns the debounce timer used by search input.

use crate::error::{AtlasError, Result};
use crate::types::{Category, Challenge, SEVERITY_MAX, SEVERITY_MIN};
use std::cmp::Ordering;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Transient filter criteria, held client-side and never persisted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChallengeFilter {
    /// Exact-match category
    pub category: Option<Category>,
    /// Inclusive severity floor: keep records with severity >= this
    pub min_severity: Option<u8>,
    /// Case-insensitive substring over title or region name
    pub search: Option<String>,
}

impl ChallengeFilter {
    /// Whether no criteria are set
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.min_severity.is_none() && self.search.is_none()
    }

    /// Reject a severity floor outside the valid range.
    pub fn validate(&self) -> Result<()> {
        if let Some(floor) = self.min_severity {
            if !(SEVERITY_MIN..=SEVERITY_MAX).contains(&floor) {
                return Err(AtlasError::Validation(format!(
                    "severity floor {floor} outside {SEVERITY_MIN}..={SEVERITY_MAX}"
                )));
            }
        }
        Ok(())
    }

    /// Client-side predicate; criteria compose with logical AND.
    pub fn matches(&self, challenge: &Challenge) -> bool {
        if let Some(category) = self.category {
            if challenge.category != category.as_str() {
                return false;
            }
        }
        if let Some(floor) = self.min_severity {
            if challenge.severity < floor {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            let in_title = challenge.title.to_lowercase().contains(&needle);
            let in_region = challenge.region_name.to_lowercase().contains(&needle);
            if !in_title && !in_region {
                return false;
            }
        }
        true
    }

    /// Query-string pairs for the server-side form of the same predicate.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category {
            pairs.push(("category", category.as_str().to_string()));
        }
        if let Some(floor) = self.min_severity {
            pairs.push(("min_severity", floor.to_string()));
        }
        if let Some(ref search) = self.search {
            pairs.push(("search", search.clone()));
        }
        pairs
    }
}

/// Canonical result ordering: severity descending, then creation time
/// descending, ties broken by id so the order is deterministic.
pub fn sort_challenges(challenges: &mut [Challenge]) {
    challenges.sort_by(compare_challenges);
}

fn compare_challenges(a: &Challenge, b: &Challenge) -> Ordering {
    b.severity
        .cmp(&a.severity)
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// An owned, cancellable debounce timer.
///
/// Each instance owns its pending task; scheduling a new action aborts the
/// previous one, and dropping the debouncer aborts whatever is pending. No
/// state is shared across instances.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: Mutex::new(None) }
    }

    /// Schedule `action` to run after the delay, replacing any pending action.
    pub fn call<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });
        let mut pending = self.pending.lock().expect("debouncer lock poisoned");
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Abort the pending action, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().expect("debouncer lock poisoned").take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
