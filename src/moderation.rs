//! Solution moderation
//!
//! A solution enters the system as `pending` and is moved by admins between
//! `approved` and `rejected`. Once a solution leaves `pending`, nothing
//! brings it back; submission is the only path into `pending`. A transition
//! to the state a solution is already in is an idempotent success that skips
//! the remote call entirely.

use crate::api::BackendApi;
use crate::error::{AtlasError, Result};
use crate::session::Session;
use crate::types::{NewSolution, Solution, SolutionStatus};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

impl SolutionStatus {
    /// Whether the moderation machine permits this transition.
    ///
    /// Same-state transitions are permitted (and treated as no-ops by the
    /// queue); `pending` is never a target once left.
    pub fn can_transition_to(self, target: SolutionStatus) -> bool {
        use SolutionStatus::*;
        match (self, target) {
            (from, to) if from == to => true,
            (Pending, Approved) | (Pending, Rejected) => true,
            (Approved, Rejected) | (Rejected, Approved) => true,
            _ => false,
        }
    }
}

/// Submit a solution proposal.
///
/// Validates the inputs a form cannot; the backend forces the status to
/// `pending` regardless of anything the client sends.
pub async fn submit_solution(api: &dyn BackendApi, input: NewSolution) -> Result<Solution> {
    if input.challenge_id.trim().is_empty() {
        return Err(AtlasError::Validation("solution must reference a challenge".into()));
    }
    if input.title.trim().is_empty() {
        return Err(AtlasError::Validation("solution title must not be empty".into()));
    }
    api.create_solution(input).await
}

#[derive(Default)]
struct State {
    solutions: Vec<Solution>,
    status_filter: Option<SolutionStatus>,
    loading: bool,
    error: Option<String>,
}

/// Admin review queue over the solution list.
///
/// Follows the same synchronization discipline as the challenge store:
/// generation-tagged fetches, last-good retention on failure, and local
/// reconciliation after each persisted transition.
pub struct ModerationQueue {
    api: Arc<dyn BackendApi>,
    state: Mutex<State>,
    generation: AtomicU64,
}

impl ModerationQueue {
    pub fn new(api: Arc<dyn BackendApi>) -> Self {
        Self {
            api,
            state: Mutex::new(State::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Solutions currently in the queue
    pub fn solutions(&self) -> Vec<Solution> {
        self.state.lock().expect("moderation state poisoned").solutions.clone()
    }

    /// Active status filter (`None` means all)
    pub fn status_filter(&self) -> Option<SolutionStatus> {
        self.state.lock().expect("moderation state poisoned").status_filter
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().expect("moderation state poisoned").loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().expect("moderation state poisoned").error.clone()
    }

    pub fn dismiss_error(&self) {
        self.state.lock().expect("moderation state poisoned").error = None;
    }

    /// Change the status filter and re-fetch once.
    pub async fn set_status_filter(&self, status: Option<SolutionStatus>) {
        self.state.lock().expect("moderation state poisoned").status_filter = status;
        self.refresh().await;
    }

    /// Fetch the solution list for the current status filter.
    pub async fn refresh(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let status = {
            let mut state = self.state.lock().expect("moderation state poisoned");
            state.loading = true;
            state.status_filter
        };

        let result = self.api.list_solutions(status).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(generation, "discarding stale solution fetch");
            return;
        }

        let mut state = self.state.lock().expect("moderation state poisoned");
        match result {
            Ok(solutions) => {
                state.solutions = solutions;
                state.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, "solution fetch failed, keeping last-good list");
                state.error = Some(err.to_string());
            }
        }
        state.loading = false;
    }

    /// Apply a moderation transition to a queued solution.
    ///
    /// Requires administrative capability. Persists remotely first, then
    /// reconciles the local record from the response (which carries the
    /// updated timestamp). Invalid transitions and unauthorized callers fail
    /// with a typed error and leave state unchanged on both sides.
    pub async fn moderate(
        &self,
        solution_id: &str,
        target: SolutionStatus,
        session: &Session,
    ) -> Result<Solution> {
        if !session.is_admin() {
            return Err(AtlasError::Permission(
                "moderating solutions requires administrative capability".into(),
            ));
        }

        let current = {
            let state = self.state.lock().expect("moderation state poisoned");
            state
                .solutions
                .iter()
                .find(|s| s.id == solution_id)
                .cloned()
                .ok_or_else(|| AtlasError::NotFound(format!("solution {solution_id}")))?
        };

        if current.status == target {
            // Idempotent no-op; nothing to persist.
            return Ok(current);
        }
        if !current.status.can_transition_to(target) {
            return Err(AtlasError::Validation(format!(
                "cannot move solution from {} to {}",
                current.status, target
            )));
        }

        match self.api.update_solution_status(solution_id, target).await {
            Ok(updated) => {
                let mut state = self.state.lock().expect("moderation state poisoned");
                if let Some(local) = state.solutions.iter_mut().find(|s| s.id == solution_id) {
                    *local = updated.clone();
                }
                state.error = None;
                Ok(updated)
            }
            Err(err) => {
                tracing::warn!(solution_id, error = %err, "moderation transition failed");
                self.state.lock().expect("moderation state poisoned").error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
