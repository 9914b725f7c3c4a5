//! Backend data service boundary
//!
//! [`BackendApi`] is the seam between the stores and the remote service:
//! stores only ever talk to this trait, so tests run against an in-memory
//! implementation and the HTTP transport stays swappable.

mod http;

pub use http::ApiClient;

use crate::error::Result;
use crate::filter::ChallengeFilter;
use crate::types::{
    Bookmark, Challenge, ChallengePatch, ChallengeStats, CreateChallengeInput, NewSolution,
    Solution, SolutionStats, SolutionStatus,
};
use async_trait::async_trait;

/// Remote operations exposed by the Atlas backend.
///
/// Mutating challenge calls and solution status updates are capability-checked
/// server-side; this layer only surfaces the resulting permission failures.
#[async_trait]
pub trait BackendApi: Send + Sync {
    // ==================== Challenges ====================

    /// List challenges matching the filter, server-side.
    async fn list_challenges(&self, filter: &ChallengeFilter) -> Result<Vec<Challenge>>;

    /// Fetch a single challenge by id.
    async fn get_challenge(&self, id: &str) -> Result<Challenge>;

    /// Create a challenge (admin).
    async fn create_challenge(&self, input: CreateChallengeInput) -> Result<Challenge>;

    /// Apply a partial update to a challenge (admin).
    async fn update_challenge(&self, id: &str, patch: ChallengePatch) -> Result<Challenge>;

    /// Delete a challenge (admin). Bookmarks cascade server-side.
    async fn delete_challenge(&self, id: &str) -> Result<()>;

    // ==================== Bookmarks ====================

    /// List a user's bookmarks.
    async fn list_bookmarks(&self, user_id: &str) -> Result<Vec<Bookmark>>;

    /// Add a bookmark for (user, challenge).
    async fn add_bookmark(&self, user_id: &str, challenge_id: &str) -> Result<Bookmark>;

    /// Remove a bookmark for (user, challenge).
    async fn remove_bookmark(&self, user_id: &str, challenge_id: &str) -> Result<()>;

    // ==================== Solutions ====================

    /// Submit a solution. The backend forces status to pending.
    async fn create_solution(&self, input: NewSolution) -> Result<Solution>;

    /// List solutions, optionally restricted to one status (admin).
    async fn list_solutions(&self, status: Option<SolutionStatus>) -> Result<Vec<Solution>>;

    /// List solutions submitted by a user.
    async fn list_user_solutions(&self, user_id: &str) -> Result<Vec<Solution>>;

    /// List approved solutions for a challenge (the public view).
    async fn list_solutions_for_challenge(&self, challenge_id: &str) -> Result<Vec<Solution>>;

    /// Update a solution's moderation status (admin).
    async fn update_solution_status(&self, id: &str, status: SolutionStatus) -> Result<Solution>;

    // ==================== Stats ====================

    /// Aggregate challenge counts by category and severity.
    async fn challenge_stats(&self) -> Result<ChallengeStats>;

    /// Aggregate solution counts by status.
    async fn solution_stats(&self) -> Result<SolutionStats>;
}
