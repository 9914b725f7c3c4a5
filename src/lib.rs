//! Atlas SDK - Geospatial Discovery & Synchronization Layer
//!
//! Client SDK for the Atlas challenge platform: browse geotagged challenge
//! records on a map, filter them, bookmark them, and move solution proposals
//! through moderation.
//!
//! # Architecture
//!
//! - Locations are decoded exactly once at the wire boundary
//!   ([`geo::Location`]); nothing downstream branches on raw shapes.
//! - [`ChallengeStore`] and [`BookmarkStore`] exclusively own their state;
//!   fetches are generation-tagged so stale responses never overwrite newer
//!   ones, and failures keep the last-good data.
//! - Bookmark toggles are optimistic with rollback, serialized per challenge.
//! - [`moderation::ModerationQueue`] enforces the solution state machine:
//!   pending -> approved/rejected, approved <-> rejected, never back to
//!   pending.
//! - The backend is reached only through the [`BackendApi`] trait; the
//!   bundled [`ApiClient`] speaks HTTP, tests run against a mock.
//!
//! # Example
//!
//! ```rust,ignore
//! use atlas_sdk::{ApiClient, ApiConfig, ChallengeFilter, ChallengeStore, MapConfig};
//! use std::sync::Arc;
//!
//! let api = Arc::new(ApiClient::new(ApiConfig {
//!     base_url: "https://api.atlas.example".into(),
//!     ..Default::default()
//! }));
//!
//! let store = ChallengeStore::new(api);
//! store.set_filter(ChallengeFilter {
//!     min_severity: Some(3),
//!     ..Default::default()
//! }).await;
//!
//! let viewport = store.viewport(&MapConfig::default());
//! ```

// Backend boundary
pub mod api;

// Configuration
pub mod config;

// Error types
pub mod error;

// Query predicate + debounced search
pub mod filter;

// Location codec and viewport fitting
pub mod geo;

// Solution state machine and review queue
pub mod moderation;

// Identity-provider boundary
pub mod session;

// Reactive stores
pub mod store;

// Domain and wire types
pub mod types;

// Presentation encoding
pub mod visual;

// Re-export the surface most hosts use
pub use api::{ApiClient, BackendApi};
pub use config::{ApiConfig, MapConfig};
pub use error::{AtlasError, Result};
pub use filter::{sort_challenges, ChallengeFilter, Debouncer};
pub use geo::{fit_viewport, BoundingBox, Coordinates, Location, Viewport};
pub use moderation::{submit_solution, ModerationQueue};
pub use session::{IdentityProvider, Session, SessionChannel, UserRole};
pub use store::{BookmarkStore, ChallengeStore};
pub use types::{
    Bookmark, Category, Challenge, ChallengePatch, ChallengeStats, CreateChallengeInput,
    NewSolution, Solution, SolutionStats, SolutionStatus,
};
