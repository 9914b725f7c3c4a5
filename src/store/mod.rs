//! Reactive stores owning the synchronized state
//!
//! Each store exclusively owns its piece of state; nothing else mutates the
//! challenge result set or the bookmark relation except through the store's
//! documented operations.

pub mod bookmarks;
pub mod challenges;

pub use bookmarks::BookmarkStore;
pub use challenges::ChallengeStore;
