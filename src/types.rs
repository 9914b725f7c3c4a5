//! Domain and wire types for the Atlas API

use crate::geo::Location;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Severity bounds for a challenge (inclusive)
pub const SEVERITY_MIN: u8 = 1;
pub const SEVERITY_MAX: u8 = 5;

/// The closed set of challenge categories.
///
/// Records on the wire carry the category as a raw string so that values
/// predating (or outliving) this set still deserialize; use
/// [`Category::parse`] to map a raw value into the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Water,
    Healthcare,
    Education,
    Infrastructure,
    Agriculture,
    Energy,
}

impl Category {
    /// Every known category, in display order
    pub const ALL: [Category; 6] = [
        Category::Water,
        Category::Healthcare,
        Category::Education,
        Category::Infrastructure,
        Category::Agriculture,
        Category::Energy,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Water => "water",
            Category::Healthcare => "healthcare",
            Category::Education => "education",
            Category::Infrastructure => "infrastructure",
            Category::Agriculture => "agriculture",
            Category::Energy => "energy",
        }
    }

    /// Map a raw wire value into the closed set, if it belongs to it.
    pub fn parse(raw: &str) -> Option<Category> {
        Category::ALL.iter().copied().find(|c| c.as_str() == raw)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A geotagged record describing a development problem in a region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Raw category value; may fall outside [`Category::ALL`] for stale rows
    pub category: String,
    /// Severity 1 (low) to 5 (critical)
    pub severity: u8,
    /// Decoded once at the wire boundary; never re-parsed downstream
    #[serde(default)]
    pub location: Location,
    pub region_name: String,
    #[serde(default)]
    pub population_affected: Option<u64>,
    /// Free-form per-challenge statistics
    #[serde(default)]
    pub statistics: HashMap<String, serde_json::Value>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating a challenge (admin-gated server-side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateChallengeInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: Category,
    pub severity: u8,
    /// Serialized as the WKT `POINT(lng lat)` form the backend stores
    pub location: Location,
    pub region_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_affected: Option<u64>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub statistics: HashMap<String, serde_json::Value>,
}

/// Partial update for a challenge (admin-gated server-side)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_affected: Option<u64>,
}

/// A user-scoped marker of interest on a challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub user_id: String,
    pub challenge_id: String,
    pub created_at: String,
}

/// Moderation status of a solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolutionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolutionStatus::Pending => "pending",
            SolutionStatus::Approved => "approved",
            SolutionStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-submitted proposal addressing a specific challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    pub id: String,
    pub challenge_id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: SolutionStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for submitting a solution.
///
/// Status is not part of the input: the backend forces `pending` regardless
/// of what a client sends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSolution {
    pub challenge_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Aggregate challenge statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeStats {
    #[serde(default)]
    pub by_category: HashMap<String, u64>,
    #[serde(default)]
    pub by_severity: HashMap<String, u64>,
    pub total: u64,
}

/// Aggregate solution statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolutionStats {
    #[serde(default)]
    pub by_status: HashMap<String, u64>,
    pub total: u64,
}
