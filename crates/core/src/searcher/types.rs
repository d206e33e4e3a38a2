//! Types for the place search system.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::GeoPoint;
use crate::planner::SubQueryPlan;
use crate::provider::RawPlace;

/// Which upstream operation drives a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchMode {
    /// Category search inside a circle; large radii are tiled.
    Nearby { included_types: Vec<String> },
    /// Free-text search biased towards a circle; never tiled.
    Text { query: String },
}

impl SearchMode {
    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Nearby { .. } => "nearby",
            SearchMode::Text { .. } => "text",
        }
    }
}

/// Parameters for one search invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub center: GeoPoint,
    /// Requested radius in meters, clamped to 500-50000 before planning.
    pub radius_m: f64,
    pub mode: SearchMode,
}

impl SearchRequest {
    pub fn nearby(center: GeoPoint, radius_m: f64, included_types: Vec<String>) -> Self {
        Self {
            center,
            radius_m,
            mode: SearchMode::Nearby { included_types },
        }
    }

    pub fn text(center: GeoPoint, radius_m: f64, query: impl Into<String>) -> Self {
        Self {
            center,
            radius_m,
            mode: SearchMode::Text {
                query: query.into(),
            },
        }
    }
}

/// A sub-query that produced no results because its call failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubQueryFailure {
    /// Position of the sub-query in the plan.
    pub index: usize,
    pub center: GeoPoint,
    pub radius_m: f64,
    pub error: String,
}

/// Merged output of a search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Deduplicated records (ordered by id).
    pub places: Vec<RawPlace>,
    /// The sub-queries that were executed.
    pub plans: Vec<SubQueryPlan>,
    /// Failed sub-queries; empty when every call succeeded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SubQueryFailure>,
    /// Records received before deduplication.
    pub raw_count: usize,
    /// How long the search took in milliseconds.
    pub duration_ms: u64,
}

impl SearchOutcome {
    /// Whether some, but not all, sub-queries failed.
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Errors a caller can see from a search.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("Invalid search request: {0}")]
    InvalidRequest(String),

    #[error("All upstream calls failed ({} sub-queries)", .0.len())]
    AllUpstreamFailed(Vec<SubQueryFailure>),
}
