//! Recommendations: pick a search mode, run the search, filter and sort.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::KeywordStrategy;
use crate::geo::GeoPoint;
use crate::metrics::PLACES_RETURNED;
use crate::resolver::{resolve_included_types, Mood};
use crate::results::{process, FilterSpec, Place};
use crate::searcher::{SearchError, SearchMode, SearchOrchestrator, SearchRequest, SubQueryFailure};

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendQuery {
    pub center: GeoPoint,
    pub radius_m: f64,
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default)]
    pub filters: FilterSpec,
}

/// Filtered, sorted places plus how they were found.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    pub places: Vec<Place>,
    /// "nearby" or "text".
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Unique places before filters were applied.
    pub candidates_before_filter: usize,
    pub sub_queries: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SubQueryFailure>,
    pub duration_ms: u64,
    pub searched_at: DateTime<Utc>,
}

pub struct Recommender {
    orchestrator: Arc<SearchOrchestrator>,
    keyword_strategy: KeywordStrategy,
}

impl Recommender {
    pub fn new(orchestrator: Arc<SearchOrchestrator>, keyword_strategy: KeywordStrategy) -> Self {
        Self {
            orchestrator,
            keyword_strategy,
        }
    }

    pub fn keyword_strategy(&self) -> KeywordStrategy {
        self.keyword_strategy
    }

    /// Choose the upstream mode for a query.
    pub fn select_mode(&self, mood: Option<Mood>, keyword: Option<&str>) -> SearchMode {
        let keyword = keyword.map(str::trim).filter(|k| !k.is_empty());

        match (self.keyword_strategy, keyword) {
            (KeywordStrategy::Text, Some(keyword)) => SearchMode::Text {
                query: keyword.to_string(),
            },
            (KeywordStrategy::Text, None) => SearchMode::Nearby {
                included_types: resolve_included_types(mood, None),
            },
            (KeywordStrategy::Categories, keyword) => SearchMode::Nearby {
                included_types: resolve_included_types(mood, keyword),
            },
        }
    }

    pub async fn recommend(&self, query: &RecommendQuery) -> Result<Recommendations, SearchError> {
        let mode = self.select_mode(query.mood, query.keyword.as_deref());
        debug!(mode = ?mode, "Selected search mode");

        let request = SearchRequest {
            center: query.center,
            radius_m: query.radius_m,
            mode: mode.clone(),
        };
        let outcome = self.orchestrator.search(&request).await?;

        let candidates_before_filter = outcome.places.len();
        let places = process(outcome.places, query.center, &query.filters);
        PLACES_RETURNED.observe(places.len() as f64);

        let (included_types, text_query) = match mode {
            SearchMode::Nearby { included_types } => (Some(included_types), None),
            SearchMode::Text { query } => (None, Some(query)),
        };

        Ok(Recommendations {
            places,
            mode: request.mode.label().to_string(),
            included_types,
            query: text_query,
            candidates_before_filter,
            sub_queries: outcome.plans.len(),
            warnings: outcome.warnings,
            duration_ms: outcome.duration_ms,
            searched_at: Utc::now(),
        })
    }
}
