//! Search orchestration: plan, fan out, tolerate failures, merge.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::config::{FanOut, SearchConfig};
use crate::metrics::{SEARCHES, SUB_QUERIES_PER_SEARCH, UPSTREAM_CALLS, UPSTREAM_CALL_DURATION};
use crate::planner::{clamp_radius, plan, SubQueryPlan};
use crate::provider::{PlacesProvider, ProviderError, RawPlace};

use super::dedup::merge_by_id;
use super::{SearchError, SearchMode, SearchOutcome, SearchRequest, SubQueryFailure};

/// Upper bound for a single upstream call when none is configured.
pub const DEFAULT_SUB_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs searches against a places provider.
///
/// Nearby searches with a large radius are split into quadrant tiles and
/// dispatched together. A failed tile only produces a warning; the search
/// fails when every tile fails.
pub struct SearchOrchestrator {
    provider: Arc<dyn PlacesProvider>,
    sub_query_timeout: Duration,
    fan_out: FanOut,
}

impl SearchOrchestrator {
    pub fn new(provider: Arc<dyn PlacesProvider>) -> Self {
        Self {
            provider,
            sub_query_timeout: DEFAULT_SUB_QUERY_TIMEOUT,
            fan_out: FanOut::default(),
        }
    }

    pub fn from_config(provider: Arc<dyn PlacesProvider>, config: &SearchConfig) -> Self {
        Self::new(provider)
            .with_sub_query_timeout(Duration::from_secs(config.sub_query_timeout_secs))
            .with_fan_out(config.fan_out)
    }

    pub fn with_sub_query_timeout(mut self, timeout: Duration) -> Self {
        self.sub_query_timeout = timeout;
        self
    }

    pub fn with_fan_out(mut self, fan_out: FanOut) -> Self {
        self.fan_out = fan_out;
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Execute a search and return the merged, deduplicated records.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        let span = info_span!(
            "search",
            search_id = %Uuid::new_v4(),
            mode = request.mode.label(),
            provider = self.provider.name()
        );
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: &SearchRequest) -> Result<SearchOutcome, SearchError> {
        let start = Instant::now();

        let radius_m = match validate(request) {
            Ok(radius_m) => radius_m,
            Err(e) => {
                SEARCHES.with_label_values(&["invalid_request"]).inc();
                debug!(error = %e, "Rejected search request");
                return Err(e);
            }
        };

        // Text search is a single biased query; only nearby searches are tiled.
        let plans = match &request.mode {
            SearchMode::Nearby { .. } => plan(request.center, radius_m),
            SearchMode::Text { .. } => vec![SubQueryPlan {
                center: request.center,
                radius_m,
            }],
        };
        SUB_QUERIES_PER_SEARCH.observe(plans.len() as f64);
        debug!(
            sub_queries = plans.len(),
            radius_m = radius_m,
            fan_out = ?self.fan_out,
            "Planned search"
        );

        let results = match self.fan_out {
            FanOut::Concurrent => {
                join_all(plans.iter().map(|p| self.run_sub_query(&request.mode, p))).await
            }
            FanOut::Sequential => {
                let mut results = Vec::with_capacity(plans.len());
                for p in &plans {
                    results.push(self.run_sub_query(&request.mode, p).await);
                }
                results
            }
        };

        let mut records = Vec::new();
        let mut warnings = Vec::new();

        for (index, (sub_query, result)) in plans.iter().zip(results).enumerate() {
            match result {
                Ok(places) => {
                    debug!(index = index, results = places.len(), "Sub-query succeeded");
                    records.extend(places);
                }
                Err(e) => {
                    warn!(
                        index = index,
                        lat = sub_query.center.lat,
                        lng = sub_query.center.lng,
                        error = %e,
                        "Sub-query failed"
                    );
                    warnings.push(SubQueryFailure {
                        index,
                        center: sub_query.center,
                        radius_m: sub_query.radius_m,
                        error: e.to_string(),
                    });
                }
            }
        }

        if warnings.len() == plans.len() {
            SEARCHES.with_label_values(&["all_failed"]).inc();
            warn!(sub_queries = plans.len(), "All sub-queries failed");
            return Err(SearchError::AllUpstreamFailed(warnings));
        }

        let raw_count = records.len();
        let places = merge_by_id(records);
        let duration_ms = start.elapsed().as_millis() as u64;

        let result_label = if warnings.is_empty() { "success" } else { "partial" };
        SEARCHES.with_label_values(&[result_label]).inc();

        info!(
            sub_queries = plans.len(),
            failed = warnings.len(),
            raw_count = raw_count,
            unique = places.len(),
            duration_ms = duration_ms,
            "Search complete"
        );

        Ok(SearchOutcome {
            places,
            plans,
            warnings,
            raw_count,
            duration_ms,
        })
    }

    async fn run_sub_query(
        &self,
        mode: &SearchMode,
        sub_query: &SubQueryPlan,
    ) -> Result<Vec<RawPlace>, ProviderError> {
        let label = mode.label();
        let start = Instant::now();

        let call = async {
            match mode {
                SearchMode::Nearby { included_types } => {
                    self.provider
                        .search_nearby(sub_query.center, sub_query.radius_m, included_types)
                        .await
                }
                SearchMode::Text { query } => {
                    self.provider
                        .search_text(sub_query.center, sub_query.radius_m, query)
                        .await
                }
            }
        };

        let result = match tokio::time::timeout(self.sub_query_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout),
        };

        let outcome = match &result {
            Ok(_) => {
                UPSTREAM_CALL_DURATION
                    .with_label_values(&[label])
                    .observe(start.elapsed().as_secs_f64());
                "success"
            }
            Err(ProviderError::Timeout) => "timeout",
            Err(_) => "error",
        };
        UPSTREAM_CALLS.with_label_values(&[label, outcome]).inc();

        result
    }
}

/// Check a request and return the clamped radius to plan with.
fn validate(request: &SearchRequest) -> Result<f64, SearchError> {
    if !request.center.is_valid() {
        return Err(SearchError::InvalidRequest(format!(
            "center ({}, {}) is not a valid coordinate",
            request.center.lat, request.center.lng
        )));
    }

    if !request.radius_m.is_finite() {
        return Err(SearchError::InvalidRequest(
            "radius must be a finite number of meters".to_string(),
        ));
    }

    match &request.mode {
        SearchMode::Nearby { included_types } if included_types.is_empty() => {
            return Err(SearchError::InvalidRequest(
                "at least one place type is required".to_string(),
            ));
        }
        SearchMode::Text { query } if query.trim().is_empty() => {
            return Err(SearchError::InvalidRequest(
                "text query must not be empty".to_string(),
            ));
        }
        _ => {}
    }

    Ok(clamp_radius(request.radius_m))
}
