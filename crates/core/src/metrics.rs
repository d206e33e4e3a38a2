//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Upstream places calls (counts and latency)
//! - Searches (outcome, fan-out width, places returned)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Upstream Metrics
// =============================================================================

/// Upstream calls total by mode and result.
pub static UPSTREAM_CALLS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("nearby_upstream_calls_total", "Total upstream places calls"),
        &["mode", "result"], // mode: "nearby", "text"; result: "success", "error", "timeout"
    )
    .unwrap()
});

/// Upstream call latency in seconds.
pub static UPSTREAM_CALL_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "nearby_upstream_call_duration_seconds",
            "Duration of successful upstream places calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["mode"],
    )
    .unwrap()
});

// =============================================================================
// Search Metrics
// =============================================================================

/// Searches total by result.
pub static SEARCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("nearby_searches_total", "Total searches"),
        &["result"], // "success", "partial", "invalid_request", "all_failed"
    )
    .unwrap()
});

/// Sub-queries issued per search.
pub static SUB_QUERIES_PER_SEARCH: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "nearby_sub_queries_per_search",
            "Number of upstream sub-queries per search",
        )
        .buckets(vec![1.0, 2.0, 4.0]),
    )
    .unwrap()
});

/// Places returned per recommendation after filtering.
pub static PLACES_RETURNED: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "nearby_places_returned",
            "Number of places returned per recommendation",
        )
        .buckets(vec![0.0, 1.0, 5.0, 10.0, 20.0, 40.0, 80.0]),
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Upstream
        Box::new(UPSTREAM_CALLS.clone()),
        Box::new(UPSTREAM_CALL_DURATION.clone()),
        // Search
        Box::new(SEARCHES.clone()),
        Box::new(SUB_QUERIES_PER_SEARCH.clone()),
        Box::new(PLACES_RETURNED.clone()),
    ]
}
