//! Place search fan-out.
//!
//! This module provides the `SearchOrchestrator`, which turns a search request
//! into one or more upstream calls, tolerates partial failures and merges the
//! results by place id.

mod dedup;
mod orchestrator;
mod types;

pub use dedup::merge_by_id;
pub use orchestrator::{SearchOrchestrator, DEFAULT_SUB_QUERY_TIMEOUT};
pub use types::*;
