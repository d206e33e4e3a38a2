//! Result pipeline: normalize raw records, filter and sort them.

mod filter;
mod types;

pub use filter::{normalize, passes_filters, process, sort_places};
pub use types::*;
