//! Upstream places provider abstraction.
//!
//! This module provides a `PlacesProvider` trait for nearby and text searches
//! against a places backend, and the Google Places (New) implementation.

mod google;
mod types;

pub use google::{GooglePlacesProvider, FIELD_MASK};
pub use types::*;
