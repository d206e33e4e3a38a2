//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides a mock places provider, allowing the search pipeline
//! and the HTTP API to be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use nearby_core::testing::{fixtures, MockProvider};
//!
//! let provider = MockProvider::new();
//! provider.set_results(vec![fixtures::raw_place("abc", 28.61, 77.21)]).await;
//!
//! // Use in a SearchOrchestrator or AppState...
//! ```

mod mock_provider;

pub use mock_provider::{CallKind, MockProvider, RecordedCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::provider::{LatLng, LocalizedText, OpeningHours, RawPlace};

    /// Create a raw place with a location and reasonable defaults.
    pub fn raw_place(id: &str, lat: f64, lng: f64) -> RawPlace {
        RawPlace {
            id: id.to_string(),
            display_name: Some(LocalizedText {
                text: format!("Place {}", id),
                language_code: Some("en".to_string()),
            }),
            formatted_address: Some(format!("{} Test Road", id)),
            location: Some(LatLng {
                latitude: Some(lat),
                longitude: Some(lng),
            }),
            rating: Some(4.0),
            user_rating_count: Some(100),
            price_level: Some(2),
            regular_opening_hours: Some(OpeningHours {
                open_now: Some(true),
            }),
        }
    }

    /// Create a rated place with the given review count.
    pub fn rated_place(id: &str, lat: f64, lng: f64, rating: f64, reviews: u32) -> RawPlace {
        RawPlace {
            rating: Some(rating),
            user_rating_count: Some(reviews),
            ..raw_place(id, lat, lng)
        }
    }

    /// Create a place with only an id and a location.
    pub fn bare_place(id: &str, lat: f64, lng: f64) -> RawPlace {
        RawPlace {
            id: id.to_string(),
            location: Some(LatLng {
                latitude: Some(lat),
                longitude: Some(lng),
            }),
            ..Default::default()
        }
    }

    /// Create a place with the given price level and open state.
    pub fn priced_place(
        id: &str,
        lat: f64,
        lng: f64,
        price_level: Option<u8>,
        open_now: Option<bool>,
    ) -> RawPlace {
        RawPlace {
            price_level,
            regular_opening_hours: open_now.map(|open| OpeningHours {
                open_now: Some(open),
            }),
            ..raw_place(id, lat, lng)
        }
    }
}
