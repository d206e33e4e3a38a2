//! Types for the upstream places provider.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::geo::GeoPoint;

/// A place record as returned by the upstream provider.
///
/// Every field except `id` is optional; absent fields mean "unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPlace {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<LocalizedText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LatLng>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating_count: Option<u32>,
    #[serde(
        default,
        deserialize_with = "deserialize_price_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_opening_hours: Option<OpeningHours>,
}

impl RawPlace {
    /// Usable location, if both coordinates are present and finite.
    pub fn point(&self) -> Option<GeoPoint> {
        let loc = self.location.as_ref()?;
        let lat = loc.latitude?;
        let lng = loc.longitude?;
        (lat.is_finite() && lng.is_finite()).then(|| GeoPoint::new(lat, lng))
    }

    /// Opening state reported upstream, `None` when unknown.
    pub fn open_now(&self) -> Option<bool> {
        self.regular_opening_hours.as_ref().and_then(|h| h.open_now)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHours {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
}

/// Accept both the Places API (New) enum strings and plain integers.
fn deserialize_price_level<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PriceLevel {
        Level(i64),
        Name(String),
    }

    let level = match Option::<PriceLevel>::deserialize(deserializer)? {
        None => None,
        Some(PriceLevel::Level(n)) => u8::try_from(n).ok().filter(|n| *n <= 4),
        Some(PriceLevel::Name(name)) => price_level_from_name(&name),
    };
    Ok(level)
}

/// Map a Places API price level name to 0-4.
pub fn price_level_from_name(name: &str) -> Option<u8> {
    match name {
        "PRICE_LEVEL_FREE" => Some(0),
        "PRICE_LEVEL_INEXPENSIVE" => Some(1),
        "PRICE_LEVEL_MODERATE" => Some(2),
        "PRICE_LEVEL_EXPENSIVE" => Some(3),
        "PRICE_LEVEL_VERY_EXPENSIVE" => Some(4),
        _ => None,
    }
}

/// Errors from a single upstream call.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Places provider connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Places API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse places response: {0}")]
    Parse(String),

    #[error("Places request timed out")]
    Timeout,

    #[error("Places provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for upstream places backends.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Places of the given types inside a circle.
    async fn search_nearby(
        &self,
        center: GeoPoint,
        radius_m: f64,
        included_types: &[String],
    ) -> Result<Vec<RawPlace>, ProviderError>;

    /// Free-text search, biased towards (not restricted to) a circle.
    async fn search_text(
        &self,
        center: GeoPoint,
        radius_m: f64,
        text_query: &str,
    ) -> Result<Vec<RawPlace>, ProviderError>;
}
