//! Google Places API (New) backend.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PlacesConfig;
use crate::geo::GeoPoint;

use super::{PlacesProvider, ProviderError, RawPlace};

/// Fields requested from the Places API for every search.
pub const FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress,places.location,places.rating,places.userRatingCount,places.priceLevel,places.regularOpeningHours";

/// Places API (New) client.
pub struct GooglePlacesProvider {
    client: Client,
    base_url: String,
    api_key: String,
    max_result_count: u32,
}

impl GooglePlacesProvider {
    /// Create a new provider. Fails if no API key is configured.
    pub fn new(config: PlacesConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Places API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| ProviderError::NotConfigured(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            max_result_count: config.max_result_count,
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/v1/places:{}", self.base_url, method)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<Vec<RawPlace>, ProviderError> {
        let url = self.endpoint(method);
        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: upstream_error_message(&body),
            });
        }

        let parsed: PlacesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))?;

        let places = parsed.into_places();

        debug!(
            method = method,
            results = places.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Places API call complete"
        );

        Ok(places)
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesProvider {
    fn name(&self) -> &str {
        "google_places"
    }

    async fn search_nearby(
        &self,
        center: GeoPoint,
        radius_m: f64,
        included_types: &[String],
    ) -> Result<Vec<RawPlace>, ProviderError> {
        let body = NearbyRequest {
            included_types,
            max_result_count: self.max_result_count,
            location_restriction: LocationArea::circle(center, radius_m),
        };
        self.post("searchNearby", &body).await
    }

    async fn search_text(
        &self,
        center: GeoPoint,
        radius_m: f64,
        text_query: &str,
    ) -> Result<Vec<RawPlace>, ProviderError> {
        let body = TextRequest {
            text_query,
            max_result_count: self.max_result_count,
            location_bias: LocationArea::circle(center, radius_m),
        };
        self.post("searchText", &body).await
    }
}

fn map_transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::ConnectionFailed(e.to_string())
    }
}

/// Pull `error.message` out of an error body, falling back to a truncated body.
fn upstream_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|e| e.error.message)
        .unwrap_or_else(|| body.chars().take(200).collect())
}

// Places API request/response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NearbyRequest<'a> {
    included_types: &'a [String],
    max_result_count: u32,
    location_restriction: LocationArea,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TextRequest<'a> {
    text_query: &'a str,
    max_result_count: u32,
    location_bias: LocationArea,
}

#[derive(Debug, Serialize)]
struct LocationArea {
    circle: Circle,
}

impl LocationArea {
    fn circle(center: GeoPoint, radius: f64) -> Self {
        Self {
            circle: Circle {
                center: WireLatLng {
                    latitude: center.lat,
                    longitude: center.lng,
                },
                radius,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Circle {
    center: WireLatLng,
    radius: f64,
}

#[derive(Debug, Serialize)]
struct WireLatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    #[serde(default)]
    places: Vec<serde_json::Value>,
}

impl PlacesResponse {
    /// Decode records one at a time; a record that does not fit is dropped.
    fn into_places(self) -> Vec<RawPlace> {
        let total = self.places.len();
        let places: Vec<RawPlace> = self
            .places
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect();

        if places.len() < total {
            debug!(
                dropped = total - places.len(),
                "Dropped malformed place records"
            );
        }
        places
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
