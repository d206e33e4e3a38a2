use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Opening state of a place at search time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenNow {
    Open,
    Closed,
    /// Upstream did not say.
    Unknown,
}

impl From<Option<bool>> for OpenNow {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => OpenNow::Open,
            Some(false) => OpenNow::Closed,
            None => OpenNow::Unknown,
        }
    }
}

/// A normalized place, annotated with its distance from the search origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: String,
    pub rating: f64,
    pub rating_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    pub open_now: OpenNow,
    pub address: String,
    pub location: GeoPoint,
    pub distance_km: f64,
}

/// Sort order for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Nearest first.
    #[default]
    Distance,
    /// Highest rating first.
    Rating,
    /// Most reviews first.
    Reviews,
}

/// Presentation filters applied after a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default)]
    pub min_rating: f64,
    #[serde(default = "default_max_price")]
    pub max_price: u8,
    #[serde(default)]
    pub require_open_now: bool,
    #[serde(default)]
    pub sort_by: SortBy,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            min_rating: 0.0,
            max_price: default_max_price(),
            require_open_now: false,
            sort_by: SortBy::default(),
        }
    }
}

fn default_max_price() -> u8 {
    4
}
