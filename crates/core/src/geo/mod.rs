//! Geographic helpers: haversine distance and small-offset displacement.
//!
//! The offset math uses the flat-earth approximation of roughly 111 km per
//! degree of latitude. It is accurate for displacements of tens of kilometres
//! and degrades near the poles and beyond ~100 km.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Approximate length of one degree of latitude in kilometres.
pub const KM_PER_DEGREE: f64 = 111.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both coordinates are finite and inside their valid ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// One of the four diagonal displacement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quadrant {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Quadrant {
    /// All quadrants in tiling order: (+lat,+lng), (+lat,-lng), (-lat,+lng), (-lat,-lng).
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthEast,
        Quadrant::NorthWest,
        Quadrant::SouthEast,
        Quadrant::SouthWest,
    ];

    /// Sign multipliers `(lat, lng)` for this quadrant.
    fn signs(self) -> (f64, f64) {
        match self {
            Quadrant::NorthEast => (1.0, 1.0),
            Quadrant::NorthWest => (1.0, -1.0),
            Quadrant::SouthEast => (-1.0, 1.0),
            Quadrant::SouthWest => (-1.0, -1.0),
        }
    }
}

/// Great-circle distance between two points in kilometres (haversine).
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Degree offsets `(lat, lng)` that correspond to `distance_km` at `origin`'s latitude.
pub fn degree_offsets(origin: GeoPoint, distance_km: f64) -> (f64, f64) {
    let lat_offset = distance_km / KM_PER_DEGREE;
    let lng_offset = distance_km / (KM_PER_DEGREE * origin.lat.to_radians().cos());
    (lat_offset, lng_offset)
}

/// Displace `origin` by `distance_km` both north/south and east/west.
///
/// Uses a flat-earth approximation, accurate for displacements of a few tens
/// of kilometres away from the poles.
pub fn destination_offset(origin: GeoPoint, quadrant: Quadrant, distance_km: f64) -> GeoPoint {
    let (lat_offset, lng_offset) = degree_offsets(origin, distance_km);
    let (lat_sign, lng_sign) = quadrant.signs();
    GeoPoint {
        lat: origin.lat + lat_sign * lat_offset,
        lng: origin.lng + lng_sign * lng_offset,
    }
}
