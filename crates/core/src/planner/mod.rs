//! Search area planning.
//!
//! A single upstream query is capped at a fixed number of results, so large
//! search radii are split into four overlapping quadrant tiles. The radii and
//! threshold are fixed policy constants.

use serde::{Deserialize, Serialize};

use crate::geo::{destination_offset, GeoPoint, Quadrant};

/// Radii up to this value are served by one upstream query.
pub const SINGLE_QUERY_THRESHOLD_M: f64 = 4000.0;

/// Radius of each tile when the area is split.
pub const TILE_RADIUS_M: f64 = 3000.0;

/// Smallest accepted search radius.
pub const MIN_RADIUS_M: f64 = 500.0;

/// Largest accepted search radius.
pub const MAX_RADIUS_M: f64 = 50_000.0;

/// Radius used when a nearby request does not specify one.
pub const DEFAULT_RADIUS_M: f64 = 4000.0;

/// Radius used when a text search does not specify one.
pub const DEFAULT_TEXT_RADIUS_M: f64 = 5000.0;

/// One upstream query: where to center it and how far to reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubQueryPlan {
    pub center: GeoPoint,
    pub radius_m: f64,
}

/// Clamp a requested radius into the accepted range.
pub fn clamp_radius(radius_m: f64) -> f64 {
    radius_m.clamp(MIN_RADIUS_M, MAX_RADIUS_M)
}

/// Plan the upstream queries needed to cover `radius_m` around `center`.
///
/// Returns one plan for small radii and four quadrant tiles otherwise. Tile
/// centers sit `radius_m / 2` away from `center` along both axes.
pub fn plan(center: GeoPoint, radius_m: f64) -> Vec<SubQueryPlan> {
    if radius_m <= SINGLE_QUERY_THRESHOLD_M {
        return vec![SubQueryPlan { center, radius_m }];
    }

    let step_km = (radius_m / 2.0) / 1000.0;

    Quadrant::ALL
        .iter()
        .map(|&quadrant| SubQueryPlan {
            center: destination_offset(center, quadrant, step_km),
            radius_m: TILE_RADIUS_M,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELHI: GeoPoint = GeoPoint {
        lat: 28.6139,
        lng: 77.209,
    };

    #[test]
    fn test_small_radius_single_plan() {
        let plans = plan(DELHI, 3000.0);
        assert_eq!(
            plans,
            vec![SubQueryPlan {
                center: DELHI,
                radius_m: 3000.0
            }]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        for radius in [500.0, 1000.0, 2500.0, 3999.9, 4000.0] {
            let plans = plan(DELHI, radius);
            assert_eq!(plans.len(), 1, "radius {}", radius);
            assert_eq!(plans[0].center, DELHI);
            assert_eq!(plans[0].radius_m, radius);
        }
    }

    #[test]
    fn test_large_radius_four_tiles() {
        for radius in [4000.1, 5000.0, 10_000.0, 20_000.0, 50_000.0] {
            let plans = plan(DELHI, radius);
            assert_eq!(plans.len(), 4, "radius {}", radius);
            assert!(plans.iter().all(|p| p.radius_m == TILE_RADIUS_M));
        }
    }

    #[test]
    fn test_tiles_are_symmetric_around_center() {
        let plans = plan(DELHI, 20_000.0);
        let mean_lat = plans.iter().map(|p| p.center.lat).sum::<f64>() / 4.0;
        let mean_lng = plans.iter().map(|p| p.center.lng).sum::<f64>() / 4.0;
        assert!((mean_lat - DELHI.lat).abs() < 1e-9);
        assert!((mean_lng - DELHI.lng).abs() < 1e-9);
    }

    #[test]
    fn test_ten_km_offsets() {
        let plans = plan(DELHI, 10_000.0);
        let lat_offset = 5.0 / 111.0;
        let lng_offset = 5.0 / (111.0 * 28.6139_f64.to_radians().cos());

        let expected = [
            (DELHI.lat + lat_offset, DELHI.lng + lng_offset),
            (DELHI.lat + lat_offset, DELHI.lng - lng_offset),
            (DELHI.lat - lat_offset, DELHI.lng + lng_offset),
            (DELHI.lat - lat_offset, DELHI.lng - lng_offset),
        ];

        for (p, (lat, lng)) in plans.iter().zip(expected) {
            assert!((p.center.lat - lat).abs() < 1e-12);
            assert!((p.center.lng - lng).abs() < 1e-12);
            assert_eq!(p.radius_m, 3000.0);
        }
        assert!((lat_offset - 0.045).abs() < 0.001);
    }

    #[test]
    fn test_clamp_radius() {
        assert_eq!(clamp_radius(100.0), MIN_RADIUS_M);
        assert_eq!(clamp_radius(-5.0), MIN_RADIUS_M);
        assert_eq!(clamp_radius(3000.0), 3000.0);
        assert_eq!(clamp_radius(80_000.0), MAX_RADIUS_M);
        assert_eq!(clamp_radius(MIN_RADIUS_M), MIN_RADIUS_M);
        assert_eq!(clamp_radius(MAX_RADIUS_M), MAX_RADIUS_M);
    }
}
