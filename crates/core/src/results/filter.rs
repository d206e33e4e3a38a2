use tracing::debug;

use crate::geo::{distance_km, GeoPoint};
use crate::provider::RawPlace;

use super::{FilterSpec, OpenNow, Place, SortBy};

/// Normalize a raw record. Returns `None` when it has no usable location.
pub fn normalize(raw: RawPlace, origin: GeoPoint) -> Option<Place> {
    let location = raw.point()?;

    let name = raw
        .display_name
        .map(|n| n.text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());
    let rating = raw
        .rating
        .filter(|r| r.is_finite())
        .unwrap_or(0.0)
        .max(0.0);
    let open_now = OpenNow::from(raw.regular_opening_hours.and_then(|h| h.open_now));

    Some(Place {
        id: raw.id,
        name,
        rating,
        rating_count: raw.user_rating_count.unwrap_or(0),
        price_level: raw.price_level,
        open_now,
        address: raw.formatted_address.unwrap_or_default(),
        location,
        distance_km: distance_km(origin, location),
    })
}

/// Whether a place passes every filter in `spec`.
///
/// Unknown opening state and unset price never exclude a place.
pub fn passes_filters(place: &Place, spec: &FilterSpec) -> bool {
    if spec.require_open_now && place.open_now == OpenNow::Closed {
        return false;
    }
    if place.rating < spec.min_rating {
        return false;
    }
    match place.price_level {
        Some(level) => level <= spec.max_price,
        None => true,
    }
}

/// Stable sort by the requested key.
pub fn sort_places(places: &mut [Place], sort_by: SortBy) {
    match sort_by {
        SortBy::Distance => places.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km)),
        SortBy::Rating => places.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortBy::Reviews => places.sort_by(|a, b| b.rating_count.cmp(&a.rating_count)),
    }
}

/// Normalize, filter and sort raw records relative to `origin`.
pub fn process<I>(raw: I, origin: GeoPoint, spec: &FilterSpec) -> Vec<Place>
where
    I: IntoIterator<Item = RawPlace>,
{
    let mut malformed = 0usize;
    let mut places: Vec<Place> = raw
        .into_iter()
        .filter_map(|record| {
            let place = normalize(record, origin);
            if place.is_none() {
                malformed += 1;
            }
            place
        })
        .filter(|place| passes_filters(place, spec))
        .collect();

    if malformed > 0 {
        debug!(dropped = malformed, "Dropped place records without a location");
    }

    sort_places(&mut places, spec.sort_by);
    places
}
