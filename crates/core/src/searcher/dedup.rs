//! Deduplication of raw place records by upstream id.

use std::collections::BTreeMap;

use tracing::debug;

use crate::provider::RawPlace;

/// Merge records from every sub-query into one record per id.
///
/// When an id repeats, the later record replaces the earlier one. Records with
/// an empty id cannot be keyed and are dropped. The result is ordered by id.
pub fn merge_by_id<I>(records: I) -> Vec<RawPlace>
where
    I: IntoIterator<Item = RawPlace>,
{
    let mut by_id: BTreeMap<String, RawPlace> = BTreeMap::new();
    let mut dropped = 0usize;

    for record in records {
        if record.id.is_empty() {
            dropped += 1;
            continue;
        }
        by_id.insert(record.id.clone(), record);
    }

    if dropped > 0 {
        debug!(dropped = dropped, "Dropped place records without an id");
    }

    by_id.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::LatLng;
    use std::collections::HashSet;

    fn make_raw(id: &str, rating: f64) -> RawPlace {
        RawPlace {
            id: id.to_string(),
            rating: Some(rating),
            location: Some(LatLng {
                latitude: Some(28.6),
                longitude: Some(77.2),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_single_record() {
        let merged = merge_by_id(vec![make_raw("a", 4.0)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "a");
    }

    #[test]
    fn test_duplicate_id_collapses_to_one() {
        // Same place seen by two tiles, with a stale rating in one of them.
        let merged = merge_by_id(vec![make_raw("X123", 4.1), make_raw("X123", 4.3)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "X123");
    }

    #[test]
    fn test_last_write_wins() {
        let merged = merge_by_id(vec![
            make_raw("a", 1.0),
            make_raw("b", 2.0),
            make_raw("a", 3.0),
        ]);
        assert_eq!(merged.len(), 2);
        let a = merged.iter().find(|p| p.id == "a").unwrap();
        assert_eq!(a.rating, Some(3.0));
    }

    #[test]
    fn test_never_more_than_distinct_ids() {
        let ids = ["a", "b", "a", "c", "b", "a", "d", "c"];
        let records: Vec<_> = ids.iter().map(|id| make_raw(id, 4.0)).collect();
        let distinct: HashSet<_> = ids.iter().collect();

        let merged = merge_by_id(records.clone());
        assert_eq!(merged.len(), distinct.len());

        // Merging the merged output again changes nothing.
        let again = merge_by_id(merged.clone());
        assert_eq!(again, merged);
    }

    #[test]
    fn test_order_independent_membership() {
        let forward = merge_by_id(vec![make_raw("a", 1.0), make_raw("b", 1.0), make_raw("c", 1.0)]);
        let backward = merge_by_id(vec![make_raw("c", 1.0), make_raw("b", 1.0), make_raw("a", 1.0)]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_empty_id_dropped() {
        let merged = merge_by_id(vec![make_raw("", 4.0), make_raw("a", 4.0), make_raw("", 3.0)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "a");
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_by_id(Vec::new()).is_empty());
    }
}
