//! Merging and ordering of candidate features.

use crate::models::Feature;

/// Collapse duplicate hits sharing an id into one record each.
///
/// The same real-world object can come back more than once when type
/// filters overlap. First appearance keeps its slot and wins attribute
/// conflicts; attributes missing on it are filled from later
/// duplicates, so nothing is lost.
pub fn merge_by_id(features: Vec<Feature>) -> Vec<Feature> {
    let mut merged: Vec<Feature> = Vec::with_capacity(features.len());

    for feature in features {
        match merged.iter_mut().find(|f| f.id == feature.id) {
            Some(existing) => existing.merge_from(feature),
            None => merged.push(feature),
        }
    }

    merged
}

/// Stable ascending sort on the previously computed polygon area.
///
/// A feature without an area sorts before every feature with one, so
/// an exact containment hit is never masked by an unknown area.
pub fn sort_by_area(features: &mut [Feature]) {
    features.sort_by(|a, b| {
        let a = a.geometry_area.unwrap_or(f64::NEG_INFINITY);
        let b = b.geometry_area.unwrap_or(f64::NEG_INFINITY);
        a.partial_cmp(&b).unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureType, GeoPoint};

    fn feature(id: &str) -> Feature {
        Feature::new(
            id,
            FeatureType::AddressPoint,
            GeoPoint { lat: 0.0, lon: 0.0 },
        )
    }

    #[test]
    fn test_merge_unions_attributes() {
        let mut a = feature("f1");
        a.housenumber = Some("15".to_string());
        a.street_name = Some("Main".to_string());

        let mut b = feature("f1");
        b.street_name = Some("Other".to_string());
        b.locality_name = Some("Springfield".to_string());

        let merged = merge_by_id(vec![a, b]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].housenumber.as_deref(), Some("15"));
        // first-seen value wins the conflict
        assert_eq!(merged[0].street_name.as_deref(), Some("Main"));
        // missing attribute filled from the duplicate
        assert_eq!(merged[0].locality_name.as_deref(), Some("Springfield"));
    }

    #[test]
    fn test_merge_preserves_first_seen_order() {
        let merged = merge_by_id(vec![feature("b"), feature("a"), feature("b")]);
        let ids: Vec<&str> = merged.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_sort_by_area_ascending() {
        let mut big = feature("big");
        big.geometry_area = Some(100.0);
        let mut small = feature("small");
        small.geometry_area = Some(1.0);

        let mut features = vec![big, small];
        sort_by_area(&mut features);

        assert_eq!(features[0].id, "small");
        assert_eq!(features[1].id, "big");
    }

    #[test]
    fn test_unknown_area_sorts_first() {
        let mut known = feature("known");
        known.geometry_area = Some(0.5);
        let unknown = feature("unknown");

        let mut features = vec![known, unknown];
        sort_by_area(&mut features);

        assert_eq!(features[0].id, "unknown");
    }

    #[test]
    fn test_sort_is_stable() {
        let mut a = feature("a");
        a.geometry_area = Some(2.0);
        let mut b = feature("b");
        b.geometry_area = Some(2.0);

        let mut features = vec![a, b];
        sort_by_area(&mut features);

        assert_eq!(features[0].id, "a");
        assert_eq!(features[1].id, "b");
    }
}
