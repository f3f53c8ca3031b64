//! Ordered address decomposition from a highway or a boundary stack.

use crate::models::{AddressLevel, AddressParts, Boundaries, Feature};

/// Build parts from a highway's denormalized admin attributes.
///
/// For each level in order: the named attribute when present, then the
/// nearest-place / nearest-neighborhood back-reference, otherwise the
/// level is omitted entirely.
pub fn from_highway(highway: &Feature) -> AddressParts {
    let mut parts = AddressParts::default();

    for level in AddressLevel::all() {
        if let Some(value) = level_value(highway, *level) {
            parts.set(*level, value);
        }
    }

    parts
}

/// Build parts from resolved boundary names.
pub fn from_boundaries(levels: &Boundaries) -> AddressParts {
    let mut parts = AddressParts::default();

    for level in AddressLevel::all() {
        if let Some(name) = levels.get(*level).and_then(|b| b.name.clone()) {
            parts.set(*level, name);
        }
    }

    parts
}

fn level_value(feature: &Feature, level: AddressLevel) -> Option<String> {
    match level {
        AddressLevel::Admin0 => feature.admin0_name.clone(),
        AddressLevel::Admin1 => feature.admin1_name.clone(),
        AddressLevel::Admin2 => feature.admin2_name.clone(),
        AddressLevel::LocalAdmin => feature.local_admin_name.clone(),
        AddressLevel::Locality => feature.locality_name.clone().or_else(|| {
            feature
                .nearest_place
                .as_ref()
                .and_then(|place| place.name.clone())
        }),
        AddressLevel::Neighborhood => feature.neighborhood_name.clone().or_else(|| {
            feature
                .nearest_neighborhood
                .as_ref()
                .and_then(|hood| hood.name.clone())
        }),
        AddressLevel::Street => feature.street_name.clone(),
        AddressLevel::Housenumber => feature.housenumber.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureType, GeoPoint, NearestRef};

    fn highway() -> Feature {
        let mut feature = Feature::new(
            "hghway-1",
            FeatureType::Highway,
            GeoPoint { lat: 0.0, lon: 0.0 },
        );
        feature.admin0_name = Some("Freedonia".to_string());
        feature.street_name = Some("Sylvania road".to_string());
        feature
    }

    #[test]
    fn test_from_highway_omits_missing_levels() {
        let parts = from_highway(&highway());

        assert_eq!(parts.admin0.as_deref(), Some("Freedonia"));
        assert!(parts.admin1.is_none());
        assert!(parts.locality.is_none());
        assert_eq!(parts.text(), "Freedonia, Sylvania road");
    }

    #[test]
    fn test_from_highway_nearest_place_fallback() {
        let mut feature = highway();
        feature.nearest_place = Some(NearestRef {
            id: Some("plcpnt-7".to_string()),
            name: Some("Duck Soup".to_string()),
        });

        let parts = from_highway(&feature);
        assert_eq!(parts.locality.as_deref(), Some("Duck Soup"));
    }

    #[test]
    fn test_named_attribute_beats_nearest_reference() {
        let mut feature = highway();
        feature.locality_name = Some("Named".to_string());
        feature.nearest_place = Some(NearestRef {
            id: None,
            name: Some("Fallback".to_string()),
        });

        let parts = from_highway(&feature);
        assert_eq!(parts.locality.as_deref(), Some("Named"));
    }

    #[test]
    fn test_from_boundaries() {
        let mut boundaries = Boundaries::default();

        let mut admin0 = Feature::new(
            "b1",
            FeatureType::Boundary,
            GeoPoint { lat: 0.0, lon: 0.0 },
        );
        admin0.addr_level = Some("admin0".to_string());
        admin0.name = Some("Freedonia".to_string());
        boundaries.insert(admin0);

        let mut locality = Feature::new(
            "b2",
            FeatureType::Boundary,
            GeoPoint { lat: 0.0, lon: 0.0 },
        );
        locality.addr_level = Some("locality".to_string());
        locality.name = Some("Fredville".to_string());
        boundaries.insert(locality);

        let parts = from_boundaries(&boundaries);
        assert_eq!(parts.text(), "Freedonia, Fredville");
    }
}
