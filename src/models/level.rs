//! Address hierarchy levels and the ordered address decomposition.

use serde::Serialize;
use std::collections::BTreeMap;

use super::Feature;

/// One tier of the administrative/street hierarchy.
///
/// Order is significant: it defines both the concatenation order of
/// the address text and the precedence used when filling parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressLevel {
    Admin0,
    Admin1,
    Admin2,
    LocalAdmin,
    Locality,
    Neighborhood,
    Street,
    Housenumber,
}

impl AddressLevel {
    /// All levels, largest first
    pub fn all() -> &'static [AddressLevel] {
        &[
            AddressLevel::Admin0,
            AddressLevel::Admin1,
            AddressLevel::Admin2,
            AddressLevel::LocalAdmin,
            AddressLevel::Locality,
            AddressLevel::Neighborhood,
            AddressLevel::Street,
            AddressLevel::Housenumber,
        ]
    }

    /// Field name used in `parts` and in boundary `addr_level` tags
    pub fn field_name(&self) -> &'static str {
        match self {
            AddressLevel::Admin0 => "admin0",
            AddressLevel::Admin1 => "admin1",
            AddressLevel::Admin2 => "admin2",
            AddressLevel::LocalAdmin => "local_admin",
            AddressLevel::Locality => "locality",
            AddressLevel::Neighborhood => "neighborhood",
            AddressLevel::Street => "street",
            AddressLevel::Housenumber => "housenumber",
        }
    }
}

/// Ordered level→text address decomposition.
///
/// Field declaration order matches [`AddressLevel`] order, so the
/// serialized map and the joined text always come out in level order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AddressParts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin0: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_admin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housenumber: Option<String>,
}

impl AddressParts {
    /// Set the text for a level
    pub fn set(&mut self, level: AddressLevel, value: String) {
        match level {
            AddressLevel::Admin0 => self.admin0 = Some(value),
            AddressLevel::Admin1 => self.admin1 = Some(value),
            AddressLevel::Admin2 => self.admin2 = Some(value),
            AddressLevel::LocalAdmin => self.local_admin = Some(value),
            AddressLevel::Locality => self.locality = Some(value),
            AddressLevel::Neighborhood => self.neighborhood = Some(value),
            AddressLevel::Street => self.street = Some(value),
            AddressLevel::Housenumber => self.housenumber = Some(value),
        }
    }

    /// Get the text for a level
    pub fn get(&self, level: AddressLevel) -> Option<&str> {
        match level {
            AddressLevel::Admin0 => self.admin0.as_deref(),
            AddressLevel::Admin1 => self.admin1.as_deref(),
            AddressLevel::Admin2 => self.admin2.as_deref(),
            AddressLevel::LocalAdmin => self.local_admin.as_deref(),
            AddressLevel::Locality => self.locality.as_deref(),
            AddressLevel::Neighborhood => self.neighborhood.as_deref(),
            AddressLevel::Street => self.street.as_deref(),
            AddressLevel::Housenumber => self.housenumber.as_deref(),
        }
    }

    /// Present values joined with ", " in level order
    pub fn text(&self) -> String {
        AddressLevel::all()
            .iter()
            .filter_map(|level| self.get(*level))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Enclosing boundaries keyed by their declared level.
///
/// Levels below neighbourhood do not occur as boundaries; unrecognized
/// level tags are kept in `other` rather than dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Boundaries {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin0: Option<Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin1: Option<Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin2: Option<Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_admin: Option<Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality: Option<Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<Feature>,

    #[serde(flatten)]
    pub other: BTreeMap<String, Feature>,
}

impl Boundaries {
    /// Insert a boundary under its declared `addr_level` tag.
    /// Features without a tag are ignored.
    pub fn insert(&mut self, feature: Feature) {
        match feature.addr_level.as_deref() {
            Some("admin0") => self.admin0 = Some(feature),
            Some("admin1") => self.admin1 = Some(feature),
            Some("admin2") => self.admin2 = Some(feature),
            Some("local_admin") => self.local_admin = Some(feature),
            Some("locality") => self.locality = Some(feature),
            Some("neighborhood") => self.neighborhood = Some(feature),
            Some(tag) => {
                self.other.insert(tag.to_string(), feature);
            }
            None => {}
        }
    }

    /// Boundary at a hierarchy level, if any
    pub fn get(&self, level: AddressLevel) -> Option<&Feature> {
        match level {
            AddressLevel::Admin0 => self.admin0.as_ref(),
            AddressLevel::Admin1 => self.admin1.as_ref(),
            AddressLevel::Admin2 => self.admin2.as_ref(),
            AddressLevel::LocalAdmin => self.local_admin.as_ref(),
            AddressLevel::Locality => self.locality.as_ref(),
            AddressLevel::Neighborhood => self.neighborhood.as_ref(),
            AddressLevel::Street | AddressLevel::Housenumber => None,
        }
    }

    pub fn locality(&self) -> Option<&Feature> {
        self.locality.as_ref()
    }

    /// Backfill the locality slot from a nearby place point
    pub fn set_locality(&mut self, feature: Feature) {
        self.locality = Some(feature);
    }

    /// Drop geometry from every boundary before it leaves the engine
    pub fn strip_full_geometry(&mut self) {
        for slot in [
            &mut self.admin0,
            &mut self.admin1,
            &mut self.admin2,
            &mut self.local_admin,
            &mut self.locality,
            &mut self.neighborhood,
        ] {
            if let Some(feature) = slot {
                feature.full_geometry = None;
            }
        }
        for feature in self.other.values_mut() {
            feature.full_geometry = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureType, GeoPoint};

    #[test]
    fn test_parts_text_in_level_order() {
        let mut parts = AddressParts::default();
        parts.set(AddressLevel::Street, "Main street".to_string());
        parts.set(AddressLevel::Admin0, "Atlantis".to_string());
        parts.set(AddressLevel::Locality, "Poseidonia".to_string());

        assert_eq!(parts.text(), "Atlantis, Poseidonia, Main street");
    }

    #[test]
    fn test_parts_empty_text() {
        assert_eq!(AddressParts::default().text(), "");
    }

    #[test]
    fn test_boundaries_routed_by_tag() {
        let mut boundaries = Boundaries::default();

        let mut admin0 = Feature::new(
            "b1",
            FeatureType::Boundary,
            GeoPoint { lat: 0.0, lon: 0.0 },
        );
        admin0.addr_level = Some("admin0".to_string());
        boundaries.insert(admin0);

        let mut odd = Feature::new(
            "b2",
            FeatureType::Boundary,
            GeoPoint { lat: 0.0, lon: 0.0 },
        );
        odd.addr_level = Some("admin5".to_string());
        boundaries.insert(odd);

        assert!(boundaries.get(AddressLevel::Admin0).is_some());
        assert!(boundaries.other.contains_key("admin5"));
        assert!(boundaries.locality().is_none());
    }
}
