//! Feature document structure returned by the geo index.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type tag of an indexed feature.
///
/// Closed vocabulary; the wire names follow the gazetteer dump format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    /// Address point
    #[serde(rename = "adrpnt")]
    AddressPoint,
    /// Point of interest
    #[serde(rename = "poipnt")]
    PoiPoint,
    /// Highway (single road)
    #[serde(rename = "hghway")]
    Highway,
    /// Highway network (merged road segments sharing a name)
    #[serde(rename = "hghnet")]
    HighwayNetwork,
    /// Named place point (city, town, hamlet)
    #[serde(rename = "plcpnt")]
    PlacePoint,
    /// Administrative boundary
    #[serde(rename = "admbnd")]
    Boundary,
}

impl FeatureType {
    /// Wire name as stored in the index `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureType::AddressPoint => "adrpnt",
            FeatureType::PoiPoint => "poipnt",
            FeatureType::Highway => "hghway",
            FeatureType::HighwayNetwork => "hghnet",
            FeatureType::PlacePoint => "plcpnt",
            FeatureType::Boundary => "admbnd",
        }
    }
}

impl std::fmt::Display for FeatureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Back-reference to the nearest named place or neighbourhood, written
/// onto features that lack the attribute themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearestRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Pre-built address block stored on the document at import time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// A record representing a real-world object or boundary.
///
/// Admin-hierarchy name attributes are modeled explicitly; anything
/// else the index stores on the document lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    /// Globally unique, stable identifier; the merge key.
    pub id: String,

    #[serde(rename = "type")]
    pub feature_type: FeatureType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub center_point: GeoPoint,

    /// GeoJSON geometry. Stripped from responses unless the caller
    /// asked for it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_geometry: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin0_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin1_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin2_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_admin_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locality_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub housenumber: Option<String>,

    /// Declared level tag on boundary documents ("admin0" … "locality")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr_level: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_place: Option<NearestRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_neighborhood: Option<NearestRef>,

    /// Pre-built address of the feature itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<FeatureAddress>,

    /// Attributes not modeled explicitly.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,

    /// Polygon area computed during containment partitioning.
    /// Not part of the stored document.
    #[serde(skip)]
    pub geometry_area: Option<f64>,
}

impl Feature {
    /// Create a feature with the minimal required fields
    pub fn new(id: impl Into<String>, feature_type: FeatureType, center: GeoPoint) -> Self {
        Self {
            id: id.into(),
            feature_type,
            name: None,
            center_point: center,
            full_geometry: None,
            admin0_name: None,
            admin1_name: None,
            admin2_name: None,
            local_admin_name: None,
            locality_name: None,
            neighborhood_name: None,
            street_name: None,
            housenumber: None,
            addr_level: None,
            nearest_place: None,
            nearest_neighborhood: None,
            address: None,
            extra: serde_json::Map::new(),
            geometry_area: None,
        }
    }

    /// Union attributes from a duplicate record sharing this id.
    ///
    /// First-seen values win on conflict; only missing attributes are
    /// filled from the duplicate.
    pub fn merge_from(&mut self, other: Feature) {
        fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
            if slot.is_none() {
                *slot = value;
            }
        }

        fill(&mut self.name, other.name);
        fill(&mut self.full_geometry, other.full_geometry);
        fill(&mut self.admin0_name, other.admin0_name);
        fill(&mut self.admin1_name, other.admin1_name);
        fill(&mut self.admin2_name, other.admin2_name);
        fill(&mut self.local_admin_name, other.local_admin_name);
        fill(&mut self.locality_name, other.locality_name);
        fill(&mut self.neighborhood_name, other.neighborhood_name);
        fill(&mut self.street_name, other.street_name);
        fill(&mut self.housenumber, other.housenumber);
        fill(&mut self.addr_level, other.addr_level);
        fill(&mut self.nearest_place, other.nearest_place);
        fill(&mut self.nearest_neighborhood, other.nearest_neighborhood);
        fill(&mut self.address, other.address);
        fill(&mut self.geometry_area, other.geometry_area);

        for (key, value) in other.extra {
            self.extra.entry(key).or_insert(value);
        }
    }
}
