//! Resolution request and answer types.

use serde::Serialize;

use super::{AddressParts, Boundaries, Feature};

/// Neighbour cap used when the request does not set one
pub const DEFAULT_MAX_NEIGHBOURS: usize = 15;

/// How far the cascade is allowed to fall back when no enclosing
/// object is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LargestLevel {
    /// Enclosing address/POI points only
    Objects,
    /// Objects, then nearby highways
    Highways,
    /// Objects, highways, then enclosing boundaries
    All,
    /// Boundary resolution only (no object or highway search)
    Places,
}

impl LargestLevel {
    /// Lenient parse: an absent or unrecognized value falls back to
    /// the default instead of erroring.
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(|v| v.to_ascii_lowercase()).as_deref() {
            Some("objects") => LargestLevel::Objects,
            Some("all") => LargestLevel::All,
            Some("places") => LargestLevel::Places,
            _ => LargestLevel::Highways,
        }
    }
}

/// Answer detail level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detail {
    Full,
    Short,
}

impl Detail {
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(|v| v.to_ascii_lowercase()).as_deref() {
            Some("short") => Detail::Short,
            _ => Detail::Full,
        }
    }
}

/// Lenient boolean parameter parse: accepts "true"/"false" in any
/// case; anything else, including an absent value, keeps `default`.
pub fn parse_bool_lenient(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(v) if v.eq_ignore_ascii_case("true") => true,
        Some(v) if v.eq_ignore_ascii_case("false") => false,
        _ => default,
    }
}

/// A single inverse-geocoding request
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub lon: f64,
    pub lat: f64,
    /// Neighbour cap, clamped to [0, 100]. 0 disables neighbour
    /// collection entirely.
    pub max_neighbours: usize,
    pub largest_level: LargestLevel,
    /// Attach related objects to the main feature
    pub related: bool,
    /// Keep full geometry on returned features
    pub full_geometry: bool,
    pub detail: Detail,
}

impl ResolveRequest {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            max_neighbours: DEFAULT_MAX_NEIGHBOURS,
            largest_level: LargestLevel::Highways,
            related: false,
            full_geometry: false,
            detail: Detail::Full,
        }
    }

    /// Set the neighbour cap, clamping to the allowed [0, 100] window
    pub fn set_max_neighbours(&mut self, value: i64) {
        self.max_neighbours = value.clamp(0, 100) as usize;
    }
}

/// Objects related to the main feature
#[derive(Debug, Clone, Default, Serialize)]
pub struct RelatedFeatures {
    #[serde(rename = "_same_type", skip_serializing_if = "Option::is_none")]
    pub same_type: Option<Vec<Feature>>,

    #[serde(rename = "_same_building", skip_serializing_if = "Option::is_none")]
    pub same_building: Option<Vec<Feature>>,
}

/// The resolved answer for one point.
///
/// An empty answer (all levels omitted) is a valid, successful result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResolveAnswer {
    /// The chosen main feature, flattened into the answer object
    #[serde(flatten)]
    pub main: Option<Feature>,

    #[serde(rename = "_related", skip_serializing_if = "Option::is_none")]
    pub related: Option<RelatedFeatures>,

    /// Secondary features enclosing the same point
    #[serde(rename = "_enclosed", skip_serializing_if = "Vec::is_empty")]
    pub enclosed: Vec<Feature>,

    /// Nearby features not containing the point, closest first.
    /// `None` when neighbour collection was disabled.
    #[serde(rename = "_neighbours", skip_serializing_if = "Option::is_none")]
    pub neighbours: Option<Vec<Feature>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub highway: Option<Feature>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundaries: Option<Boundaries>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts: Option<AddressParts>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_largest_level_lenient_parse() {
        assert_eq!(
            LargestLevel::parse_lenient(Some("objects")),
            LargestLevel::Objects
        );
        assert_eq!(
            LargestLevel::parse_lenient(Some("PLACES")),
            LargestLevel::Places
        );
        // unknown and absent values default to highways
        assert_eq!(
            LargestLevel::parse_lenient(Some("bogus")),
            LargestLevel::Highways
        );
        assert_eq!(LargestLevel::parse_lenient(None), LargestLevel::Highways);
    }

    #[test]
    fn test_detail_lenient_parse() {
        assert_eq!(Detail::parse_lenient(Some("short")), Detail::Short);
        assert_eq!(Detail::parse_lenient(Some("verbose")), Detail::Full);
        assert_eq!(Detail::parse_lenient(None), Detail::Full);
    }

    #[test]
    fn test_bool_lenient_parse() {
        assert!(parse_bool_lenient(Some("true"), false));
        assert!(parse_bool_lenient(Some("TRUE"), false));
        assert!(!parse_bool_lenient(Some("false"), true));
        // unrecognized and absent values keep the default
        assert!(!parse_bool_lenient(Some("yes"), false));
        assert!(parse_bool_lenient(Some("1"), true));
        assert!(!parse_bool_lenient(None, false));
        assert!(parse_bool_lenient(None, true));
    }

    #[test]
    fn test_max_neighbours_clamped() {
        let mut request = ResolveRequest::new(0.0, 0.0);
        assert_eq!(request.max_neighbours, DEFAULT_MAX_NEIGHBOURS);

        request.set_max_neighbours(500);
        assert_eq!(request.max_neighbours, 100);

        request.set_max_neighbours(-3);
        assert_eq!(request.max_neighbours, 0);
    }
}
