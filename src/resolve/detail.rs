//! Full/short answer projection.

use serde::Serialize;

use crate::models::{Detail, Feature, FeatureType, GeoPoint, ResolveAnswer};

/// A feature reduced to its identifying fields plus address text.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShortFeature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<FeatureType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_point: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ShortFeature {
    pub fn from_feature(feature: &Feature) -> Self {
        Self {
            id: Some(feature.id.clone()),
            feature_type: Some(feature.feature_type),
            name: feature.name.clone(),
            center_point: Some(feature.center_point),
            address: feature.address.as_ref().and_then(|a| a.text.clone()),
        }
    }
}

/// Related objects in short form
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShortRelated {
    #[serde(rename = "_same_type", skip_serializing_if = "Option::is_none")]
    pub same_type: Option<Vec<ShortFeature>>,

    #[serde(rename = "_same_building", skip_serializing_if = "Option::is_none")]
    pub same_building: Option<Vec<ShortFeature>>,
}

/// SHORT projection of an answer: the main feature reduced to
/// [`ShortFeature`] fields, with related objects and neighbours
/// reduced the same way. Boundary and highway detail is dropped.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShortAnswer {
    #[serde(flatten)]
    pub feature: ShortFeature,

    #[serde(rename = "_related", skip_serializing_if = "Option::is_none")]
    pub related: Option<ShortRelated>,

    #[serde(rename = "_neighbours", skip_serializing_if = "Option::is_none")]
    pub neighbours: Option<Vec<ShortFeature>>,
}

/// An answer shaped for the requested detail level
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Projected {
    Full(ResolveAnswer),
    Short(ShortAnswer),
}

/// Project an answer into the requested detail level. FULL passes the
/// answer through unchanged; SHORT is a pure, order-preserving
/// reduction.
pub fn project(answer: ResolveAnswer, detail: Detail) -> Projected {
    match detail {
        Detail::Full => Projected::Full(answer),
        Detail::Short => Projected::Short(shorten(answer)),
    }
}

fn shorten(answer: ResolveAnswer) -> ShortAnswer {
    let feature = answer
        .main
        .as_ref()
        .map(ShortFeature::from_feature)
        .unwrap_or_default();

    let related = answer.related.map(|related| ShortRelated {
        same_type: related
            .same_type
            .map(|v| v.iter().map(ShortFeature::from_feature).collect()),
        same_building: related
            .same_building
            .map(|v| v.iter().map(ShortFeature::from_feature).collect()),
    });

    let neighbours = answer
        .neighbours
        .map(|v| v.iter().map(ShortFeature::from_feature).collect());

    ShortAnswer {
        feature,
        related,
        neighbours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureAddress, RelatedFeatures};

    fn feature(id: &str) -> Feature {
        let mut feature = Feature::new(
            id,
            FeatureType::PoiPoint,
            GeoPoint { lat: 1.0, lon: 2.0 },
        );
        feature.name = Some(format!("name-{id}"));
        feature.address = Some(FeatureAddress {
            text: Some(format!("addr-{id}")),
            extra: serde_json::Map::new(),
        });
        feature
    }

    #[test]
    fn test_short_keeps_only_identifying_fields() {
        let mut main = feature("f1");
        main.housenumber = Some("15".to_string());
        main.full_geometry = Some(serde_json::json!({"type": "Point", "coordinates": [0, 0]}));

        let answer = ResolveAnswer {
            main: Some(main),
            ..Default::default()
        };

        let Projected::Short(short) = project(answer, Detail::Short) else {
            panic!("expected short projection");
        };

        let value = serde_json::to_value(&short).unwrap();
        assert_eq!(value["id"], "f1");
        assert_eq!(value["type"], "poipnt");
        assert_eq!(value["address"], "addr-f1");
        assert!(value.get("housenumber").is_none());
        assert!(value.get("full_geometry").is_none());
    }

    #[test]
    fn test_short_preserves_neighbour_order() {
        let answer = ResolveAnswer {
            neighbours: Some(vec![feature("n1"), feature("n2"), feature("n3")]),
            ..Default::default()
        };

        let Projected::Short(short) = project(answer, Detail::Short) else {
            panic!("expected short projection");
        };

        let ids: Vec<_> = short
            .neighbours
            .unwrap()
            .into_iter()
            .map(|f| f.id.unwrap())
            .collect();
        assert_eq!(ids, vec!["n1", "n2", "n3"]);
    }

    #[test]
    fn test_short_reduces_related() {
        let answer = ResolveAnswer {
            main: Some(feature("f1")),
            related: Some(RelatedFeatures {
                same_type: Some(vec![feature("t1")]),
                same_building: None,
            }),
            ..Default::default()
        };

        let Projected::Short(short) = project(answer, Detail::Short) else {
            panic!("expected short projection");
        };

        let related = short.related.unwrap();
        assert_eq!(related.same_type.unwrap().len(), 1);
        assert!(related.same_building.is_none());
    }

    #[test]
    fn test_short_is_idempotent() {
        // A feature already carrying only short fields projects to the
        // same data again.
        let short = ShortFeature::from_feature(&feature("f1"));

        let mut already_short = Feature::new("f1", FeatureType::PoiPoint, GeoPoint {
            lat: 1.0,
            lon: 2.0,
        });
        already_short.name = short.name.clone();
        already_short.address = Some(FeatureAddress {
            text: short.address.clone(),
            extra: serde_json::Map::new(),
        });

        assert_eq!(ShortFeature::from_feature(&already_short), short);
    }

    #[test]
    fn test_short_of_boundary_answer_is_bare() {
        let answer = ResolveAnswer {
            boundaries: Some(Default::default()),
            parts: Some(Default::default()),
            text: Some("Freedonia".to_string()),
            neighbours: Some(vec![]),
            ..Default::default()
        };

        let Projected::Short(short) = project(answer, Detail::Short) else {
            panic!("expected short projection");
        };

        let value = serde_json::to_value(&short).unwrap();
        assert!(value.get("boundaries").is_none());
        assert!(value.get("text").is_none());
        assert!(value.get("id").is_none());
        assert_eq!(value["_neighbours"], serde_json::json!([]));
    }
}
