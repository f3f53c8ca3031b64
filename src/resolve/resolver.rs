//! The cascading resolution algorithm.
//!
//! Stages run in order with early returns: enclosed address/POI
//! objects, then nearby highways, then enclosing boundaries. The
//! request's largest level caps how far the cascade may fall back.
//! Boundaries are not attached when an object is found: every indexed
//! object already carries its enclosing hierarchy.

use tracing::debug;

use super::{merge, parts, BoundaryResolver, HighwayResolver};
use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::geometry;
use crate::index::GeoIndex;
use crate::models::{
    Feature, FeatureType, GeoPoint, LargestLevel, ResolveAnswer, ResolveRequest,
};

/// Smallest object query issued even when neighbour collection is
/// disabled; the main feature must still be findable.
const MIN_OBJECT_QUERY_SIZE: usize = 10;

/// Top-level entry point of the resolution engine.
///
/// Holds a read-only index handle; every call is independent and
/// stateless.
pub struct GeoResolver<I> {
    index: I,
    config: ResolverConfig,
}

impl<I: GeoIndex> GeoResolver<I> {
    pub fn new(index: I, config: ResolverConfig) -> Self {
        Self { index, config }
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a point through the cascade.
    ///
    /// Deterministic and read-only; an answer with every level omitted
    /// is a valid result.
    pub async fn resolve(&self, request: &ResolveRequest) -> Result<ResolveAnswer, ResolveError> {
        let point = validate_point(request.lon, request.lat)?;

        if request.largest_level == LargestLevel::Places {
            // Place resolution skips the object search and reports an
            // empty neighbour list.
            return self
                .boundaries_answer(point, request.full_geometry, Some(Vec::new()))
                .await;
        }

        let (contained, neighbours) = self.enclosed_features(point, request).await?;

        let mut contained = merge::merge_by_id(contained);
        merge::sort_by_area(&mut contained);
        debug!(
            "cascade at ({}, {}): {} contained features",
            point.lon,
            point.lat,
            contained.len()
        );

        if !contained.is_empty() {
            // Smallest contained shape is the most specific answer: a
            // building ranks above the property that owns it.
            let main = contained.remove(0);
            return self.main_answer(main, contained, neighbours, request).await;
        }

        if request.largest_level == LargestLevel::Objects {
            return Ok(ResolveAnswer {
                neighbours,
                ..Default::default()
            });
        }

        let highway = HighwayResolver::new(&self.index)
            .nearest(point, self.config.highway_radius_m)
            .await?;

        if let Some(mut highway) = highway {
            let parts = parts::from_highway(&highway);
            if !request.full_geometry {
                highway.full_geometry = None;
            }
            return Ok(ResolveAnswer {
                highway: Some(highway),
                text: Some(parts.text()),
                parts: Some(parts),
                neighbours,
                ..Default::default()
            });
        }

        if request.largest_level == LargestLevel::Highways {
            return Ok(ResolveAnswer {
                neighbours,
                ..Default::default()
            });
        }

        self.boundaries_answer(point, request.full_geometry, neighbours)
            .await
    }

    /// Query nearby objects and partition them into features enclosing
    /// the point (tagged with their computed area) and plain
    /// neighbours, which the index already sorted by distance.
    async fn enclosed_features(
        &self,
        point: GeoPoint,
        request: &ResolveRequest,
    ) -> Result<(Vec<Feature>, Option<Vec<Feature>>), ResolveError> {
        let limit = if request.max_neighbours == 0 {
            MIN_OBJECT_QUERY_SIZE
        } else {
            request.max_neighbours
        };

        let hits = self
            .index
            .nearest_by_distance(
                &[FeatureType::AddressPoint, FeatureType::PoiPoint],
                point,
                self.config.object_radius_m,
                limit,
            )
            .await?;

        let mut contained = Vec::new();
        let mut neighbours = (request.max_neighbours > 0).then(Vec::new);

        for mut feature in hits {
            let geometry = feature.full_geometry.as_ref().and_then(geometry::parse_geometry);
            match geometry {
                Some(ref geom) if geometry::contains_point(geom, point.lon, point.lat) => {
                    // keep the area so the merged set can be ranked
                    feature.geometry_area = Some(geometry::area(geom));
                    contained.push(feature);
                }
                _ => {
                    if let Some(neighbours) = neighbours.as_mut() {
                        neighbours.push(feature);
                    }
                }
            }
        }

        Ok((contained, neighbours))
    }

    async fn main_answer(
        &self,
        mut main: Feature,
        mut enclosed: Vec<Feature>,
        mut neighbours: Option<Vec<Feature>>,
        request: &ResolveRequest,
    ) -> Result<ResolveAnswer, ResolveError> {
        if !request.full_geometry {
            main.full_geometry = None;
            for feature in &mut enclosed {
                feature.full_geometry = None;
            }
            if let Some(neighbours) = neighbours.as_mut() {
                for feature in neighbours {
                    feature.full_geometry = None;
                }
            }
        }

        let related = if request.related {
            self.index.related(&main).await?
        } else {
            None
        };

        Ok(ResolveAnswer {
            main: Some(main),
            related,
            enclosed,
            neighbours,
            ..Default::default()
        })
    }

    async fn boundaries_answer(
        &self,
        point: GeoPoint,
        full_geometry: bool,
        neighbours: Option<Vec<Feature>>,
    ) -> Result<ResolveAnswer, ResolveError> {
        let mut levels = BoundaryResolver::new(&self.index, self.config.locality_radius_m)
            .levels(point)
            .await?;

        let parts = parts::from_boundaries(&levels);
        if !full_geometry {
            levels.strip_full_geometry();
        }

        Ok(ResolveAnswer {
            boundaries: Some(levels),
            text: Some(parts.text()),
            parts: Some(parts),
            neighbours,
            ..Default::default()
        })
    }
}

fn validate_point(lon: f64, lat: f64) -> Result<GeoPoint, ResolveError> {
    if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
        return Err(ResolveError::InvalidInput(format!(
            "longitude out of range: {lon}"
        )));
    }
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(ResolveError::InvalidInput(format!(
            "latitude out of range: {lat}"
        )));
    }
    Ok(GeoPoint { lat, lon })
}
