//! Geo index access: the query contract and its Elasticsearch
//! implementation.

mod es;

pub use es::EsGeoIndex;

use anyhow::Result;

use crate::models::{Feature, FeatureType, GeoPoint, RelatedFeatures};

/// Read-only contract the resolver requires from the feature index.
///
/// Passed into the resolver explicitly so tests can substitute an
/// in-memory double. Implementations must return `nearest_by_distance`
/// hits sorted ascending by distance from the query point.
#[allow(async_fn_in_trait)]
pub trait GeoIndex {
    /// Features of the given types whose stored shape contains the point.
    /// An empty type list means no type filter.
    async fn contains_point(&self, types: &[FeatureType], point: GeoPoint)
        -> Result<Vec<Feature>>;

    /// Up to `limit` features within `max_radius_m` of the point,
    /// closest first.
    async fn nearest_by_distance(
        &self,
        types: &[FeatureType],
        point: GeoPoint,
        max_radius_m: u32,
        limit: usize,
    ) -> Result<Vec<Feature>>;

    /// Up to `limit` features whose shape intersects a circle of
    /// `radius_m` around the point.
    async fn intersects_shape(
        &self,
        types: &[FeatureType],
        point: GeoPoint,
        radius_m: u32,
        limit: usize,
    ) -> Result<Vec<Feature>>;

    /// Objects related to the given feature (same building, same
    /// type nearby). The default implementation finds nothing.
    async fn related(&self, _feature: &Feature) -> Result<Option<RelatedFeatures>> {
        Ok(None)
    }
}
