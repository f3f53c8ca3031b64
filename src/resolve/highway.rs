//! Nearest highway lookup.

use anyhow::Result;

use crate::index::GeoIndex;
use crate::models::{Feature, FeatureType, GeoPoint};

/// Finds the nearest linear road feature around a point.
pub struct HighwayResolver<'a, I> {
    index: &'a I,
}

impl<'a, I: GeoIndex> HighwayResolver<'a, I> {
    pub fn new(index: &'a I) -> Self {
        Self { index }
    }

    /// First highway or highway-network feature whose shape intersects
    /// a circle of `radius_m` around the point, or `None`.
    pub async fn nearest(&self, point: GeoPoint, radius_m: u32) -> Result<Option<Feature>> {
        let hits = self
            .index
            .intersects_shape(
                &[FeatureType::Highway, FeatureType::HighwayNetwork],
                point,
                radius_m,
                1,
            )
            .await?;

        Ok(hits.into_iter().next())
    }
}
