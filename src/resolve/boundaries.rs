//! Enclosing administrative boundary resolution.

use anyhow::Result;
use tracing::debug;

use crate::index::GeoIndex;
use crate::models::{Boundaries, FeatureType, GeoPoint};

/// Resolves the stack of boundaries enclosing a point.
pub struct BoundaryResolver<'a, I> {
    index: &'a I,
    locality_radius_m: u32,
}

impl<'a, I: GeoIndex> BoundaryResolver<'a, I> {
    pub fn new(index: &'a I, locality_radius_m: u32) -> Self {
        Self {
            index,
            locality_radius_m,
        }
    }

    /// Enclosing boundaries keyed by their declared level.
    ///
    /// Locality boundaries are sparse in the source data relative to
    /// named place points, so a missing locality is backfilled from
    /// the nearest place point within the configured radius.
    pub async fn levels(&self, point: GeoPoint) -> Result<Boundaries> {
        let mut levels = Boundaries::default();

        for feature in self
            .index
            .contains_point(&[FeatureType::Boundary], point)
            .await?
        {
            levels.insert(feature);
        }

        if levels.locality().is_none() {
            let places = self
                .index
                .nearest_by_distance(
                    &[FeatureType::PlacePoint],
                    point,
                    self.locality_radius_m,
                    1,
                )
                .await?;

            if let Some(place) = places.into_iter().next() {
                debug!("locality backfilled from place point {}", place.id);
                levels.set_locality(place);
            }
        }

        Ok(levels)
    }
}
