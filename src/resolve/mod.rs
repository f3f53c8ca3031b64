//! The cascading inverse-geocode resolution engine.

mod boundaries;
mod detail;
mod highway;
mod merge;
mod parts;
mod resolver;

pub use boundaries::BoundaryResolver;
pub use detail::{project, Projected, ShortAnswer, ShortFeature, ShortRelated};
pub use highway::HighwayResolver;
pub use merge::{merge_by_id, sort_by_area};
pub use parts::{from_boundaries, from_highway};
pub use resolver::GeoResolver;
