//! Larch - inverse geocoding over an Elasticsearch feature index.
//!
//! Resolves a coordinate into the best-matching real-world feature and
//! a hierarchical address via a cascading fallback: enclosed
//! address/POI objects first, then nearby highways, then enclosing
//! administrative boundaries. Also hosts the ingest-time fuzzy
//! housenumber indexer used to widen housenumber matching.

pub mod config;
pub mod error;
pub mod geometry;
pub mod housenumber;
pub mod index;
pub mod models;
pub mod resolve;

pub use config::ResolverConfig;
pub use error::ResolveError;
pub use models::{Feature, FeatureType, GeoPoint};
pub use resolve::GeoResolver;
