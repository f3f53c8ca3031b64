//! Data model: features, address levels, requests and answers.

mod answer;
mod feature;
mod level;

pub use answer::{
    parse_bool_lenient, Detail, LargestLevel, RelatedFeatures, ResolveAnswer, ResolveRequest,
    DEFAULT_MAX_NEIGHBOURS,
};
pub use feature::{Feature, FeatureAddress, FeatureType, GeoPoint, NearestRef};
pub use level::{AddressLevel, AddressParts, Boundaries};
