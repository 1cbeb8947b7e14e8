pub mod geojson;
pub mod template;

pub use geojson::{Feature, FeatureCollection, FeatureId, Geometry, Properties};
