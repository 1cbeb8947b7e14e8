//! # Atlasboard
//!
//! Dashboard maps on a Leaflet-style Rust map engine.
//!
//! The crate provides the layer types a health-data dashboard draws
//! (boundaries, choropleths, facility dots and markers, catchment circles,
//! tile and Google basemaps), label placement inside polygons, and a
//! dashboard map that composes layers and controls from JSON configs
//! through extensible type registries.

pub mod controls;
pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod spatial;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::MapBuilder,
    config::{ControlConfig, LayerConfig, MapOptions},
    dashboard::{ControlDescriptor, DashboardMap, LayerDescriptor},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::Map,
    registry::{ControlRegistry, LayerContext, LayerRegistry},
    viewport::Viewport,
};

pub use crate::controls::{Control, ControlPosition, FitBoundsControl, LegendControl};

pub use crate::layers::{
    base::LayerTrait, google::GoogleLayer, tile::TileLayer, vector::VectorLayer,
};

pub use crate::input::{LayerEvent, MapEvent};

pub use crate::data::geojson::{Feature, FeatureCollection, Geometry};

pub use crate::spatial::{label_lat_lng, polylabel};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Layer error: {0}")]
    Layer(String),

    #[error("Unknown layer type: {0}")]
    UnknownLayerType(String),

    #[error("Unknown control type: {0}")]
    UnknownControlType(String),

    #[error("Missing template property: {key}")]
    Template { key: String },

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = MapError;
