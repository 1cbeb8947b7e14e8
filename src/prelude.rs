//! Prelude module for common atlasboard types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use atlasboard::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::{ControlConfig, LayerConfig, LayerHandlers, MapOptions},
    coords::{to_lat_lng, to_lat_lng_bounds, to_lng_lat, to_lng_lat_bounds},
    dashboard::{ControlDescriptor, DashboardMap, LayerDescriptor},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::Map,
    registry::{ControlRegistry, LayerContext, LayerRegistry},
    viewport::Viewport,
};

pub use crate::controls::{
    AttributionControl, Control, ControlPosition, FitBoundsControl, LayersControl, LegendControl,
    LegendItem, ScaleControl, ZoomControl,
};

pub use crate::layers::{
    base::{BaseLayer, LayerProperties, LayerTrait, LayerType},
    google::{GoogleLayer, LoadState, MapsApiLoader, ScriptInjector},
    label::{Label, LabelGroup},
    manager::LayerManager,
    shape::{Shape, ShapeFactory, ShapeKind},
    style::{LabelStyle, PathStyle},
    tile::TileLayer,
    vector::{ClickEvent, RightClickEvent, VectorLayer, VectorLayerOptions},
};

pub use crate::data::geojson::{Feature, FeatureCollection, FeatureId, Geometry, Properties};

pub use crate::input::{
    events::{LayerEvent, LayerEventKind, MapEvent, PointerEvent},
    handler::{EventManager, Evented},
};

pub use crate::spatial::{label_lat_lng, largest_polygon, polylabel};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
