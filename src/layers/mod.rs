pub mod macros;

pub mod base;
pub mod manager;

pub mod label;
pub mod shape;
pub mod style;
pub mod vector;

pub mod choropleth;
pub mod circles;
pub mod google;
pub mod marker;
pub mod tile;

pub use base::{BaseLayer, LayerProperties, LayerTrait, LayerType};
pub use google::{GoogleLayer, LoadState, MapsApiLoader, ScriptInjector};
pub use label::{Label, LabelGroup, LabelPosition};
pub use manager::LayerManager;
pub use shape::{Shape, ShapeFactory, ShapeKind};
pub use style::{LabelStyle, PathStyle};
pub use tile::TileLayer;
pub use vector::{ClickEvent, RightClickEvent, VectorLayer, VectorLayerOptions};
