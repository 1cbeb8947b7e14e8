//! Layer and control type registries
//!
//! A registry maps the `type` name of a config to the factory that builds
//! it. Dashboard maps start from the default registries and hosts can
//! register their own types on top.

use crate::{
    controls::{Control, FitBoundsControl, LegendControl},
    core::{
        config::{ControlConfig, LayerConfig},
        constants::DEFAULT_ICON_IMAGE_PATH,
    },
    layers::{
        base::LayerTrait,
        choropleth,
        circles,
        google::{GoogleLayer, MapsApiLoader},
        marker,
        tile::TileLayer,
    },
    prelude::HashMap,
    Error, Result,
};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Shared services handed to layer factories
#[derive(Clone)]
pub struct LayerContext {
    pub loader: Arc<MapsApiLoader>,
    pub icon_image_path: String,
}

impl Default for LayerContext {
    fn default() -> Self {
        Self {
            loader: MapsApiLoader::global(),
            icon_image_path: DEFAULT_ICON_IMAGE_PATH.to_string(),
        }
    }
}

pub type LayerFactory =
    Arc<dyn Fn(&LayerConfig, &LayerContext) -> Result<Box<dyn LayerTrait>> + Send + Sync>;
pub type ControlFactory = Arc<dyn Fn(&ControlConfig) -> Result<Box<dyn Control>> + Send + Sync>;

/// Id and display name of a layer built from `config`. Layers without an id
/// get a generated one, layers without a name are named after their id.
pub fn layer_identity(config: &LayerConfig) -> (String, String) {
    let id = config.id.clone().unwrap_or_else(|| {
        let n = NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", config.layer_type, n)
    });
    let name = config.name.clone().unwrap_or_else(|| id.clone());
    (id, name)
}

#[derive(Clone, Default)]
pub struct LayerRegistry {
    factories: HashMap<String, LayerFactory>,
}

impl LayerRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the dashboard layer types
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register("tileLayer", |config, _| {
            let (id, name) = layer_identity(config);
            Ok(Box::new(TileLayer::from_config(id, name, config)?))
        });
        registry.register("googleLayer", |config, context| {
            let (id, name) = layer_identity(config);
            Ok(Box::new(GoogleLayer::from_config(
                id,
                name,
                config,
                context.loader.clone(),
            )?))
        });
        registry.register("boundary", |config, _| {
            let (id, name) = layer_identity(config);
            Ok(Box::new(choropleth::boundary_from_config(id, name, config)?))
        });
        registry.register("dots", |config, _| {
            let (id, name) = layer_identity(config);
            Ok(Box::new(marker::dots_from_config(id, name, config)?))
        });
        registry.register("markers", |config, context| {
            let (id, name) = layer_identity(config);
            Ok(Box::new(marker::markers_from_config(
                id,
                name,
                config,
                &context.icon_image_path,
            )?))
        });
        registry.register("circles", |config, _| {
            let (id, name) = layer_identity(config);
            Ok(Box::new(circles::from_config(id, name, config)?))
        });
        registry.register("choropleth", |config, _| {
            let (id, name) = layer_identity(config);
            Ok(Box::new(choropleth::choropleth_from_config(id, name, config)?))
        });

        registry
    }

    /// Registers a layer type, replacing any factory of the same name
    pub fn register<F>(&mut self, layer_type: &str, factory: F)
    where
        F: Fn(&LayerConfig, &LayerContext) -> Result<Box<dyn LayerTrait>> + Send + Sync + 'static,
    {
        self.factories
            .insert(layer_type.to_string(), Arc::new(factory));
    }

    pub fn contains(&self, layer_type: &str) -> bool {
        self.factories.contains_key(layer_type)
    }

    pub fn get(&self, layer_type: &str) -> Option<&LayerFactory> {
        self.factories.get(layer_type)
    }

    pub fn create(&self, config: &LayerConfig, context: &LayerContext) -> Result<Box<dyn LayerTrait>> {
        let factory = self
            .get(&config.layer_type)
            .ok_or_else(|| Error::UnknownLayerType(config.layer_type.clone()))?;
        factory(config, context)
    }

    /// Registered type names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}

#[derive(Clone, Default)]
pub struct ControlRegistry {
    factories: HashMap<String, ControlFactory>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the dashboard control types
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("fitBounds", |config| {
            Ok(Box::new(FitBoundsControl::from_config(config)?))
        });
        registry.register("legend", |config| {
            Ok(Box::new(LegendControl::from_config(config)?))
        });
        registry
    }

    pub fn register<F>(&mut self, control_type: &str, factory: F)
    where
        F: Fn(&ControlConfig) -> Result<Box<dyn Control>> + Send + Sync + 'static,
    {
        self.factories
            .insert(control_type.to_string(), Arc::new(factory));
    }

    pub fn contains(&self, control_type: &str) -> bool {
        self.factories.contains_key(control_type)
    }

    pub fn get(&self, control_type: &str) -> Option<&ControlFactory> {
        self.factories.get(control_type)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }
}
