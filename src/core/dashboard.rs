//! Dashboard map: the engine map composed from layer and control configs
//!
//! Layers and controls can be described by config, built through the
//! registries, or handed over already built. Layers flagged as base layers
//! or overlays are listed in a layer switcher, which is only created when
//! the map is constructed.

use crate::{
    controls::{create_builtin, AttributionControl, Control, ControlPosition, LayersControl, ZoomControl},
    core::{
        config::{ControlConfig, LayerConfig, MapOptions},
        geo::{LatLng, LatLngBounds},
        map::Map,
        registry::{ControlRegistry, LayerContext, LayerRegistry},
        viewport::Viewport,
    },
    input::{LayerEvent, PointerEvent},
    layers::base::{LayerTrait, LayerType},
    Error, Result,
};

/// A layer to add: a config for a registered type or a built layer
pub enum LayerDescriptor {
    Config(LayerConfig),
    Layer(Box<dyn LayerTrait>),
}

impl From<LayerConfig> for LayerDescriptor {
    fn from(config: LayerConfig) -> Self {
        LayerDescriptor::Config(config)
    }
}

impl From<Box<dyn LayerTrait>> for LayerDescriptor {
    fn from(layer: Box<dyn LayerTrait>) -> Self {
        LayerDescriptor::Layer(layer)
    }
}

/// A control to add: a config or a built control
pub enum ControlDescriptor {
    Config(ControlConfig),
    Control(Box<dyn Control>),
}

impl From<ControlConfig> for ControlDescriptor {
    fn from(config: ControlConfig) -> Self {
        ControlDescriptor::Config(config)
    }
}

impl From<Box<dyn Control>> for ControlDescriptor {
    fn from(control: Box<dyn Control>) -> Self {
        ControlDescriptor::Control(control)
    }
}

pub struct DashboardMap {
    map: Map,
    layer_registry: LayerRegistry,
    control_registry: ControlRegistry,
    context: LayerContext,
    /// Display name to layer id, in registration order
    base_layers: Vec<(String, String)>,
    overlays: Vec<(String, String)>,
}

impl DashboardMap {
    /// Builds a map with the default layer and control types
    pub fn new(options: MapOptions) -> Result<Self> {
        Self::with_parts(
            Viewport::default(),
            options,
            LayerRegistry::with_defaults(),
            ControlRegistry::with_defaults(),
            LayerContext::default(),
        )
    }

    pub fn with_parts(
        viewport: Viewport,
        options: MapOptions,
        layer_registry: LayerRegistry,
        control_registry: ControlRegistry,
        mut context: LayerContext,
    ) -> Result<Self> {
        context.icon_image_path = options.icon_image_path.clone();

        let mut dashboard = Self {
            map: Map::with_options(viewport, options.clone()),
            layer_registry,
            control_registry,
            context,
            base_layers: Vec::new(),
            overlays: Vec::new(),
        };

        for config in &options.layers {
            dashboard.add_layer(config.clone())?;
        }

        if options.attribution_control {
            let mut attribution = AttributionControl::new(ControlPosition::BottomRight);
            attribution.set_prefix("");
            dashboard.map.add_control(Box::new(attribution))?;
        }
        if options.zoom_control {
            dashboard
                .map
                .add_control(Box::new(ZoomControl::new(ControlPosition::TopLeft)))?;
        }

        dashboard.map.container_mut().add_class(&options.class_name);

        if let Some([south_west, north_east]) = options.bounds {
            let bounds = LatLngBounds::new(
                LatLng::new(south_west[0], south_west[1]),
                LatLng::new(north_east[0], north_east[1]),
            );
            dashboard.map.fit_bounds(&bounds)?;
        }

        if !dashboard.base_layers.is_empty() || !dashboard.overlays.is_empty() {
            let switcher = LayersControl::new(&dashboard.base_layers, &dashboard.overlays);
            dashboard.map.add_control(Box::new(switcher))?;
        }

        for config in &options.controls {
            dashboard.add_control(config.clone())?;
        }

        Ok(dashboard)
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn layer_registry_mut(&mut self) -> &mut LayerRegistry {
        &mut self.layer_registry
    }

    pub fn control_registry_mut(&mut self) -> &mut ControlRegistry {
        &mut self.control_registry
    }

    /// Adds a layer and returns its id
    pub fn add_layer(&mut self, descriptor: impl Into<LayerDescriptor>) -> Result<String> {
        match descriptor.into() {
            LayerDescriptor::Config(config) => {
                if !self.layer_registry.contains(&config.layer_type) {
                    #[cfg(feature = "debug")]
                    log::warn!("Unknown layer type '{}'", config.layer_type);

                    return Err(Error::UnknownLayerType(config.layer_type).into());
                }

                let layer = self.layer_registry.create(&config, &self.context)?;
                let layer_id = layer.id().to_string();
                let name = layer.name().to_string();
                self.map.add_layer(layer)?;

                if config.base_layer {
                    register(&mut self.base_layers, name, &layer_id);
                } else if config.overlay {
                    register(&mut self.overlays, name, &layer_id);
                }
                Ok(layer_id)
            }
            LayerDescriptor::Layer(layer) => {
                let layer_id = layer.id().to_string();
                self.map.add_layer(layer)?;
                Ok(layer_id)
            }
        }
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
        self.map.remove_layer(layer_id)
    }

    /// Adds a control and returns its id. Registered types win over the
    /// engine's built-in controls.
    pub fn add_control(&mut self, descriptor: impl Into<ControlDescriptor>) -> Result<String> {
        let control = match descriptor.into() {
            ControlDescriptor::Config(config) => {
                if let Some(factory) = self.control_registry.get(&config.control_type) {
                    factory(&config)?
                } else if let Some(control) = create_builtin(&config) {
                    control?
                } else {
                    #[cfg(feature = "debug")]
                    log::warn!("Unknown control type '{}'", config.control_type);

                    return Err(Error::UnknownControlType(config.control_type).into());
                }
            }
            ControlDescriptor::Control(control) => control,
        };

        let control_id = control.id().to_string();
        self.map.add_control(control)?;
        Ok(control_id)
    }

    /// Base layers by display name, as `(name, layer id)`
    pub fn base_layers(&self) -> &[(String, String)] {
        &self.base_layers
    }

    /// Overlays by display name, as `(name, layer id)`
    pub fn overlays(&self) -> &[(String, String)] {
        &self.overlays
    }

    /// Combined bounds of the layers that have bounds, circle layers
    /// excluded. Invalid when no layer qualifies.
    pub fn layers_bounds(&self) -> LatLngBounds {
        let mut bounds = LatLngBounds::empty();
        self.map.each_layer(|layer| {
            if layer.layer_type() == LayerType::Circles {
                return;
            }
            if let Some(layer_bounds) = layer.bounds() {
                bounds.extend_bounds(&layer_bounds);
            }
        });
        bounds
    }

    pub fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<()> {
        self.map.fit_bounds(bounds)
    }

    pub fn toggle_loader(&mut self, show: Option<bool>) {
        self.map.toggle_loader(show);
    }

    pub fn handle_mouse_down(&mut self, pointer: &mut PointerEvent) {
        self.map.handle_mouse_down(pointer);
    }

    pub fn fire_layer_event(&mut self, layer_id: &str, event: LayerEvent) -> Result<LayerEvent> {
        self.map.fire_layer_event(layer_id, event)
    }
}

fn register(entries: &mut Vec<(String, String)>, name: String, layer_id: &str) {
    match entries.iter_mut().find(|(existing, _)| *existing == name) {
        Some(entry) => entry.1 = layer_id.to_string(),
        None => entries.push((name, layer_id.to_string())),
    }
}
