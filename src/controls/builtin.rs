use crate::{
    controls::{Control, ControlPosition},
    core::{config::ControlConfig, map::Map},
    input::events::MapEvent,
    layers::manager::LayerManager,
    prelude::HashMap,
    Result,
};

/// Builds one of the engine's own controls, `None` for other type names
pub fn create_builtin(config: &ControlConfig) -> Option<Result<Box<dyn Control>>> {
    fn boxed<C: Control + 'static>(control: Result<C>) -> Result<Box<dyn Control>> {
        control.map(|c| Box::new(c) as Box<dyn Control>)
    }

    match config.control_type.as_str() {
        "zoom" => Some(boxed(ZoomControl::from_config(config))),
        "scale" => Some(boxed(ScaleControl::from_config(config))),
        "attribution" => Some(boxed(AttributionControl::from_config(config))),
        "layers" => Some(boxed(LayersControl::from_config(config))),
        _ => None,
    }
}

/// Zoom in / zoom out buttons
pub struct ZoomControl {
    position: ControlPosition,
    zoom_in_title: String,
    zoom_out_title: String,
    current_zoom: f64,
}

impl ZoomControl {
    pub fn new(position: ControlPosition) -> Self {
        Self {
            position,
            zoom_in_title: "Zoom in".to_string(),
            zoom_out_title: "Zoom out".to_string(),
            current_zoom: 0.0,
        }
    }

    pub fn from_config(config: &ControlConfig) -> Result<Self> {
        let mut control = Self::new(config.position.unwrap_or(ControlPosition::TopLeft));
        if let Some(title) = config.option_as::<String>("zoomInTitle")? {
            control.zoom_in_title = title;
        }
        if let Some(title) = config.option_as::<String>("zoomOutTitle")? {
            control.zoom_out_title = title;
        }
        Ok(control)
    }

    pub fn titles(&self) -> (&str, &str) {
        (&self.zoom_in_title, &self.zoom_out_title)
    }

    pub fn current_zoom(&self) -> f64 {
        self.current_zoom
    }

    pub fn zoom_in(&self, map: &mut Map) -> Result<()> {
        let viewport = map.viewport();
        let (center, zoom) = (viewport.center, viewport.zoom);
        map.set_view(center, zoom + 1.0)
    }

    pub fn zoom_out(&self, map: &mut Map) -> Result<()> {
        let viewport = map.viewport();
        let (center, zoom) = (viewport.center, viewport.zoom);
        map.set_view(center, zoom - 1.0)
    }
}

impl Control for ZoomControl {
    fn id(&self) -> &str {
        "zoom"
    }

    fn position(&self) -> ControlPosition {
        self.position
    }

    fn on_add(&mut self, map: &mut Map) -> Result<()> {
        self.current_zoom = map.viewport().zoom;
        Ok(())
    }

    fn on_map_event(&mut self, event: &MapEvent, _layers: &LayerManager) {
        if let MapEvent::ViewChanged { zoom, .. } = event {
            self.current_zoom = *zoom;
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Distance scale bar
pub struct ScaleControl {
    position: ControlPosition,
    pub max_width: u32,
    pub metric: bool,
    pub imperial: bool,
}

impl ScaleControl {
    pub fn new(position: ControlPosition) -> Self {
        Self {
            position,
            max_width: 100,
            metric: true,
            imperial: true,
        }
    }

    pub fn from_config(config: &ControlConfig) -> Result<Self> {
        let mut control = Self::new(config.position.unwrap_or(ControlPosition::BottomLeft));
        if let Some(max_width) = config.option_as("maxWidth")? {
            control.max_width = max_width;
        }
        if let Some(metric) = config.option_as("metric")? {
            control.metric = metric;
        }
        if let Some(imperial) = config.option_as("imperial")? {
            control.imperial = imperial;
        }
        Ok(control)
    }
}

impl Control for ScaleControl {
    fn id(&self) -> &str {
        "scale"
    }

    fn position(&self) -> ControlPosition {
        self.position
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Attribution text collected from layers, after an optional prefix
pub struct AttributionControl {
    position: ControlPosition,
    prefix: String,
    attributions: Vec<String>,
}

impl AttributionControl {
    pub fn new(position: ControlPosition) -> Self {
        Self {
            position,
            prefix: "Leaflet".to_string(),
            attributions: Vec::new(),
        }
    }

    pub fn from_config(config: &ControlConfig) -> Result<Self> {
        let mut control = Self::new(config.position.unwrap_or(ControlPosition::BottomRight));
        if let Some(prefix) = config.option_as::<String>("prefix")? {
            control.prefix = prefix;
        }
        Ok(control)
    }

    pub fn set_prefix(&mut self, prefix: &str) {
        self.prefix = prefix.to_string();
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Prefix and attributions joined as Leaflet shows them
    pub fn text(&self) -> String {
        let attributions = self.attributions.join(", ");
        match (self.prefix.is_empty(), attributions.is_empty()) {
            (true, _) => attributions,
            (false, true) => self.prefix.clone(),
            (false, false) => format!("{} | {}", self.prefix, attributions),
        }
    }

    fn collect(&mut self, layers: &LayerManager) {
        self.attributions.clear();
        layers.for_each_layer(|layer| {
            let options = layer.options();
            if let Some(text) = options.get("attribution").and_then(|a| a.as_str()) {
                if !text.is_empty() && !self.attributions.iter().any(|a| a == text) {
                    self.attributions.push(text.to_string());
                }
            }
        });
    }
}

impl Control for AttributionControl {
    fn id(&self) -> &str {
        "attribution"
    }

    fn position(&self) -> ControlPosition {
        self.position
    }

    fn on_add(&mut self, map: &mut Map) -> Result<()> {
        self.collect(map.layer_manager());
        Ok(())
    }

    fn on_map_event(&mut self, event: &MapEvent, layers: &LayerManager) {
        if event.layer_id().is_some() {
            self.collect(layers);
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// One entry of the layer switcher
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEntry {
    pub name: String,
    pub layer_id: String,
    pub active: bool,
}

/// Layer switcher listing base layers and overlays by name
pub struct LayersControl {
    position: ControlPosition,
    base_layers: Vec<LayerEntry>,
    overlays: Vec<LayerEntry>,
}

impl LayersControl {
    /// `base_layers` and `overlays` map display names to layer ids
    pub fn new(base_layers: &[(String, String)], overlays: &[(String, String)]) -> Self {
        let entries = |layers: &[(String, String)]| -> Vec<LayerEntry> {
            layers
                .iter()
                .map(|(name, layer_id)| LayerEntry {
                    name: name.clone(),
                    layer_id: layer_id.clone(),
                    active: false,
                })
                .collect()
        };

        Self {
            position: ControlPosition::TopRight,
            base_layers: entries(base_layers),
            overlays: entries(overlays),
        }
    }

    pub fn from_config(config: &ControlConfig) -> Result<Self> {
        let base_layers: HashMap<String, String> =
            config.option_as("baseLayers")?.unwrap_or_default();
        let overlays: HashMap<String, String> = config.option_as("overlays")?.unwrap_or_default();

        let mut base_layers: Vec<_> = base_layers.into_iter().collect();
        let mut overlays: Vec<_> = overlays.into_iter().collect();
        base_layers.sort();
        overlays.sort();

        let mut control = Self::new(&base_layers, &overlays);
        if let Some(position) = config.position {
            control.position = position;
        }
        Ok(control)
    }

    pub fn base_layers(&self) -> &[LayerEntry] {
        &self.base_layers
    }

    pub fn overlays(&self) -> &[LayerEntry] {
        &self.overlays
    }

    fn sync(&mut self, layers: &LayerManager) {
        for entry in self.base_layers.iter_mut().chain(self.overlays.iter_mut()) {
            entry.active = layers.contains(&entry.layer_id);
        }
    }
}

impl Control for LayersControl {
    fn id(&self) -> &str {
        "layers"
    }

    fn position(&self) -> ControlPosition {
        self.position
    }

    fn on_add(&mut self, map: &mut Map) -> Result<()> {
        self.sync(map.layer_manager());
        Ok(())
    }

    fn on_map_event(&mut self, event: &MapEvent, layers: &LayerManager) {
        if event.layer_id().is_some() {
            self.sync(layers);
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
