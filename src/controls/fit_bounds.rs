use crate::{
    controls::{Control, ControlPosition},
    core::{config::ControlConfig, geo::LatLngBounds, map::Map},
    input::events::MapEvent,
    layers::{base::LayerTrait, manager::LayerManager},
    Result,
};
use fxhash::FxHashSet;

/// Button that zooms the map to its content.
///
/// Content means the "main" layers: layers the host placed at a non-zero
/// index in its layer list. The button is hidden while none of them has
/// bounds.
pub struct FitBoundsControl {
    position: ControlPosition,
    title: String,
    visible: bool,
    main_layers: FxHashSet<String>,
}

impl FitBoundsControl {
    pub fn new() -> Self {
        Self {
            position: ControlPosition::TopLeft,
            title: "Zoom to content".to_string(),
            visible: false,
            main_layers: FxHashSet::default(),
        }
    }

    pub fn from_config(config: &ControlConfig) -> Result<Self> {
        let mut control = Self::new();
        if let Some(position) = config.position {
            control.position = position;
        }
        Ok(control)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    fn is_main_layer(layer: &dyn LayerTrait) -> bool {
        matches!(layer.index(), Some(index) if index != 0)
    }

    /// Combined bounds of the main layers, `None` when not valid
    pub fn layers_bounds(layers: &LayerManager) -> Option<LatLngBounds> {
        let mut bounds = LatLngBounds::empty();
        layers.for_each_layer(|layer| {
            if Self::is_main_layer(layer) {
                if let Some(layer_bounds) = layer.bounds() {
                    bounds.extend_bounds(&layer_bounds);
                }
            }
        });
        bounds.is_valid().then_some(bounds)
    }

    fn refresh(&mut self, layers: &LayerManager) {
        self.main_layers.clear();
        let mut has_bounds = false;
        layers.for_each_layer(|layer| {
            if Self::is_main_layer(layer) {
                self.main_layers.insert(layer.id().to_string());
                has_bounds |= layer.bounds().is_some();
            }
        });
        self.visible = has_bounds;
    }
}

impl Default for FitBoundsControl {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for FitBoundsControl {
    fn id(&self) -> &str {
        "fitBounds"
    }

    fn position(&self) -> ControlPosition {
        self.position
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn on_add(&mut self, map: &mut Map) -> Result<()> {
        self.refresh(map.layer_manager());
        Ok(())
    }

    fn on_map_event(&mut self, event: &MapEvent, layers: &LayerManager) {
        let is_main = match event {
            MapEvent::LayerAdd { layer_id } => layers
                .get_layer(layer_id)
                .map(Self::is_main_layer)
                .unwrap_or(false),
            MapEvent::LayerRemove { layer_id } => self.main_layers.contains(layer_id),
            _ => false,
        };

        if is_main {
            self.refresh(layers);
        }
    }

    fn on_click(&mut self, map: &mut Map) -> Result<()> {
        if let Some(bounds) = Self::layers_bounds(map.layer_manager()) {
            map.fit_bounds(&bounds)?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
