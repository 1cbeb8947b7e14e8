//! Map builder for fluent API configuration
//!
//! This module provides a MapBuilder that configures a dashboard map: its
//! initial view, the layers and controls it starts with, and the layer and
//! control types it knows how to build.

use crate::{
    controls::Control,
    core::{
        config::{ControlConfig, LayerConfig, MapOptions},
        dashboard::DashboardMap,
        geo::{LatLng, LatLngBounds, Point},
        registry::{ControlRegistry, LayerContext, LayerRegistry},
        viewport::Viewport,
    },
    layers::{base::LayerTrait, google::MapsApiLoader},
    Result,
};
use std::sync::Arc;

/// Builder for creating and configuring dashboard maps
pub struct MapBuilder {
    /// Initial viewport configuration
    viewport: Option<Viewport>,
    /// Dashboard map options
    map_options: MapOptions,
    layer_registry: LayerRegistry,
    control_registry: ControlRegistry,
    context: LayerContext,
}

impl MapBuilder {
    /// Create a new MapBuilder with the default layer and control types
    pub fn new() -> Self {
        Self {
            viewport: None,
            map_options: MapOptions::default(),
            layer_registry: LayerRegistry::with_defaults(),
            control_registry: ControlRegistry::with_defaults(),
            context: LayerContext::default(),
        }
    }

    /// Set the initial viewport (center, zoom, and size)
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Set the initial center and zoom level
    pub fn with_center_and_zoom(mut self, center: LatLng, zoom: f64, size: Point) -> Self {
        self.viewport = Some(Viewport::new(center, zoom, size));
        self
    }

    /// Set the size of the map in pixels
    pub fn with_size(mut self, size: Point) -> Self {
        let mut viewport = self.viewport.unwrap_or_default();
        viewport.set_size(size);
        self.viewport = Some(viewport);
        self
    }

    /// Set all map options at once
    pub fn with_map_options(mut self, options: MapOptions) -> Self {
        self.map_options = options;
        self
    }

    /// Set the class added to the map container
    pub fn with_class_name(mut self, class_name: &str) -> Self {
        self.map_options.class_name = class_name.to_string();
        self
    }

    /// Fit the initial view to bounds
    pub fn with_bounds(mut self, bounds: &LatLngBounds) -> Self {
        self.map_options.bounds = Some([
            [bounds.south_west.lat, bounds.south_west.lng],
            [bounds.north_east.lat, bounds.north_east.lng],
        ]);
        self
    }

    /// Set zoom limits
    pub fn with_zoom_limits(mut self, min_zoom: Option<f64>, max_zoom: Option<f64>) -> Self {
        self.map_options.min_zoom = min_zoom;
        self.map_options.max_zoom = max_zoom;
        self
    }

    /// Enable or disable attribution control
    pub fn with_attribution_control(mut self, enabled: bool) -> Self {
        self.map_options.attribution_control = enabled;
        self
    }

    /// Enable or disable zoom control
    pub fn with_zoom_control(mut self, enabled: bool) -> Self {
        self.map_options.zoom_control = enabled;
        self
    }

    /// Set where default marker icons are served from
    pub fn with_icon_image_path(mut self, path: &str) -> Self {
        self.map_options.icon_image_path = path.to_string();
        self
    }

    /// Add a layer to build with the map
    pub fn with_layer(mut self, layer: LayerConfig) -> Self {
        self.map_options.layers.push(layer);
        self
    }

    /// Add a control to build with the map
    pub fn with_control(mut self, control: ControlConfig) -> Self {
        self.map_options.controls.push(control);
        self
    }

    /// Register a layer type
    pub fn register_layer_type<F>(mut self, layer_type: &str, factory: F) -> Self
    where
        F: Fn(&LayerConfig, &LayerContext) -> Result<Box<dyn LayerTrait>> + Send + Sync + 'static,
    {
        self.layer_registry.register(layer_type, factory);
        self
    }

    /// Register a control type
    pub fn register_control_type<F>(mut self, control_type: &str, factory: F) -> Self
    where
        F: Fn(&ControlConfig) -> Result<Box<dyn Control>> + Send + Sync + 'static,
    {
        self.control_registry.register(control_type, factory);
        self
    }

    /// Use a Maps API loader other than the process-wide one
    pub fn with_loader(mut self, loader: Arc<MapsApiLoader>) -> Self {
        self.context.loader = loader;
        self
    }

    /// Build the map, adding its initial layers and controls
    pub fn build(self) -> Result<DashboardMap> {
        DashboardMap::with_parts(
            self.viewport.unwrap_or_default(),
            self.map_options,
            self.layer_registry,
            self.control_registry,
            self.context,
        )
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience methods for common map configurations
impl MapBuilder {
    /// A dashboard map showing `bounds`, with zoom buttons
    pub fn dashboard_map(bounds: &LatLngBounds, size: Point) -> Self {
        Self::new()
            .with_size(size)
            .with_bounds(bounds)
            .with_zoom_control(true)
    }

    /// A map without any default controls
    pub fn minimal_map(center: LatLng, zoom: f64, size: Point) -> Self {
        Self::new()
            .with_center_and_zoom(center, zoom, size)
            .with_attribution_control(false)
            .with_zoom_control(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        controls::LegendControl,
        layers::base::{BaseLayer, LayerProperties, LayerType},
    };

    #[test]
    fn test_map_builder_basic() {
        let center = LatLng::new(8.48, -13.23); // Freetown
        let size = Point::new(800.0, 600.0);

        let builder = MapBuilder::new()
            .with_center_and_zoom(center, 10.0, size)
            .with_class_name("dashboard-map");

        assert!(builder.viewport.is_some());
        assert_eq!(builder.map_options.class_name, "dashboard-map");

        let dashboard = builder.build().unwrap();
        assert_eq!(dashboard.map().viewport().center, center);
        assert!(dashboard.map().container().has_class("dashboard-map"));
    }

    #[test]
    fn test_minimal_map_preset() {
        let builder = MapBuilder::minimal_map(LatLng::new(0.0, 0.0), 2.0, Point::new(400.0, 300.0));

        assert!(!builder.map_options.attribution_control);
        assert!(!builder.map_options.zoom_control);

        let dashboard = builder.build().unwrap();
        assert_eq!(dashboard.map().controls().count(), 0);
    }

    #[test]
    fn test_dashboard_map_preset() {
        let bounds = LatLngBounds::from_coords(6.9679, -13.29096, 9.9432, -10.4887);
        let dashboard = MapBuilder::dashboard_map(&bounds, Point::new(800.0, 600.0))
            .build()
            .unwrap();

        assert_eq!(dashboard.map().viewport().zoom, 8.0);
        assert!(dashboard.map().control("zoom").is_some());
        assert!(dashboard.map().control("attribution").is_some());
    }

    #[test]
    fn test_builder_layers_and_controls() {
        let dashboard = MapBuilder::new()
            .with_layer(
                LayerConfig::new("tileLayer")
                    .with_id("osm")
                    .with_name("OpenStreetMap")
                    .with_option("url", "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png")
                    .as_base_layer(),
            )
            .with_control(ControlConfig::new("legend").with_option("title", "Cases"))
            .build()
            .unwrap();

        assert!(dashboard.map().has_layer("osm"));
        assert!(dashboard.map().control("legend").is_some());
        assert!(dashboard.map().control("layers").is_some());
    }

    #[test]
    fn test_registered_types() {
        let dashboard = MapBuilder::new()
            .register_layer_type("heat", |config, _| {
                let id = config.id.clone().unwrap_or_else(|| "heat".to_string());
                Ok(Box::new(BaseLayer::new(LayerProperties::new(
                    id.clone(),
                    id,
                    LayerType::Custom,
                ))))
            })
            .register_control_type("key", |_| Ok(Box::new(LegendControl::new(None, Vec::new()))))
            .with_layer(LayerConfig::new("heat"))
            .with_control(ControlConfig::new("key"))
            .build()
            .unwrap();

        assert!(dashboard.map().has_layer("heat"));
        assert!(dashboard.map().control("legend").is_some());
    }

    #[test]
    fn test_build_fails_on_unknown_layer_type() {
        assert!(MapBuilder::new()
            .with_layer(LayerConfig::new("earthEngine"))
            .build()
            .is_err());
    }
}
