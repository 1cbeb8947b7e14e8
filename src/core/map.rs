use crate::{
    controls::Control,
    core::{
        config::MapOptions,
        constants::LOADER_CLASS_NAME,
        geo::{LatLng, LatLngBounds, Point},
        viewport::Viewport,
    },
    input::{EventManager, LayerEvent, LayerEventKind, MapEvent, PointerEvent},
    layers::{base::LayerTrait, manager::LayerManager},
    Error, Result,
};

/// CSS-like class list of the element hosting the map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    classes: Vec<String>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class_name: &str) {
        if !self.has_class(class_name) {
            self.classes.push(class_name.to_string());
        }
    }

    pub fn remove_class(&mut self, class_name: &str) {
        self.classes.retain(|c| c != class_name);
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.iter().any(|c| c == class_name)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

pub struct Map {
    pub viewport: Viewport,
    layer_manager: LayerManager,
    controls: Vec<Box<dyn Control>>,
    event_manager: EventManager,
    options: MapOptions,
    container: Container,
}

impl Map {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let viewport = Viewport::new(center, zoom, size);
        Self::with_options(viewport, MapOptions::default())
    }

    pub fn with_options(viewport: Viewport, options: MapOptions) -> Self {
        let mut map = Self {
            viewport,
            layer_manager: LayerManager::new(),
            controls: Vec::new(),
            event_manager: EventManager::new(),
            options,
            container: Container::new(),
        };

        if let (Some(min), Some(max)) = (map.options.min_zoom, map.options.max_zoom) {
            map.viewport.set_zoom_limits(min, max);
        }

        map
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    pub fn layer_manager(&self) -> &LayerManager {
        &self.layer_manager
    }

    pub fn set_view(&mut self, center: LatLng, zoom: f64) -> Result<()> {
        if !center.is_valid() {
            return Err(Error::InvalidCoordinates(format!(
                "Invalid center: {}, {}",
                center.lat, center.lng
            ))
            .into());
        }

        let old_center = self.viewport.center;
        let old_zoom = self.viewport.zoom;

        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);

        if self.viewport.center != old_center || self.viewport.zoom != old_zoom {
            self.emit(MapEvent::ViewChanged {
                center: self.viewport.center,
                zoom: self.viewport.zoom,
            });
        }

        Ok(())
    }

    /// Shows `bounds` at the largest zoom that fits them
    pub fn fit_bounds(&mut self, bounds: &LatLngBounds) -> Result<()> {
        if !bounds.is_valid() {
            return Err(Error::InvalidCoordinates("Bounds are not valid".to_string()).into());
        }

        let old_center = self.viewport.center;
        let old_zoom = self.viewport.zoom;
        self.viewport.fit_bounds(bounds, None);

        if self.viewport.center != old_center || self.viewport.zoom != old_zoom {
            self.emit(MapEvent::ViewChanged {
                center: self.viewport.center,
                zoom: self.viewport.zoom,
            });
        }
        Ok(())
    }

    /// Shows the loader unless it is already shown; `Some(true)` always shows it
    pub fn toggle_loader(&mut self, show: Option<bool>) {
        if self.container.has_class(LOADER_CLASS_NAME) && show != Some(true) {
            self.container.remove_class(LOADER_CLASS_NAME);
        } else {
            self.container.add_class(LOADER_CLASS_NAME);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.container.has_class(LOADER_CLASS_NAME)
    }

    /// Adds a layer; a layer already registered under the same id is
    /// removed first
    pub fn add_layer(&mut self, mut layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        self.remove_layer(&layer_id)?;

        layer.on_add(self)?;
        self.layer_manager.add_layer(layer)?;

        #[cfg(feature = "debug")]
        log::debug!("Added layer '{}'", layer_id);

        self.emit(MapEvent::LayerAdd { layer_id });
        Ok(())
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Result<()> {
        if let Some(mut layer) = self.layer_manager.remove_layer(layer_id)? {
            layer.on_remove(self)?;

            #[cfg(feature = "debug")]
            log::debug!("Removed layer '{}'", layer_id);

            self.emit(MapEvent::LayerRemove {
                layer_id: layer_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn has_layer(&self, layer_id: &str) -> bool {
        self.layer_manager.contains(layer_id)
    }

    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layer_manager.get_layer(layer_id)
    }

    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layer_manager.with_layer_mut(layer_id, f)
    }

    pub fn each_layer<F>(&self, f: F)
    where
        F: FnMut(&dyn LayerTrait),
    {
        self.layer_manager.for_each_layer(f);
    }

    pub fn for_each_layer_mut<F>(&mut self, f: F)
    where
        F: FnMut(&mut dyn LayerTrait),
    {
        self.layer_manager.for_each_layer_mut(f);
    }

    pub fn list_layers(&self) -> Vec<String> {
        self.layer_manager.list_layers()
    }

    /// Dispatches an interaction to a layer. Unless the layer stopped it,
    /// a click or right click then bubbles to the map.
    pub fn fire_layer_event(&mut self, layer_id: &str, mut event: LayerEvent) -> Result<LayerEvent> {
        self.layer_manager
            .with_layer_mut(layer_id, |layer| layer.handle_event(&mut event))
            .ok_or_else(|| Error::Layer(format!("Layer '{}' not found", layer_id)))??;

        if !event.is_propagation_stopped() {
            match event.kind {
                LayerEventKind::Click => self.emit(MapEvent::Click {
                    lat_lng: event.lat_lng,
                }),
                LayerEventKind::ContextMenu => self.emit(MapEvent::ContextMenu {
                    lat_lng: event.lat_lng,
                }),
                _ => {}
            }
        }

        Ok(event)
    }

    /// Mouse down on the map never reaches the page the map is embedded in
    pub fn handle_mouse_down(&mut self, pointer: &mut PointerEvent) {
        pointer.stop_propagation();
        self.emit(MapEvent::MouseDown {
            position: pointer.position(),
        });
    }

    /// Adds a control, replacing any control with the same id
    pub fn add_control(&mut self, mut control: Box<dyn Control>) -> Result<()> {
        control.on_add(self)?;

        let control_id = control.id().to_string();
        if let Some(pos) = self.controls.iter().position(|c| c.id() == control_id) {
            let mut previous = self.controls.remove(pos);
            previous.on_remove(self)?;
        }
        self.controls.push(control);

        self.emit(MapEvent::ControlAdd { control_id });
        Ok(())
    }

    pub fn remove_control(&mut self, control_id: &str) -> Result<()> {
        if let Some(pos) = self.controls.iter().position(|c| c.id() == control_id) {
            let mut control = self.controls.remove(pos);
            control.on_remove(self)?;
            self.emit(MapEvent::ControlRemove {
                control_id: control_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn control(&self, control_id: &str) -> Option<&dyn Control> {
        self.controls
            .iter()
            .find(|c| c.id() == control_id)
            .map(|c| c.as_ref())
    }

    pub fn controls(&self) -> impl Iterator<Item = &dyn Control> {
        self.controls.iter().map(|c| c.as_ref())
    }

    /// Activates a control; returns whether it exists
    pub fn click_control(&mut self, control_id: &str) -> Result<bool> {
        let Some(pos) = self.controls.iter().position(|c| c.id() == control_id) else {
            return Ok(false);
        };

        let mut control = self.controls.remove(pos);
        let result = control.on_click(self);
        let pos = pos.min(self.controls.len());
        self.controls.insert(pos, control);

        result.map(|_| true)
    }

    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(event_type, callback);
    }

    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_manager.process_events()
    }

    fn emit(&mut self, event: MapEvent) {
        for control in &mut self.controls {
            control.on_map_event(&event, &self.layer_manager);
        }
        self.event_manager.emit(event);
    }
}

impl Default for Map {
    fn default() -> Self {
        Self::with_options(Viewport::default(), MapOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::base::{BaseLayer, LayerProperties, LayerType};
    use std::sync::{Arc, Mutex};

    fn layer(id: &str) -> Box<dyn LayerTrait> {
        Box::new(BaseLayer::new(LayerProperties::new(
            id.to_string(),
            id.to_string(),
            LayerType::Custom,
        )))
    }

    #[tokio::test]
    async fn test_map_creation() {
        let center = LatLng::new(0.0, 0.0);
        let zoom = 1.0;
        let size = Point::new(800.0, 600.0);
        let map = Map::new(center, zoom, size);

        assert_eq!(map.viewport.center, center);
        assert_eq!(map.viewport.zoom, zoom);
        assert_eq!(map.viewport.size, size);
    }

    #[tokio::test]
    async fn test_set_view() {
        let mut map = Map::new(LatLng::new(0.0, 0.0), 1.0, Point::new(800.0, 600.0));
        let new_center = LatLng::new(10.0, 20.0);

        map.set_view(new_center, 5.0).unwrap();
        assert_eq!(map.viewport.center, new_center);
        assert_eq!(map.viewport.zoom, 5.0);
        assert!(map.set_view(LatLng::new(120.0, 0.0), 5.0).is_err());

        let events = map.process_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "viewchanged");
    }

    #[tokio::test]
    async fn test_layer_management() {
        let mut map = Map::default();

        map.add_layer(layer("osm")).unwrap();
        assert!(map.get_layer("osm").is_some());
        assert!(map.list_layers().contains(&"osm".to_string()));

        map.remove_layer("osm").unwrap();
        assert!(map.get_layer("osm").is_none());

        let events = map.process_events();
        assert_eq!(
            events,
            vec![
                MapEvent::LayerAdd {
                    layer_id: "osm".to_string()
                },
                MapEvent::LayerRemove {
                    layer_id: "osm".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_same_id_replaces_layer() {
        let mut map = Map::default();
        map.add_layer(layer("osm")).unwrap();
        map.process_events();

        map.add_layer(layer("osm")).unwrap();
        assert_eq!(map.list_layers(), vec!["osm".to_string()]);
        assert_eq!(
            map.process_events(),
            vec![
                MapEvent::LayerRemove {
                    layer_id: "osm".to_string()
                },
                MapEvent::LayerAdd {
                    layer_id: "osm".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_event_listeners() {
        let mut map = Map::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        map.on("layeradd", move |event| {
            if let Ok(mut seen) = sink.lock() {
                seen.push(event.layer_id().map(str::to_string));
            }
        });

        map.add_layer(layer("a")).unwrap();
        map.process_events();
        assert_eq!(*seen.lock().unwrap(), vec![Some("a".to_string())]);
    }

    #[test]
    fn test_toggle_loader() {
        let mut map = Map::default();
        assert!(!map.is_loading());

        map.toggle_loader(None);
        assert!(map.is_loading());

        // Forcing it on keeps it on
        map.toggle_loader(Some(true));
        assert!(map.is_loading());

        map.toggle_loader(Some(false));
        assert!(!map.is_loading());

        map.toggle_loader(Some(false));
        assert!(map.is_loading());
    }

    #[test]
    fn test_mouse_down_stops_propagation() {
        let mut map = Map::default();
        let mut pointer = PointerEvent::new(12.0, 34.0);

        map.handle_mouse_down(&mut pointer);
        assert!(pointer.is_propagation_stopped());
        assert_eq!(
            map.process_events(),
            vec![MapEvent::MouseDown {
                position: Point::new(12.0, 34.0)
            }]
        );
    }

    #[test]
    fn test_unstopped_layer_click_bubbles() {
        let mut map = Map::default();
        map.add_layer(layer("a")).unwrap();
        map.process_events();

        let lat_lng = LatLng::new(8.0, -11.0);
        let event = map
            .fire_layer_event("a", LayerEvent::click("f1", lat_lng))
            .unwrap();
        assert!(!event.is_propagation_stopped());
        assert_eq!(
            map.process_events(),
            vec![MapEvent::Click {
                lat_lng: Some(lat_lng)
            }]
        );

        assert!(map
            .fire_layer_event("missing", LayerEvent::click("f1", lat_lng))
            .is_err());
    }

    #[test]
    fn test_fit_invalid_bounds() {
        let mut map = Map::default();
        assert!(map.fit_bounds(&LatLngBounds::empty()).is_err());
    }

    #[test]
    fn test_container_classes() {
        let mut container = Container::new();
        container.add_class("leaflet-dhis2");
        container.add_class("leaflet-dhis2");
        assert_eq!(container.classes(), ["leaflet-dhis2".to_string()]);

        container.remove_class("leaflet-dhis2");
        assert!(!container.has_class("leaflet-dhis2"));
    }
}
