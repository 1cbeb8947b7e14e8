use crate::{
    core::{
        config::LayerConfig,
        constants::{DEFAULT_LABEL_PANE, LABEL_MARGIN},
        coords::to_lng_lat,
        geo::LatLngBounds,
        map::Map,
    },
    data::{
        geojson::{Feature, FeatureCollection, FeatureId},
        template,
    },
    input::{
        events::{LayerEvent, LayerEventKind},
        handler::{Evented, ListenerId},
    },
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        label::{Label, LabelGroup, LabelPosition},
        shape::{DefaultShapeFactory, Shape, ShapeFactory},
        style::{LabelStyle, PathStyle},
    },
    spatial::label_placement::label_lat_lng,
    Error, Result,
};
use serde_json::Value;
use std::sync::Arc;

/// Normalized click on a feature, handed to the host
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub event_type: String,
    /// Clicked location as `[lng, lat]`
    pub coordinates: Option<[f64; 2]>,
    pub feature: Feature,
}

/// Normalized right click on a feature, handed to the host
#[derive(Debug, Clone, PartialEq)]
pub struct RightClickEvent {
    pub event_type: String,
    /// Clicked location as `[lng, lat]`
    pub coordinates: Option<[f64; 2]>,
    /// Screen position `[x, y]` for placing a context menu
    pub position: Option<[f64; 2]>,
    pub feature: Feature,
}

pub type ClickHandler = Arc<dyn Fn(ClickEvent) + Send + Sync>;
pub type RightClickHandler = Arc<dyn Fn(RightClickEvent) + Send + Sync>;
pub type LayerEventCallback = Arc<dyn Fn(&LayerEvent) + Send + Sync>;
pub type PopupCallback = Arc<dyn Fn(&Feature) -> String + Send + Sync>;

/// Popup of a feature. Only templates are bound by the layer; callbacks are
/// left to the host to open on click.
#[derive(Clone)]
pub enum PopupContent {
    Template(String),
    Callback(PopupCallback),
}

/// Options shared by every vector layer type
#[derive(Clone)]
pub struct VectorLayerOptions {
    /// Features added when the layer is created
    pub data: Option<FeatureCollection>,
    pub style: PathStyle,
    /// Applied on hover; `None` disables hover highlighting
    pub highlight_style: Option<PathStyle>,
    /// Applied when the pointer leaves an unselected feature
    pub reset_style: PathStyle,
    /// Label template, also used as tooltip unless `hover_label` is set
    pub label: Option<String>,
    pub hover_label: Option<String>,
    pub popup: Option<PopupContent>,
    pub label_style: LabelStyle,
    pub label_pane: Option<String>,
    pub pane: Option<String>,
    pub index: Option<i32>,
    /// Fill opacity relative to stroke opacity in `set_opacity`
    pub opacity_factor: f64,
    pub on_click: Option<ClickHandler>,
    pub on_right_click: Option<RightClickHandler>,
}

impl Default for VectorLayerOptions {
    fn default() -> Self {
        Self {
            data: None,
            style: PathStyle::new().with_weight(1.0),
            highlight_style: Some(PathStyle::new().with_weight(3.0)),
            reset_style: PathStyle::new().with_weight(1.0),
            label: None,
            hover_label: None,
            popup: None,
            label_style: LabelStyle::default(),
            label_pane: None,
            pane: None,
            index: None,
            opacity_factor: 1.0,
            on_click: None,
            on_right_click: None,
        }
    }
}

impl VectorLayerOptions {
    /// Reads the options of a layer config on top of the defaults
    pub fn from_config(config: &LayerConfig) -> Result<Self> {
        let mut options = Self::default();

        if let Some(data) = config.option("data") {
            options.data = Some(FeatureCollection::from_value(data)?);
        }
        if let Some(style) = config.option_as::<PathStyle>("style")? {
            options.style = style;
        }
        match config.options.get("highlightStyle") {
            Some(Value::Null) | Some(Value::Bool(false)) => options.highlight_style = None,
            Some(value) => {
                options.highlight_style =
                    Some(serde_json::from_value(value.clone()).map_err(Error::Serialization)?)
            }
            None => {}
        }
        if let Some(style) = config.option_as::<PathStyle>("resetStyle")? {
            options.reset_style = style;
        }
        if let Some(label_style) = config.option_as::<LabelStyle>("labelStyle")? {
            options.label_style = label_style;
        }

        options.label = config.option_str("label").map(str::to_string);
        options.hover_label = config.option_str("hoverLabel").map(str::to_string);
        options.popup = config
            .option_str("popup")
            .map(|template| PopupContent::Template(template.to_string()));
        options.label_pane = config.option_str("labelPane").map(str::to_string);
        options.pane = config.option_str("pane").map(str::to_string);
        options.index = config.option_as::<i32>("index")?;
        if let Some(factor) = config.option_f64("opacityFactor") {
            options.opacity_factor = factor;
        }

        options.on_click = config.handlers.on_click.clone();
        options.on_right_click = config.handlers.on_right_click.clone();

        Ok(options)
    }
}

#[derive(Clone)]
enum Listener {
    Click,
    RightClick,
    HoverEnter,
    HoverExit,
    External(LayerEventCallback),
}

/// Layer of GeoJSON features, each drawn as one shape.
///
/// Features are kept in insertion order and identified by their id; adding a
/// feature whose id is already present replaces the earlier shape in place.
pub struct VectorLayer {
    properties: LayerProperties,
    options: VectorLayerOptions,
    factory: Arc<dyn ShapeFactory>,
    shapes: Vec<Shape>,
    labels: Option<LabelGroup>,
    events: Evented<LayerEventKind, Listener>,
    /// Listeners subscribed by `on_add`, removed again by `on_remove`
    subscriptions: Vec<(LayerEventKind, ListenerId)>,
}

impl VectorLayer {
    /// Create a new vector layer with circle markers for points
    pub fn new(id: String, name: String, options: VectorLayerOptions) -> Result<Self> {
        Self::with_factory(
            id,
            name,
            LayerType::Vector,
            options,
            Arc::new(DefaultShapeFactory),
        )
    }

    pub fn with_factory(
        id: String,
        name: String,
        layer_type: LayerType,
        mut options: VectorLayerOptions,
        factory: Arc<dyn ShapeFactory>,
    ) -> Result<Self> {
        let data = options.data.take();
        let labels = options
            .label
            .as_ref()
            .map(|_| LabelGroup::new(format!("{id}-labels"), LABEL_MARGIN));
        let properties = LayerProperties::new(id, name, layer_type).with_index(options.index);

        let mut layer = Self {
            properties,
            options,
            factory,
            shapes: Vec::new(),
            labels,
            events: Evented::new(),
            subscriptions: Vec::new(),
        };

        if let Some(data) = data {
            layer.add_data(data)?;
        }

        Ok(layer)
    }

    /// Add every feature of a collection
    pub fn add_data(&mut self, data: FeatureCollection) -> Result<()> {
        for feature in data.features {
            self.add_feature(feature)?;
        }
        Ok(())
    }

    /// Add a feature with its label, tooltip and popup
    pub fn add_feature(&mut self, feature: Feature) -> Result<()> {
        let (kind, style) = self
            .factory
            .create_shape(&feature, &self.base_style())
            .ok_or_else(|| {
                Error::Layer(format!(
                    "{} features are not supported by layer {}",
                    feature.geometry.type_name(),
                    self.properties.id
                ))
            })?;

        let label_text = match &self.options.label {
            Some(label) => Some(template::render(label, &feature.properties)?),
            None => None,
        };
        let tooltip = match self.options.hover_label.as_ref().or(self.options.label.as_ref()) {
            Some(tooltip) => Some(template::render(tooltip, &feature.properties)?),
            None => None,
        };
        let popup = match &self.options.popup {
            Some(PopupContent::Template(popup)) => Some(template::render(popup, &feature.properties)?),
            _ => None,
        };

        if let (Some(labels), Some(text)) = (&self.labels, label_text) {
            match self.build_label(&feature, text) {
                Some(label) => labels.insert(feature.id.clone(), label),
                None => {
                    #[cfg(feature = "debug")]
                    log::debug!(
                        "No label anchor for {} feature {}",
                        feature.geometry.type_name(),
                        feature.id
                    );
                    labels.remove(&feature.id);
                }
            }
        }

        let mut shape = Shape::new(feature, kind, style);
        if let Some(text) = tooltip {
            shape.bind_tooltip(text, true);
        }
        if let Some(text) = popup {
            shape.bind_popup(text);
        }

        match self.shapes.iter().position(|existing| existing.id() == shape.id()) {
            Some(index) => self.shapes[index] = shape,
            None => self.shapes.push(shape),
        }

        Ok(())
    }

    /// Remove a feature and its label
    pub fn remove_feature(&mut self, id: &FeatureId) -> Option<Shape> {
        let index = self.shapes.iter().position(|shape| shape.id() == id)?;
        if let Some(labels) = &self.labels {
            labels.remove(id);
        }
        Some(self.shapes.remove(index))
    }

    /// Find the shape of a feature
    pub fn find_by_id(&self, id: &FeatureId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    fn find_by_id_mut(&mut self, id: &FeatureId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|shape| shape.id() == id)
    }

    /// All shapes in insertion order
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn feature_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn labels(&self) -> Option<&LabelGroup> {
        self.labels.as_ref()
    }

    pub fn vector_options(&self) -> &VectorLayerOptions {
        &self.options
    }

    /// Marks a feature as selected; selected features keep their highlight
    pub fn set_selected(&mut self, id: &FeatureId, selected: bool) -> bool {
        match self.find_by_id_mut(id) {
            Some(shape) => {
                shape.feature_mut().is_selected = selected;
                true
            }
            None => false,
        }
    }

    /// Merge a partial style into every shape
    pub fn set_style(&mut self, style: &PathStyle) {
        for shape in &mut self.shapes {
            shape.set_style(style);
        }
    }

    fn apply_opacity(&mut self, opacity: f64) {
        let style = PathStyle::new()
            .with_opacity(opacity)
            .with_fill_opacity(opacity * self.options.opacity_factor);
        self.set_style(&style);
    }

    /// Subscribe to layer events
    pub fn on<F>(&mut self, kind: LayerEventKind, callback: F) -> ListenerId
    where
        F: Fn(&LayerEvent) + Send + Sync + 'static,
    {
        self.events.on(kind, Listener::External(Arc::new(callback)))
    }

    pub fn off(&mut self, kind: LayerEventKind, id: ListenerId) -> bool {
        self.events.off(&kind, id)
    }

    pub fn listens(&self, kind: LayerEventKind) -> bool {
        self.events.listens(&kind)
    }

    /// Run the listeners of an event in subscription order
    pub fn fire(&mut self, event: &mut LayerEvent) {
        let listeners: Vec<Listener> = self.events.listeners(&event.kind).cloned().collect();

        for listener in listeners {
            match listener {
                Listener::Click => self.handle_click(event),
                Listener::RightClick => self.handle_right_click(event),
                Listener::HoverEnter => self.highlight(event),
                Listener::HoverExit => self.reset_highlight(event),
                Listener::External(callback) => callback(&*event),
            }
        }
    }

    fn subscribe(&mut self, kind: LayerEventKind, listener: Listener) {
        let id = self.events.on(kind, listener);
        self.subscriptions.push((kind, id));
    }

    fn base_style(&self) -> PathStyle {
        let mut style = self.options.style.clone();
        if self.options.pane.is_some() {
            style.pane = self.options.pane.clone();
        }
        style
    }

    fn build_label(&self, feature: &Feature, text: String) -> Option<Label> {
        let lat_lng = label_lat_lng(&feature.geometry)?;

        let mut style = feature
            .property("labelStyle")
            .and_then(|value| serde_json::from_value::<LabelStyle>(value.clone()).ok())
            .unwrap_or_default()
            .extended(&self.options.label_style);
        if let Some(color) = feature.style_color() {
            style.color = Some(color.to_string());
        }

        let position = if feature.geometry.is_point() {
            LabelPosition::Below
        } else {
            LabelPosition::Middle
        };

        Some(Label {
            text,
            lat_lng,
            position,
            style,
            pane: self
                .options
                .label_pane
                .clone()
                .unwrap_or_else(|| DEFAULT_LABEL_PANE.to_string()),
        })
    }

    fn event_shape(&self, event: &LayerEvent) -> Option<&Shape> {
        event.feature_id.as_ref().and_then(|id| self.find_by_id(id))
    }

    fn handle_click(&self, event: &mut LayerEvent) {
        event.stop_propagation();

        let (Some(on_click), Some(shape)) = (&self.options.on_click, self.event_shape(event)) else {
            return;
        };

        on_click(ClickEvent {
            event_type: event.kind.to_string(),
            coordinates: event.lat_lng.and_then(|lat_lng| to_lng_lat(lat_lng)),
            feature: shape.feature().clone(),
        });
    }

    fn handle_right_click(&self, event: &mut LayerEvent) {
        event.stop_propagation();

        let (Some(on_right_click), Some(shape)) =
            (&self.options.on_right_click, self.event_shape(event))
        else {
            return;
        };

        let position = event.original_event.as_ref().map(|pointer| {
            let page_y = pointer.page_y.filter(|y| *y != 0.0);
            [pointer.x, page_y.unwrap_or(pointer.y)]
        });

        on_right_click(RightClickEvent {
            event_type: event.kind.to_string(),
            coordinates: event.lat_lng.and_then(|lat_lng| to_lng_lat(lat_lng)),
            position,
            feature: shape.feature().clone(),
        });
    }

    fn highlight(&mut self, event: &LayerEvent) {
        let Some(style) = self.options.highlight_style.clone() else {
            return;
        };
        if let Some(shape) = event.feature_id.as_ref().and_then(|id| self.find_by_id_mut(id)) {
            shape.set_style(&style);
        }
    }

    fn reset_highlight(&mut self, event: &LayerEvent) {
        let style = self.options.reset_style.clone();
        if let Some(shape) = event.feature_id.as_ref().and_then(|id| self.find_by_id_mut(id)) {
            if !shape.feature().is_selected() {
                shape.set_style(&style);
            }
        }
    }
}

impl LayerTrait for VectorLayer {
    fn id(&self) -> &str {
        &self.properties.id
    }

    fn name(&self) -> &str {
        &self.properties.name
    }

    fn layer_type(&self) -> LayerType {
        self.properties.layer_type
    }

    fn z_index(&self) -> i32 {
        self.properties.z_index
    }

    fn set_z_index(&mut self, z_index: i32) {
        self.properties.z_index = z_index;
    }

    fn opacity(&self) -> f32 {
        self.properties.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.properties.opacity = opacity.clamp(0.0, 1.0);
        self.apply_opacity(f64::from(self.properties.opacity));
    }

    crate::impl_layer_visibility!(properties);

    fn on_add(&mut self, map: &mut Map) -> Result<()> {
        if let Some(labels) = &self.labels {
            map.add_layer(Box::new(labels.clone()))?;
        }

        if self.options.on_click.is_some() {
            self.subscribe(LayerEventKind::Click, Listener::Click);
        }
        if self.options.on_right_click.is_some() {
            self.subscribe(LayerEventKind::ContextMenu, Listener::RightClick);
        }
        if self.options.highlight_style.is_some() {
            self.subscribe(LayerEventKind::MouseOver, Listener::HoverEnter);
            self.subscribe(LayerEventKind::MouseOut, Listener::HoverExit);
        }

        self.fire(&mut LayerEvent::new(LayerEventKind::Ready));
        Ok(())
    }

    fn on_remove(&mut self, map: &mut Map) -> Result<()> {
        if let Some(labels) = &self.labels {
            map.remove_layer(labels.id())?;
        }

        for (kind, id) in self.subscriptions.drain(..) {
            self.events.off(&kind, id);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &mut LayerEvent) -> Result<()> {
        self.fire(event);
        Ok(())
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        let mut bounds = LatLngBounds::empty();
        for shape in &self.shapes {
            bounds.extend_bounds(&shape.bounds());
        }
        bounds.is_valid().then_some(bounds)
    }

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "type": self.properties.layer_type.to_string(),
            "index": self.properties.index,
            "label": self.options.label,
            "featureCount": self.shapes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::geo::LatLng,
        data::geojson::Geometry,
        input::events::PointerEvent,
    };
    use serde_json::json;
    use std::sync::Mutex;

    fn point(id: &str, lng: f64, lat: f64) -> Feature {
        Feature::new(id, Geometry::Point { coordinates: [lng, lat] }).with_property("name", id)
    }

    fn square(id: &str) -> Feature {
        Feature::new(
            id,
            Geometry::Polygon {
                coordinates: vec![vec![
                    [0.0, 0.0],
                    [10.0, 0.0],
                    [10.0, 10.0],
                    [0.0, 10.0],
                    [0.0, 0.0],
                ]],
            },
        )
        .with_property("name", id)
    }

    fn layer(options: VectorLayerOptions) -> VectorLayer {
        VectorLayer::new("test".to_string(), "Test".to_string(), options).unwrap()
    }

    #[test]
    fn test_vector_layer_creation() {
        let layer = layer(VectorLayerOptions::default());
        assert_eq!(layer.id(), "test");
        assert_eq!(layer.name(), "Test");
        assert_eq!(layer.layer_type(), LayerType::Vector);
        assert_eq!(layer.feature_count(), 0);
        assert!(layer.labels().is_none());
        assert!(layer.bounds().is_none());
    }

    #[test]
    fn test_point_becomes_circle_marker_with_layer_style() {
        let mut layer = layer(VectorLayerOptions {
            pane: Some("dots".to_string()),
            ..Default::default()
        });
        layer.add_feature(point("a", -11.5, 8.0)).unwrap();

        let shape = layer.find_by_id(&"a".into()).unwrap();
        assert_eq!(shape.lat_lng(), LatLng::new(8.0, -11.5));
        assert_eq!(shape.style().weight, Some(1.0));
        assert_eq!(shape.style().pane.as_deref(), Some("dots"));
    }

    #[test]
    fn test_label_tooltip_and_popup() {
        let mut layer = layer(VectorLayerOptions {
            label: Some("{name}".to_string()),
            popup: Some(PopupContent::Template("<b>{name}</b>".to_string())),
            ..Default::default()
        });
        layer.add_feature(point("Bo", -11.5, 8.0)).unwrap();
        layer.add_feature(square("Kenema")).unwrap();

        let labels = layer.labels().unwrap();
        assert_eq!(labels.margin(), 2.0);
        let bo = labels.get(&"Bo".into()).unwrap();
        assert_eq!(bo.text, "Bo");
        assert_eq!(bo.position, LabelPosition::Below);
        assert_eq!(bo.pane, "markerPane");
        assert_eq!(
            labels.get(&"Kenema".into()).unwrap().position,
            LabelPosition::Middle
        );

        let shape = layer.find_by_id(&"Bo".into()).unwrap();
        let tooltip = shape.tooltip().unwrap();
        assert_eq!(tooltip.text, "Bo");
        assert!(tooltip.sticky);
        assert_eq!(shape.popup(), Some("<b>Bo</b>"));
    }

    #[test]
    fn test_hover_label_wins_for_tooltip() {
        let mut layer = layer(VectorLayerOptions {
            label: Some("{name}".to_string()),
            hover_label: Some("{name}: {value}".to_string()),
            popup: Some(PopupContent::Callback(Arc::new(|f: &Feature| f.id.to_string()))),
            ..Default::default()
        });
        layer
            .add_feature(point("a", 0.0, 0.0).with_property("value", 3))
            .unwrap();

        let shape = layer.find_by_id(&"a".into()).unwrap();
        assert_eq!(shape.tooltip().unwrap().text, "a: 3");
        assert_eq!(shape.popup(), None);
    }

    #[test]
    fn test_label_color_from_feature_style() {
        let mut layer = layer(VectorLayerOptions {
            label: Some("{name}".to_string()),
            label_style: serde_json::from_value(json!({ "color": "#333", "fontSize": "11px" }))
                .unwrap(),
            label_pane: Some("labels".to_string()),
            ..Default::default()
        });
        layer
            .add_feature(square("a").with_property("style", json!({ "color": "#f00" })))
            .unwrap();
        layer.add_feature(square("b")).unwrap();

        let labels = layer.labels().unwrap();
        let a = labels.get(&"a".into()).unwrap();
        assert_eq!(a.style.color.as_deref(), Some("#f00"));
        assert_eq!(a.style.extra.get("fontSize"), Some(&json!("11px")));
        assert_eq!(a.pane, "labels");
        assert_eq!(
            labels.get(&"b".into()).unwrap().style.color.as_deref(),
            Some("#333")
        );
    }

    #[test]
    fn test_line_feature_gets_tooltip_but_no_label() {
        let mut layer = layer(VectorLayerOptions {
            label: Some("{name}".to_string()),
            ..Default::default()
        });
        let line = Feature::new(
            "road",
            Geometry::LineString {
                coordinates: vec![[0.0, 0.0], [1.0, 1.0]],
            },
        )
        .with_property("name", "A1");
        layer.add_feature(line).unwrap();

        assert!(layer.labels().unwrap().is_empty());
        assert_eq!(
            layer.find_by_id(&"road".into()).unwrap().tooltip().unwrap().text,
            "A1"
        );
    }

    #[test]
    fn test_missing_template_key_fails_add() {
        let mut layer = layer(VectorLayerOptions {
            label: Some("{missing}".to_string()),
            ..Default::default()
        });
        assert!(layer.add_feature(point("a", 0.0, 0.0)).is_err());
        assert_eq!(layer.feature_count(), 0);
    }

    #[test]
    fn test_unsupported_geometry_fails_add() {
        let mut layer = layer(VectorLayerOptions::default());
        let feature = Feature::new(
            "m",
            Geometry::MultiPoint {
                coordinates: vec![[0.0, 0.0]],
            },
        );
        assert!(layer.add_feature(feature).is_err());
    }

    #[test]
    fn test_duplicate_id_overwrites_in_place() {
        let mut layer = layer(VectorLayerOptions {
            label: Some("{name}".to_string()),
            ..Default::default()
        });
        layer.add_feature(point("a", 1.0, 1.0)).unwrap();
        layer.add_feature(point("b", 2.0, 2.0)).unwrap();
        layer
            .add_feature(point("a", 3.0, 3.0).with_property("name", "A"))
            .unwrap();

        assert_eq!(layer.feature_count(), 2);
        assert_eq!(layer.shapes()[0].lat_lng(), LatLng::new(3.0, 3.0));
        assert_eq!(layer.labels().unwrap().len(), 2);
        assert_eq!(layer.labels().unwrap().get(&"a".into()).unwrap().text, "A");
    }

    #[test]
    fn test_remove_feature_drops_label() {
        let mut layer = layer(VectorLayerOptions {
            label: Some("{name}".to_string()),
            ..Default::default()
        });
        layer.add_feature(point("a", 1.0, 1.0)).unwrap();

        assert!(layer.remove_feature(&"a".into()).is_some());
        assert!(layer.remove_feature(&"a".into()).is_none());
        assert!(layer.labels().unwrap().is_empty());
    }

    #[test]
    fn test_set_opacity() {
        let mut layer = layer(VectorLayerOptions::default());
        layer.add_feature(point("a", 1.0, 1.0)).unwrap();
        layer.set_opacity(0.5);

        let style = layer.find_by_id(&"a".into()).unwrap().style();
        assert_eq!(style.opacity, Some(0.5));
        assert_eq!(style.fill_opacity, Some(0.5));
        assert_eq!(style.weight, Some(1.0));
    }

    #[test]
    fn test_bounds_cover_all_shapes() {
        let mut layer = layer(VectorLayerOptions::default());
        layer.add_feature(point("a", -5.0, 20.0)).unwrap();
        layer.add_feature(square("b")).unwrap();

        assert_eq!(
            layer.bounds(),
            Some(LatLngBounds::from_coords(0.0, -5.0, 20.0, 10.0))
        );
    }

    #[test]
    fn test_click_without_subscription_is_ignored() {
        let clicks = Arc::new(Mutex::new(Vec::new()));
        let sink = clicks.clone();
        let mut layer = layer(VectorLayerOptions {
            on_click: Some(Arc::new(move |event: ClickEvent| {
                sink.lock().unwrap().push(event)
            })),
            ..Default::default()
        });
        layer.add_feature(point("a", 1.0, 2.0)).unwrap();

        let mut event = LayerEvent::click("a", LatLng::new(2.0, 1.0));
        layer.fire(&mut event);

        assert!(clicks.lock().unwrap().is_empty());
        assert!(!event.is_propagation_stopped());
    }

    #[test]
    fn test_external_listener_on_off() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut layer = layer(VectorLayerOptions::default());
        let id = layer.on(LayerEventKind::ContextMenu, move |event| {
            sink.lock().unwrap().push(event.kind)
        });

        let mut event = LayerEvent::context_menu("a", LatLng::default(), PointerEvent::new(1.0, 2.0));
        layer.fire(&mut event);
        assert!(layer.off(LayerEventKind::ContextMenu, id));
        layer.fire(&mut event);

        assert_eq!(*seen.lock().unwrap(), vec![LayerEventKind::ContextMenu]);
    }

    #[test]
    fn test_options_from_config() {
        let config: LayerConfig = serde_json::from_value(json!({
            "type": "boundary",
            "label": "{name}",
            "highlightStyle": false,
            "style": { "color": "#333", "weight": 2 },
            "index": 3,
            "popup": "{name}",
            "data": [{
                "type": "Feature",
                "id": "a",
                "geometry": { "type": "Point", "coordinates": [1.0, 2.0] },
                "properties": { "name": "A" }
            }]
        }))
        .unwrap();
        let options = VectorLayerOptions::from_config(&config.on_click(|_| {})).unwrap();

        assert!(options.highlight_style.is_none());
        assert_eq!(options.style.weight, Some(2.0));
        assert_eq!(options.reset_style.weight, Some(1.0));
        assert_eq!(options.index, Some(3));
        assert!(matches!(options.popup, Some(PopupContent::Template(_))));
        assert!(options.on_click.is_some());
        assert_eq!(options.data.as_ref().map(FeatureCollection::len), Some(1));

        let layer = VectorLayer::new("b".to_string(), "B".to_string(), options).unwrap();
        assert_eq!(layer.feature_count(), 1);
        assert_eq!(layer.index(), Some(3));
    }
}
