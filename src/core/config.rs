//! Map, layer and control configuration
//!
//! Everything here deserializes from the camelCase JSON a dashboard host
//! sends. Layer and control configs keep their type-specific options as a
//! free-form map that each factory reads what it needs from.

use crate::{
    controls::ControlPosition,
    core::constants::{DEFAULT_CLASS_NAME, DEFAULT_ICON_IMAGE_PATH},
    layers::vector::{ClickEvent, ClickHandler, RightClickEvent, RightClickHandler},
    Error, Result,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};
use std::{fmt, sync::Arc};

/// Options of a dashboard map
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapOptions {
    /// Class added to the map container
    pub class_name: String,
    pub dragging: bool,
    pub scroll_wheel_zoom: bool,
    pub double_click_zoom: bool,
    pub keyboard: bool,
    pub min_zoom: Option<f64>,
    pub max_zoom: Option<f64>,
    pub attribution_control: bool,
    pub zoom_control: bool,
    /// Initial view as `[[lat, lng], [lat, lng]]`
    pub bounds: Option<[[f64; 2]; 2]>,
    /// Controls added when the map is built
    pub controls: Vec<ControlConfig>,
    /// Layers added when the map is built
    pub layers: Vec<LayerConfig>,
    /// Where default marker icons are served from
    pub icon_image_path: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            class_name: DEFAULT_CLASS_NAME.to_string(),
            dragging: true,
            scroll_wheel_zoom: true,
            double_click_zoom: true,
            keyboard: true,
            min_zoom: Some(0.0),
            max_zoom: Some(20.0),
            attribution_control: true,
            zoom_control: false,
            bounds: None,
            controls: Vec::new(),
            layers: Vec::new(),
            icon_image_path: DEFAULT_ICON_IMAGE_PATH.to_string(),
        }
    }
}

impl MapOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json).map_err(Error::Serialization)?)
    }
}

/// Callbacks a host attaches to a layer config in code
#[derive(Clone, Default)]
pub struct LayerHandlers {
    pub on_click: Option<ClickHandler>,
    pub on_right_click: Option<RightClickHandler>,
}

impl fmt::Debug for LayerHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerHandlers")
            .field("on_click", &self.on_click.is_some())
            .field("on_right_click", &self.on_right_click.is_some())
            .finish()
    }
}

/// Descriptor of a layer to be built by a registered factory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerConfig {
    #[serde(rename = "type")]
    pub layer_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub base_layer: bool,
    #[serde(default)]
    pub overlay: bool,
    /// Type-specific options
    #[serde(flatten)]
    pub options: JsonMap<String, Value>,
    #[serde(skip)]
    pub handlers: LayerHandlers,
}

impl LayerConfig {
    pub fn new(layer_type: &str) -> Self {
        Self {
            layer_type: layer_type.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn as_base_layer(mut self) -> Self {
        self.base_layer = true;
        self
    }

    pub fn as_overlay(mut self) -> Self {
        self.overlay = true;
        self
    }

    pub fn with_option<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(ClickEvent) + Send + Sync + 'static,
    {
        self.handlers.on_click = Some(Arc::new(handler));
        self
    }

    pub fn on_right_click<F>(mut self, handler: F) -> Self
    where
        F: Fn(RightClickEvent) + Send + Sync + 'static,
    {
        self.handlers.on_right_click = Some(Arc::new(handler));
        self
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key).filter(|value| !value.is_null())
    }

    /// Reads a typed option; a present but malformed value is an error
    pub fn option_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.option(key) {
            Some(value) => Ok(Some(
                serde_json::from_value(value.clone()).map_err(Error::Serialization)?,
            )),
            None => Ok(None),
        }
    }

    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.option(key).and_then(Value::as_str)
    }

    pub fn option_f64(&self, key: &str) -> Option<f64> {
        self.option(key).and_then(Value::as_f64)
    }
}

/// Descriptor of a control to be built by a registered factory or a built-in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlConfig {
    #[serde(rename = "type")]
    pub control_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<ControlPosition>,
    #[serde(flatten)]
    pub options: JsonMap<String, Value>,
}

impl ControlConfig {
    pub fn new(control_type: &str) -> Self {
        Self {
            control_type: control_type.to_string(),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: ControlPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_option<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    pub fn option_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.options.get(key).filter(|value| !value.is_null()) {
            Some(value) => Ok(Some(
                serde_json::from_value(value.clone()).map_err(Error::Serialization)?,
            )),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_options_defaults() {
        let options = MapOptions::default();
        assert_eq!(options.class_name, "leaflet-dhis2");
        assert!(!options.zoom_control);
        assert!(options.attribution_control);
        assert_eq!(options.icon_image_path, "/images/");
        assert!(options.layers.is_empty());
    }

    #[test]
    fn test_map_options_from_json() {
        let options = MapOptions::from_json(
            r#"{
                "bounds": [[6.9679, -13.29096], [9.9432, -10.4887]],
                "maxZoom": 18,
                "controls": [{ "type": "fitBounds" }],
                "layers": [{ "type": "tileLayer", "name": "OSM", "baseLayer": true, "url": "x" }]
            }"#,
        )
        .unwrap();

        assert_eq!(options.bounds, Some([[6.9679, -13.29096], [9.9432, -10.4887]]));
        assert_eq!(options.max_zoom, Some(18.0));
        assert_eq!(options.class_name, "leaflet-dhis2");
        assert_eq!(options.controls[0].control_type, "fitBounds");
        assert!(options.layers[0].base_layer);
        assert_eq!(options.layers[0].option_str("url"), Some("x"));
    }

    #[test]
    fn test_layer_config_flattened_options() {
        let config: LayerConfig = serde_json::from_value(json!({
            "type": "circles",
            "id": "c1",
            "radius": 500,
            "style": null,
        }))
        .unwrap();

        assert_eq!(config.layer_type, "circles");
        assert_eq!(config.id.as_deref(), Some("c1"));
        assert!(!config.base_layer && !config.overlay);
        assert_eq!(config.option_f64("radius"), Some(500.0));
        assert!(config.option("style").is_none());
        assert!(config.option_as::<f64>("missing").unwrap().is_none());
        assert!(config.option_as::<String>("radius").is_err());
    }

    #[test]
    fn test_layer_handlers_are_not_serialized() {
        let config = LayerConfig::new("boundary").on_click(|_| {});
        assert!(config.handlers.on_click.is_some());

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json, json!({ "type": "boundary", "baseLayer": false, "overlay": false }));
    }
}
