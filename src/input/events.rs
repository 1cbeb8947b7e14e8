use crate::{
    core::geo::{LatLng, Point},
    data::geojson::FeatureId,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// The raw pointer event behind an interaction
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    /// Vertical position relative to the whole document, when the host knows it
    pub page_y: Option<f64>,
    pub button: MouseButton,
    propagation_stopped: bool,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            page_y: None,
            button: MouseButton::Left,
            propagation_stopped: false,
        }
    }

    pub fn with_page_y(mut self, page_y: f64) -> Self {
        self.page_y = Some(page_y);
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Keeps the event from reaching the elements around the map
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Interaction kinds a layer can listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerEventKind {
    Click,
    ContextMenu,
    MouseOver,
    MouseOut,
    Ready,
}

impl LayerEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerEventKind::Click => "click",
            LayerEventKind::ContextMenu => "contextmenu",
            LayerEventKind::MouseOver => "mouseover",
            LayerEventKind::MouseOut => "mouseout",
            LayerEventKind::Ready => "ready",
        }
    }
}

impl fmt::Display for LayerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An interaction dispatched to a layer, optionally targeting one feature
#[derive(Debug, Clone, PartialEq)]
pub struct LayerEvent {
    pub kind: LayerEventKind,
    pub feature_id: Option<FeatureId>,
    pub lat_lng: Option<LatLng>,
    pub original_event: Option<PointerEvent>,
    propagation_stopped: bool,
}

impl LayerEvent {
    pub fn new(kind: LayerEventKind) -> Self {
        Self {
            kind,
            feature_id: None,
            lat_lng: None,
            original_event: None,
            propagation_stopped: false,
        }
    }

    pub fn click(feature_id: impl Into<FeatureId>, lat_lng: LatLng) -> Self {
        Self::new(LayerEventKind::Click)
            .on_feature(feature_id)
            .at(lat_lng)
    }

    pub fn context_menu(
        feature_id: impl Into<FeatureId>,
        lat_lng: LatLng,
        pointer: PointerEvent,
    ) -> Self {
        Self::new(LayerEventKind::ContextMenu)
            .on_feature(feature_id)
            .at(lat_lng)
            .with_pointer(pointer)
    }

    pub fn on_feature(mut self, feature_id: impl Into<FeatureId>) -> Self {
        self.feature_id = Some(feature_id.into());
        self
    }

    pub fn at(mut self, lat_lng: LatLng) -> Self {
        self.lat_lng = Some(lat_lng);
        self
    }

    pub fn with_pointer(mut self, pointer: PointerEvent) -> Self {
        self.original_event = Some(pointer);
        self
    }

    /// Stops the event from bubbling to the map and the page
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
        if let Some(pointer) = self.original_event.as_mut() {
            pointer.stop_propagation();
        }
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Map event types that can be emitted by the map
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Map view has changed (center or zoom)
    ViewChanged { center: LatLng, zoom: f64 },
    /// A click that no layer stopped
    Click { lat_lng: Option<LatLng> },
    /// A right click that no layer stopped
    ContextMenu { lat_lng: Option<LatLng> },
    /// Pointer pressed on the map
    MouseDown { position: Point },
    /// Layer was added to the map
    LayerAdd { layer_id: String },
    /// Layer was removed from the map
    LayerRemove { layer_id: String },
    /// Control was added to the map
    ControlAdd { control_id: String },
    /// Control was removed from the map
    ControlRemove { control_id: String },
}

impl MapEvent {
    /// Name listeners register under
    pub fn event_type(&self) -> &'static str {
        match self {
            MapEvent::ViewChanged { .. } => "viewchanged",
            MapEvent::Click { .. } => "click",
            MapEvent::ContextMenu { .. } => "contextmenu",
            MapEvent::MouseDown { .. } => "mousedown",
            MapEvent::LayerAdd { .. } => "layeradd",
            MapEvent::LayerRemove { .. } => "layerremove",
            MapEvent::ControlAdd { .. } => "controladd",
            MapEvent::ControlRemove { .. } => "controlremove",
        }
    }

    /// Id of the layer a layer event is about
    pub fn layer_id(&self) -> Option<&str> {
        match self {
            MapEvent::LayerAdd { layer_id } | MapEvent::LayerRemove { layer_id } => Some(layer_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_propagation_reaches_pointer() {
        let mut event = LayerEvent::context_menu(
            "a",
            LatLng::new(8.0, -11.0),
            PointerEvent::new(10.0, 20.0).with_page_y(320.0),
        );
        assert!(!event.is_propagation_stopped());

        event.stop_propagation();
        assert!(event.is_propagation_stopped());
        assert!(event
            .original_event
            .as_ref()
            .is_some_and(|pointer| pointer.is_propagation_stopped()));
    }

    #[test]
    fn test_event_names() {
        assert_eq!(LayerEventKind::ContextMenu.to_string(), "contextmenu");
        assert_eq!(LayerEventKind::MouseOut.as_str(), "mouseout");
        assert_eq!(
            MapEvent::LayerAdd {
                layer_id: "x".to_string()
            }
            .event_type(),
            "layeradd"
        );
        assert_eq!(MapEvent::Click { lat_lng: None }.layer_id(), None);
    }
}
