use crate::core::geo::LatLngBounds;

// LayerTrait is now unified with LayerOperations in shared traits
pub use crate::traits::LayerOperations as LayerTrait;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Tile,
    Google,
    Vector,
    Boundary,
    Choropleth,
    Markers,
    Dots,
    Circles,
    Labels,
    Custom,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Tile => write!(f, "tileLayer"),
            LayerType::Google => write!(f, "googleLayer"),
            LayerType::Vector => write!(f, "vector"),
            LayerType::Boundary => write!(f, "boundary"),
            LayerType::Choropleth => write!(f, "choropleth"),
            LayerType::Markers => write!(f, "markers"),
            LayerType::Dots => write!(f, "dots"),
            LayerType::Circles => write!(f, "circles"),
            LayerType::Labels => write!(f, "labels"),
            LayerType::Custom => write!(f, "custom"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
    pub opacity: f32,
    pub visible: bool,
    pub interactive: bool,
    pub index: Option<i32>,
    pub options: serde_json::Value,
}

impl LayerProperties {
    pub fn new(id: String, name: String, layer_type: LayerType) -> Self {
        Self {
            id,
            name,
            layer_type,
            z_index: 0,
            opacity: 1.0,
            visible: true,
            interactive: true,
            index: None,
            options: serde_json::Value::Null,
        }
    }

    pub fn with_index(mut self, index: Option<i32>) -> Self {
        self.index = index;
        self
    }
}

impl Default for LayerProperties {
    fn default() -> Self {
        Self::new(
            "default".to_string(),
            "Default Layer".to_string(),
            LayerType::Custom,
        )
    }
}

/// A layer with no content of its own, optionally covering fixed bounds.
///
/// Hosts use it for pre-built layers that only need to take part in layer
/// ordering and combined bounds.
pub struct BaseLayer {
    pub properties: LayerProperties,
    pub extent: Option<LatLngBounds>,
}

impl BaseLayer {
    pub fn new(properties: LayerProperties) -> Self {
        Self {
            properties,
            extent: None,
        }
    }

    pub fn with_extent(mut self, extent: LatLngBounds) -> Self {
        self.extent = Some(extent);
        self
    }
}

impl LayerTrait for BaseLayer {
    crate::impl_layer_trait!(BaseLayer, properties);

    fn bounds(&self) -> Option<LatLngBounds> {
        self.extent.clone()
    }

    fn options(&self) -> serde_json::Value {
        self.properties.options.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new(
            "test".to_string(),
            "Test Layer".to_string(),
            LayerType::Vector,
        );

        assert_eq!(props.id, "test");
        assert_eq!(props.name, "Test Layer");
        assert_eq!(props.layer_type, LayerType::Vector);
        assert_eq!(props.z_index, 0);
        assert_eq!(props.opacity, 1.0);
        assert_eq!(props.index, None);
        assert!(props.visible);
    }

    #[test]
    fn test_base_layer() {
        let props = LayerProperties::new(
            "base".to_string(),
            "Base Layer".to_string(),
            LayerType::Custom,
        )
        .with_index(Some(2));
        let mut layer = BaseLayer::new(props);

        assert_eq!(layer.id(), "base");
        assert_eq!(layer.index(), Some(2));
        assert_eq!(layer.opacity(), 1.0);
        assert!(layer.bounds().is_none());

        layer.set_opacity(1.5);
        assert_eq!(layer.opacity(), 1.0);

        layer.set_visible(false);
        assert!(!layer.is_visible());
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Tile.to_string(), "tileLayer");
        assert_eq!(LayerType::Circles.to_string(), "circles");
        assert_eq!(LayerType::Markers.to_string(), "markers");
    }
}
