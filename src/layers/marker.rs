use crate::{
    core::{
        config::LayerConfig,
        constants::{DEFAULT_ICON_IMAGE_PATH, MARKER_ICON_SIZE},
        geo::LatLng,
    },
    data::geojson::{Feature, Geometry},
    layers::{
        base::LayerType,
        shape::{DefaultShapeFactory, Icon, ShapeFactory, ShapeKind},
        style::PathStyle,
        vector::{VectorLayer, VectorLayerOptions},
    },
    Result,
};
use serde_json::Value;
use std::sync::Arc;

const DEFAULT_DOT_RADIUS: f64 = 6.0;
const DEFAULT_DOT_COLOR: &str = "#333";

/// Icon markers for points. A feature can bring its own icon through
/// `properties.icon`; everything else gets the layer icon.
#[derive(Debug, Clone)]
pub struct MarkerFactory {
    pub icon: Icon,
}

impl MarkerFactory {
    /// Factory using the stock marker image under `icon_image_path`
    pub fn with_image_path(icon_image_path: &str) -> Self {
        Self {
            icon: Icon {
                icon_url: format!("{}marker-icon.png", icon_image_path),
                icon_size: MARKER_ICON_SIZE,
            },
        }
    }
}

impl Default for MarkerFactory {
    fn default() -> Self {
        Self::with_image_path(DEFAULT_ICON_IMAGE_PATH)
    }
}

impl ShapeFactory for MarkerFactory {
    fn create_shape(&self, feature: &Feature, style: &PathStyle) -> Option<(ShapeKind, PathStyle)> {
        match &feature.geometry {
            Geometry::Point { coordinates } => {
                let icon = feature
                    .property("icon")
                    .and_then(|value| serde_json::from_value::<Icon>(value.clone()).ok())
                    .unwrap_or_else(|| self.icon.clone());

                Some((
                    ShapeKind::Marker {
                        position: LatLng::from_lng_lat(*coordinates),
                        icon: Some(icon),
                    },
                    style.clone(),
                ))
            }
            _ => DefaultShapeFactory.create_shape(feature, style),
        }
    }
}

/// Small filled circle markers, colored per feature when it has a color
#[derive(Debug, Clone)]
pub struct DotFactory {
    pub radius: f64,
    pub color: String,
}

impl Default for DotFactory {
    fn default() -> Self {
        Self {
            radius: DEFAULT_DOT_RADIUS,
            color: DEFAULT_DOT_COLOR.to_string(),
        }
    }
}

impl ShapeFactory for DotFactory {
    fn create_shape(&self, feature: &Feature, style: &PathStyle) -> Option<(ShapeKind, PathStyle)> {
        let (kind, mut style) = DefaultShapeFactory.create_shape(feature, style)?;

        let color = feature
            .property("color")
            .and_then(Value::as_str)
            .unwrap_or(&self.color);
        style.color = Some(color.to_string());
        style.fill_color = Some(color.to_string());
        if matches!(kind, ShapeKind::CircleMarker { .. }) {
            style.radius = Some(self.radius);
        }

        Some((kind, style))
    }
}

/// Builds a markers layer from its config
pub fn markers_from_config(
    id: String,
    name: String,
    config: &LayerConfig,
    icon_image_path: &str,
) -> Result<VectorLayer> {
    let options = VectorLayerOptions::from_config(config)?;
    let mut factory = MarkerFactory::with_image_path(icon_image_path);
    if let Some(icon) = config.option_as::<Icon>("icon")? {
        factory.icon = icon;
    }

    VectorLayer::with_factory(id, name, LayerType::Markers, options, Arc::new(factory))
}

/// Builds a dots layer from its config
pub fn dots_from_config(id: String, name: String, config: &LayerConfig) -> Result<VectorLayer> {
    let mut options = VectorLayerOptions::from_config(config)?;
    if config.option("style").is_none() {
        options.style = PathStyle::new().with_weight(1.0).with_fill_opacity(1.0);
    }

    let mut factory = DotFactory::default();
    if let Some(radius) = config.option_f64("radius") {
        factory.radius = radius;
    }
    if let Some(color) = config.option_str("color") {
        factory.color = color.to_string();
    }

    VectorLayer::with_factory(id, name, LayerType::Dots, options, Arc::new(factory))
}
