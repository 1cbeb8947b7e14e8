//! Circular areas of a fixed radius around point features
//!
//! Used to show the catchment area around facilities. Each point becomes a
//! circle sized in meters, so it scales with the map.

use crate::{
    core::{
        config::LayerConfig,
        constants::{DEFAULT_CIRCLE_OPACITY_FACTOR, DEFAULT_CIRCLE_RADIUS},
        geo::LatLng,
    },
    data::geojson::{Feature, Geometry},
    layers::{
        base::LayerType,
        shape::{DefaultShapeFactory, ShapeFactory, ShapeKind},
        style::PathStyle,
        vector::{VectorLayer, VectorLayerOptions},
    },
    Result,
};
use std::sync::Arc;

/// Circles of `radius` meters for points, paths for everything else
#[derive(Debug, Clone, Copy)]
pub struct CircleFactory {
    pub radius: f64,
}

impl Default for CircleFactory {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CIRCLE_RADIUS,
        }
    }
}

impl ShapeFactory for CircleFactory {
    fn create_shape(&self, feature: &Feature, style: &PathStyle) -> Option<(ShapeKind, PathStyle)> {
        match &feature.geometry {
            Geometry::Point { coordinates } => Some((
                ShapeKind::Circle {
                    center: LatLng::from_lng_lat(*coordinates),
                    radius: self.radius,
                },
                style.clone(),
            )),
            _ => DefaultShapeFactory.create_shape(feature, style),
        }
    }
}

pub fn default_style() -> PathStyle {
    PathStyle::new().with_color("#95c8fb").with_weight(1.0)
}

/// Builds a circles layer from its config
pub fn from_config(id: String, name: String, config: &LayerConfig) -> Result<VectorLayer> {
    let radius = config.option_f64("radius").unwrap_or(DEFAULT_CIRCLE_RADIUS);

    let mut options = VectorLayerOptions::from_config(config)?;
    if config.option("style").is_none() {
        options.style = default_style();
    }
    if config.option("opacityFactor").is_none() {
        options.opacity_factor = DEFAULT_CIRCLE_OPACITY_FACTOR;
    }

    VectorLayer::with_factory(
        id,
        name,
        LayerType::Circles,
        options,
        Arc::new(CircleFactory { radius }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::base::LayerTrait;
    use serde_json::json;

    fn facilities() -> serde_json::Value {
        json!([
            {
                "type": "Feature",
                "id": "ke1",
                "geometry": { "type": "Point", "coordinates": [-11.75, 8.45] },
                "properties": { "name": "Ngelehun CHC" }
            }
        ])
    }

    #[test]
    fn test_circles_defaults() {
        let config = LayerConfig::new("circles").with_option("data", facilities());
        let layer = from_config("c".to_string(), "Circles".to_string(), &config).unwrap();

        assert_eq!(layer.layer_type(), LayerType::Circles);
        let shape = &layer.shapes()[0];
        assert_eq!(
            shape.kind(),
            &ShapeKind::Circle {
                center: LatLng::new(8.45, -11.75),
                radius: 1000.0
            }
        );
        assert_eq!(shape.style().color.as_deref(), Some("#95c8fb"));
        assert_eq!(shape.style().weight, Some(1.0));
    }

    #[test]
    fn test_circles_opacity_uses_factor() {
        let config = LayerConfig::new("circles")
            .with_option("data", facilities())
            .with_option("radius", 5000);
        let mut layer = from_config("c".to_string(), "Circles".to_string(), &config).unwrap();

        layer.set_opacity(0.5);
        let style = layer.shapes()[0].style();
        assert_eq!(style.opacity, Some(0.5));
        assert_eq!(style.fill_opacity, Some(0.1));
        assert!(matches!(
            layer.shapes()[0].kind(),
            ShapeKind::Circle { radius, .. } if *radius == 5000.0
        ));
    }

    #[test]
    fn test_configured_style_replaces_default() {
        let config = LayerConfig::new("circles")
            .with_option("data", facilities())
            .with_option("style", json!({ "color": "#000" }));
        let layer = from_config("c".to_string(), "Circles".to_string(), &config).unwrap();

        let style = layer.shapes()[0].style();
        assert_eq!(style.color.as_deref(), Some("#000"));
        assert_eq!(style.weight, None);
    }
}
