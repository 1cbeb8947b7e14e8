//! Thematic and boundary layers of colored polygons

use crate::{
    core::config::LayerConfig,
    data::geojson::Feature,
    layers::{
        base::LayerType,
        shape::{DefaultShapeFactory, ShapeFactory, ShapeKind},
        style::PathStyle,
        vector::{VectorLayer, VectorLayerOptions},
    },
    Result,
};
use serde_json::Value;
use std::sync::Arc;

/// Where a polygon takes its color from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSource {
    /// `properties.color`, set by the thematic classification
    Property,
    /// `properties.style.color`, set per boundary level
    StyleProperty,
}

/// Polygons colored per feature, with the layer `opacity` as fill opacity
#[derive(Debug, Clone)]
pub struct PolygonFactory {
    pub color_source: ColorSource,
    pub opacity: Option<f64>,
}

impl PolygonFactory {
    fn feature_color<'a>(&self, feature: &'a Feature) -> Option<&'a str> {
        match self.color_source {
            ColorSource::Property => feature.property("color").and_then(Value::as_str),
            ColorSource::StyleProperty => feature.style_color(),
        }
    }
}

impl ShapeFactory for PolygonFactory {
    fn create_shape(&self, feature: &Feature, style: &PathStyle) -> Option<(ShapeKind, PathStyle)> {
        let (kind, mut style) = DefaultShapeFactory.create_shape(feature, style)?;

        if let Some(color) = self.feature_color(feature) {
            style.color = Some(color.to_string());
        }
        if matches!(kind, ShapeKind::Polygon { .. }) {
            if let Some(opacity) = self.opacity {
                style.fill_opacity = Some(opacity);
            }
        }

        Some((kind, style))
    }
}

fn build(
    id: String,
    name: String,
    config: &LayerConfig,
    layer_type: LayerType,
    color_source: ColorSource,
) -> Result<VectorLayer> {
    let options = VectorLayerOptions::from_config(config)?;
    let factory = PolygonFactory {
        color_source,
        opacity: config.option_f64("opacity"),
    };

    VectorLayer::with_factory(id, name, layer_type, options, Arc::new(factory))
}

/// Builds a choropleth (thematic) layer from its config
pub fn choropleth_from_config(id: String, name: String, config: &LayerConfig) -> Result<VectorLayer> {
    build(id, name, config, LayerType::Choropleth, ColorSource::Property)
}

/// Builds a boundary layer from its config
pub fn boundary_from_config(id: String, name: String, config: &LayerConfig) -> Result<VectorLayer> {
    build(id, name, config, LayerType::Boundary, ColorSource::StyleProperty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::LatLng, data::geojson::FeatureId, layers::base::LayerTrait};
    use serde_json::json;

    fn districts() -> Value {
        json!([
            {
                "type": "Feature",
                "id": "bo",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-12.0, 7.0], [-11.0, 7.0], [-11.0, 8.0], [-12.0, 8.0], [-12.0, 7.0]]]
                },
                "properties": { "name": "Bo", "color": "#fd8d3c", "style": { "color": "#333" } }
            },
            {
                "type": "Feature",
                "id": "kailahun",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-11.0, 8.0], [-10.0, 8.0], [-10.0, 9.0], [-11.0, 8.0]]]
                },
                "properties": { "name": "Kailahun" }
            }
        ])
    }

    #[test]
    fn test_choropleth_colors() {
        let config = LayerConfig::new("choropleth")
            .with_option("data", districts())
            .with_option("opacity", 0.8)
            .with_option("style", json!({ "color": "#fff", "weight": 1 }));
        let layer = choropleth_from_config("t".to_string(), "Thematic".to_string(), &config).unwrap();

        assert_eq!(layer.layer_type(), LayerType::Choropleth);
        let bo = layer.find_by_id(&FeatureId::from("bo")).unwrap();
        assert_eq!(bo.style().color.as_deref(), Some("#fd8d3c"));
        assert_eq!(bo.style().fill_opacity, Some(0.8));

        // No feature color falls back to the layer color
        let kailahun = layer.find_by_id(&FeatureId::from("kailahun")).unwrap();
        assert_eq!(kailahun.style().color.as_deref(), Some("#fff"));
    }

    #[test]
    fn test_boundary_uses_style_color() {
        let config = LayerConfig::new("boundary").with_option("data", districts());
        let layer = boundary_from_config("b".to_string(), "Boundaries".to_string(), &config).unwrap();

        assert_eq!(layer.layer_type(), LayerType::Boundary);
        let bo = layer.find_by_id(&FeatureId::from("bo")).unwrap();
        assert_eq!(bo.style().color.as_deref(), Some("#333"));
        assert_eq!(bo.style().fill_opacity, None);
    }

    #[test]
    fn test_polygon_lat_lng_is_bounds_center() {
        let config = LayerConfig::new("choropleth").with_option("data", districts());
        let layer = choropleth_from_config("t".to_string(), "Thematic".to_string(), &config).unwrap();

        let bo = layer.find_by_id(&FeatureId::from("bo")).unwrap();
        assert_eq!(bo.lat_lng(), LatLng::new(7.5, -11.5));
    }
}
