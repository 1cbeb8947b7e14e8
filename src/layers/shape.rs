use crate::{
    core::geo::{LatLng, LatLngBounds},
    data::geojson::{Feature, FeatureId, Geometry},
    layers::style::PathStyle,
};
use serde::{Deserialize, Serialize};

/// Marker icon reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub icon_url: String,
    pub icon_size: (u32, u32),
}

/// Geometry of a rendered shape, in internal order
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Fixed pixel radius circle, radius taken from the style
    CircleMarker { center: LatLng },
    /// Circle with a radius in meters
    Circle { center: LatLng, radius: f64 },
    /// Icon marker
    Marker { position: LatLng, icon: Option<Icon> },
    /// One or more lines
    Polyline { lines: Vec<Vec<LatLng>> },
    /// One or more polygons, each a list of rings
    Polygon { polygons: Vec<Vec<Vec<LatLng>>> },
}

impl ShapeKind {
    pub fn polygon(rings: &[Vec<[f64; 2]>]) -> Self {
        ShapeKind::Polygon {
            polygons: vec![rings_to_lat_lngs(rings)],
        }
    }

    pub fn multi_polygon(polygons: &[Vec<Vec<[f64; 2]>>]) -> Self {
        ShapeKind::Polygon {
            polygons: polygons.iter().map(|p| rings_to_lat_lngs(p)).collect(),
        }
    }

    fn bounds(&self) -> LatLngBounds {
        let mut bounds = LatLngBounds::empty();
        match self {
            ShapeKind::CircleMarker { center } => bounds.extend(center),
            ShapeKind::Circle { center, radius } => bounds = center.to_bounds(*radius),
            ShapeKind::Marker { position, .. } => bounds.extend(position),
            ShapeKind::Polyline { lines } => lines.iter().flatten().for_each(|p| bounds.extend(p)),
            ShapeKind::Polygon { polygons } => polygons
                .iter()
                .filter_map(|rings| rings.first())
                .flatten()
                .for_each(|p| bounds.extend(p)),
        }
        bounds
    }
}

fn rings_to_lat_lngs(rings: &[Vec<[f64; 2]>]) -> Vec<Vec<LatLng>> {
    rings
        .iter()
        .map(|ring| ring.iter().map(|c| LatLng::from_lng_lat(*c)).collect())
        .collect()
}

/// Tooltip bound to a shape
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    /// Follows the cursor instead of sitting at the shape anchor
    pub sticky: bool,
}

/// The renderable object created for one feature
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    feature: Feature,
    kind: ShapeKind,
    style: PathStyle,
    tooltip: Option<Tooltip>,
    popup: Option<String>,
}

impl Shape {
    pub fn new(feature: Feature, kind: ShapeKind, style: PathStyle) -> Self {
        Self {
            feature,
            kind,
            style,
            tooltip: None,
            popup: None,
        }
    }

    pub fn id(&self) -> &FeatureId {
        &self.feature.id
    }

    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    pub fn feature_mut(&mut self) -> &mut Feature {
        &mut self.feature
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn style(&self) -> &PathStyle {
        &self.style
    }

    /// Merges a partial style into the current one
    pub fn set_style(&mut self, style: &PathStyle) {
        self.style.apply(style);
    }

    pub fn bind_tooltip(&mut self, text: String, sticky: bool) {
        self.tooltip = Some(Tooltip { text, sticky });
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn bind_popup(&mut self, text: String) {
        self.popup = Some(text);
    }

    pub fn popup(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    pub fn bounds(&self) -> LatLngBounds {
        self.kind.bounds()
    }

    /// Anchor point of the shape; polygons use the center of their bounds
    pub fn lat_lng(&self) -> LatLng {
        match &self.kind {
            ShapeKind::CircleMarker { center } | ShapeKind::Circle { center, .. } => *center,
            ShapeKind::Marker { position, .. } => *position,
            ShapeKind::Polyline { .. } | ShapeKind::Polygon { .. } => self.bounds().center(),
        }
    }
}

/// Converts a feature's geometry into a shape.
///
/// Layer types plug their own factory into a vector layer; `None` means the
/// geometry type is not supported by the layer.
pub trait ShapeFactory: Send + Sync {
    fn create_shape(&self, feature: &Feature, style: &PathStyle) -> Option<(ShapeKind, PathStyle)>;
}

/// Circle markers for points, paths for everything else
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultShapeFactory;

impl ShapeFactory for DefaultShapeFactory {
    fn create_shape(&self, feature: &Feature, style: &PathStyle) -> Option<(ShapeKind, PathStyle)> {
        let kind = match &feature.geometry {
            Geometry::Point { coordinates } => ShapeKind::CircleMarker {
                center: LatLng::from_lng_lat(*coordinates),
            },
            Geometry::LineString { coordinates } => ShapeKind::Polyline {
                lines: vec![coordinates.iter().map(|c| LatLng::from_lng_lat(*c)).collect()],
            },
            Geometry::MultiLineString { coordinates } => ShapeKind::Polyline {
                lines: rings_to_lat_lngs(coordinates),
            },
            Geometry::Polygon { coordinates } => ShapeKind::polygon(coordinates),
            Geometry::MultiPolygon { coordinates } => ShapeKind::multi_polygon(coordinates),
            Geometry::MultiPoint { .. } | Geometry::GeometryCollection { .. } => return None,
        };

        Some((kind, style.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_factory_point() {
        let feature = Feature::new("p", Geometry::Point { coordinates: [-11.5, 8.0] });
        let style = PathStyle::new().with_weight(1.0);
        let (kind, shape_style) = DefaultShapeFactory.create_shape(&feature, &style).unwrap();

        assert_eq!(
            kind,
            ShapeKind::CircleMarker {
                center: LatLng::new(8.0, -11.5)
            }
        );
        assert_eq!(shape_style, style);
    }

    #[test]
    fn test_default_factory_rejects_collections() {
        let feature = Feature::new(
            "g",
            Geometry::GeometryCollection { geometries: vec![] },
        );
        assert!(DefaultShapeFactory
            .create_shape(&feature, &PathStyle::new())
            .is_none());
    }

    #[test]
    fn test_polygon_anchor_is_bounds_center() {
        let feature = Feature::new(
            "a",
            Geometry::Polygon {
                coordinates: vec![vec![[0.0, 0.0], [4.0, 0.0], [4.0, 2.0], [0.0, 0.0]]],
            },
        );
        let (kind, style) = DefaultShapeFactory
            .create_shape(&feature, &PathStyle::new())
            .unwrap();
        let shape = Shape::new(feature, kind, style);

        assert_eq!(shape.lat_lng(), LatLng::new(1.0, 2.0));
        assert_eq!(shape.bounds(), LatLngBounds::from_coords(0.0, 0.0, 2.0, 4.0));
    }

    #[test]
    fn test_set_style_merges() {
        let feature = Feature::new("p", Geometry::Point { coordinates: [0.0, 0.0] });
        let mut shape = Shape::new(
            feature,
            ShapeKind::CircleMarker {
                center: LatLng::default(),
            },
            PathStyle::new().with_color("#333").with_weight(1.0),
        );

        shape.set_style(&PathStyle::new().with_weight(3.0));
        assert_eq!(shape.style().color.as_deref(), Some("#333"));
        assert_eq!(shape.style().weight, Some(3.0));
    }
}
