use crate::core::geo::{LatLng, LatLngBounds};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Property bag of a feature
pub type Properties = serde_json::Map<String, Value>;

/// GeoJSON geometry types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: [f64; 2],
    },
    LineString {
        coordinates: Vec<[f64; 2]>,
    },
    Polygon {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPoint {
        coordinates: Vec<[f64; 2]>,
    },
    MultiLineString {
        coordinates: Vec<Vec<[f64; 2]>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<[f64; 2]>>>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
}

impl Geometry {
    /// GeoJSON type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point { .. } => "Point",
            Geometry::LineString { .. } => "LineString",
            Geometry::Polygon { .. } => "Polygon",
            Geometry::MultiPoint { .. } => "MultiPoint",
            Geometry::MultiLineString { .. } => "MultiLineString",
            Geometry::MultiPolygon { .. } => "MultiPolygon",
            Geometry::GeometryCollection { .. } => "GeometryCollection",
        }
    }

    pub fn is_point(&self) -> bool {
        matches!(self, Geometry::Point { .. })
    }

    /// Bounding box of all coordinates, `None` when there are none
    pub fn bounds(&self) -> Option<LatLngBounds> {
        let mut bounds = LatLngBounds::empty();
        self.visit_coords(&mut |coord| bounds.extend(&LatLng::from_lng_lat(*coord)));
        bounds.is_valid().then_some(bounds)
    }

    fn visit_coords(&self, visit: &mut impl FnMut(&[f64; 2])) {
        match self {
            Geometry::Point { coordinates } => visit(coordinates),
            Geometry::LineString { coordinates } | Geometry::MultiPoint { coordinates } => {
                coordinates.iter().for_each(|c| visit(c))
            }
            Geometry::Polygon { coordinates } | Geometry::MultiLineString { coordinates } => {
                coordinates.iter().flatten().for_each(|c| visit(c))
            }
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().flatten().flatten().for_each(|c| visit(c))
            }
            Geometry::GeometryCollection { geometries } => {
                for geometry in geometries {
                    geometry.visit_coords(visit);
                }
            }
        }
    }
}

/// Identifier of a feature, numeric or textual as in GeoJSON
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureId {
    Number(i64),
    Text(String),
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureId::Number(id) => write!(f, "{id}"),
            FeatureId::Text(id) => f.write_str(id),
        }
    }
}

impl From<&str> for FeatureId {
    fn from(id: &str) -> Self {
        FeatureId::Text(id.to_string())
    }
}

impl From<String> for FeatureId {
    fn from(id: String) -> Self {
        FeatureId::Text(id)
    }
}

impl From<i64> for FeatureId {
    fn from(id: i64) -> Self {
        FeatureId::Number(id)
    }
}

/// GeoJSON feature with geometry and properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Properties,
    /// Selection flag set by the host application
    #[serde(default, rename = "isSelected", skip_serializing_if = "std::ops::Not::not")]
    pub is_selected: bool,
}

impl Feature {
    pub fn new(id: impl Into<FeatureId>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            geometry,
            properties: Properties::new(),
            is_selected: false,
        }
    }

    /// Add a property to this feature
    pub fn with_property<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Get a property value
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Selected either through the feature flag or an `isSelected` property
    pub fn is_selected(&self) -> bool {
        self.is_selected
            || self
                .properties
                .get("isSelected")
                .and_then(Value::as_bool)
                .unwrap_or(false)
    }

    /// Color override from `properties.style.color`
    pub fn style_color(&self) -> Option<&str> {
        self.properties.get("style")?.get("color")?.as_str()
    }
}

/// Collection of features
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Parses a GeoJSON FeatureCollection document
    pub fn from_str(geojson: &str) -> crate::Result<Self> {
        serde_json::from_str(geojson)
            .map_err(|e| crate::Error::ParseError(format!("Invalid GeoJSON: {}", e)).into())
    }

    /// Reads either a FeatureCollection object or a bare array of features
    pub fn from_value(value: &Value) -> crate::Result<Self> {
        let parsed = match value {
            Value::Array(_) => serde_json::from_value(value.clone()).map(Self::new),
            _ => serde_json::from_value(value.clone()),
        };
        parsed.map_err(|e| crate::Error::ParseError(format!("Invalid GeoJSON: {}", e)).into())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
