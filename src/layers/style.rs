use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Partial path style, merged field by field like Leaflet's `setStyle`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pane: Option<String>,
}

impl PathStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_fill_opacity(mut self, fill_opacity: f64) -> Self {
        self.fill_opacity = Some(fill_opacity);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Overwrites every field that is set in `other`
    pub fn apply(&mut self, other: &PathStyle) {
        if other.color.is_some() {
            self.color = other.color.clone();
        }
        if other.weight.is_some() {
            self.weight = other.weight;
        }
        if other.opacity.is_some() {
            self.opacity = other.opacity;
        }
        if other.fill_color.is_some() {
            self.fill_color = other.fill_color.clone();
        }
        if other.fill_opacity.is_some() {
            self.fill_opacity = other.fill_opacity;
        }
        if other.radius.is_some() {
            self.radius = other.radius;
        }
        if other.pane.is_some() {
            self.pane = other.pane.clone();
        }
    }

    /// `self` with `other` applied on top
    pub fn merged(&self, other: &PathStyle) -> PathStyle {
        let mut merged = self.clone();
        merged.apply(other);
        merged
    }

    /// Reads a style from loosely typed layer options, ignoring bad input
    pub fn from_value(value: Option<&Value>) -> Option<PathStyle> {
        value.and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Free-form CSS-like style of a text label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl LabelStyle {
    /// Entries of `other` win over entries of `self`
    pub fn extended(&self, other: &LabelStyle) -> LabelStyle {
        let mut extended = self.clone();
        if other.color.is_some() {
            extended.color = other.color.clone();
        }
        for (key, value) in &other.extra {
            extended.extra.insert(key.clone(), value.clone());
        }
        extended
    }
}
