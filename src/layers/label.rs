use crate::{
    core::geo::LatLng,
    data::geojson::FeatureId,
    layers::{
        base::{LayerProperties, LayerTrait, LayerType},
        style::LabelStyle,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Where a label sits relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    /// Under a point symbol
    Below,
    /// Centered on the anchor
    Middle,
}

/// A text label anchored on the map
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub lat_lng: LatLng,
    pub position: LabelPosition,
    pub style: LabelStyle,
    pub pane: String,
}

/// Layer holding the labels of a vector layer.
///
/// Cloning yields another handle to the same labels, so the vector layer
/// keeps adding labels after the group has been handed to the map.
#[derive(Debug, Clone)]
pub struct LabelGroup {
    properties: LayerProperties,
    margin: f64,
    labels: Arc<RwLock<Vec<(FeatureId, Label)>>>,
}

impl LabelGroup {
    pub fn new(id: String, margin: f64) -> Self {
        let name = format!("{id} labels");
        Self {
            properties: LayerProperties::new(id, name, LayerType::Labels),
            margin,
            labels: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Collision margin between labels, in pixels
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Adds the label of a feature, replacing an existing one in place
    pub fn insert(&self, id: FeatureId, label: Label) {
        if let Ok(mut labels) = self.labels.write() {
            match labels.iter_mut().find(|(label_id, _)| *label_id == id) {
                Some(entry) => entry.1 = label,
                None => labels.push((id, label)),
            }
        }
    }

    pub fn remove(&self, id: &FeatureId) -> Option<Label> {
        let mut labels = self.labels.write().ok()?;
        let index = labels.iter().position(|(label_id, _)| label_id == id)?;
        Some(labels.remove(index).1)
    }

    pub fn get(&self, id: &FeatureId) -> Option<Label> {
        let labels = self.labels.read().ok()?;
        labels
            .iter()
            .find(|(label_id, _)| label_id == id)
            .map(|(_, label)| label.clone())
    }

    /// Snapshot of all labels in insertion order
    pub fn labels(&self) -> Vec<Label> {
        self.labels
            .read()
            .map(|labels| labels.iter().map(|(_, label)| label.clone()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.labels.read().map(|labels| labels.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether both handles point at the same labels
    pub fn shares_labels_with(&self, other: &LabelGroup) -> bool {
        Arc::ptr_eq(&self.labels, &other.labels)
    }
}

impl LayerTrait for LabelGroup {
    crate::impl_layer_trait!(LabelGroup, properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "margin": self.margin,
            "count": self.len(),
        })
    }
}
