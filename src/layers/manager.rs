use crate::{layers::base::LayerTrait, Result};

use crate::prelude::HashMap;

/// Manages the layers attached to a map, keeping them ordered by z-index
pub struct LayerManager {
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Ordered list of layer IDs (sorted by z-index, insertion order within a z-index)
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new() -> Self {
        Self {
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    /// Adds a layer to the manager, replacing any layer with the same id
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        let z_index = layer.z_index();

        if self.layers.insert(layer_id.clone(), layer).is_some() {
            self.render_order.retain(|id| *id != layer_id);
        }

        // Insert in sorted order by z-index
        let insert_pos = self
            .render_order
            .iter()
            .position(|id| {
                self.layers
                    .get(id)
                    .map(|l| l.z_index() > z_index)
                    .unwrap_or(false)
            })
            .unwrap_or(self.render_order.len());

        self.render_order.insert(insert_pos, layer_id);
        Ok(())
    }

    /// Removes a layer from the manager
    pub fn remove_layer(&mut self, layer_id: &str) -> Result<Option<Box<dyn LayerTrait>>> {
        self.render_order.retain(|id| id != layer_id);
        Ok(self.layers.remove(layer_id))
    }

    pub fn contains(&self, layer_id: &str) -> bool {
        self.layers.contains_key(layer_id)
    }

    /// Gets a reference to a layer by ID
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.get_mut(layer_id).map(|layer| f(layer.as_mut()))
    }

    /// Lists all layer IDs in order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    /// Gets all layers in order
    pub fn layers(&self) -> Vec<&dyn LayerTrait> {
        self.render_order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|l| l.as_ref()))
            .collect()
    }

    /// Applies a function to each layer mutably in order
    pub fn for_each_layer_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut dyn LayerTrait),
    {
        for id in self.render_order.clone() {
            if let Some(layer) = self.layers.get_mut(&id) {
                f(layer.as_mut());
            }
        }
    }

    /// Applies a function to each layer immutably in order.
    pub fn for_each_layer<F>(&self, mut f: F)
    where
        F: FnMut(&dyn LayerTrait),
    {
        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                f(layer.as_ref());
            }
        }
    }

    /// Updates the order based on current z-indices
    pub fn update_render_order(&mut self) {
        self.render_order.sort_by(|a, b| {
            let z_a = self.layers.get(a).map(|l| l.z_index()).unwrap_or(0);
            let z_b = self.layers.get(b).map(|l| l.z_index()).unwrap_or(0);
            z_a.cmp(&z_b)
        });
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::base::{BaseLayer, LayerProperties, LayerType};

    fn layer(id: &str, z_index: i32) -> Box<dyn LayerTrait> {
        let mut properties = LayerProperties::new(id.to_string(), id.to_string(), LayerType::Custom);
        properties.z_index = z_index;
        Box::new(BaseLayer::new(properties))
    }

    #[test]
    fn test_order_by_z_index_then_insertion() {
        let mut manager = LayerManager::new();
        manager.add_layer(layer("a", 1)).unwrap();
        manager.add_layer(layer("b", 0)).unwrap();
        manager.add_layer(layer("c", 1)).unwrap();

        assert_eq!(manager.list_layers(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_replace_same_id() {
        let mut manager = LayerManager::new();
        manager.add_layer(layer("a", 0)).unwrap();
        manager.add_layer(layer("a", 2)).unwrap();

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.list_layers(), vec!["a"]);
        assert_eq!(manager.get_layer("a").map(|l| l.z_index()), Some(2));
    }

    #[test]
    fn test_update_render_order() {
        let mut manager = LayerManager::new();
        manager.add_layer(layer("a", 0)).unwrap();
        manager.add_layer(layer("b", 1)).unwrap();

        manager.with_layer_mut("a", |l| l.set_z_index(5));
        manager.update_render_order();
        assert_eq!(manager.list_layers(), vec!["b", "a"]);

        assert!(manager.remove_layer("a").unwrap().is_some());
        assert!(!manager.contains("a"));
        assert_eq!(manager.len(), 1);
    }
}
