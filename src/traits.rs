//! Shared trait abstractions
//!
//! Layers, whatever they draw, are driven by the map through the same
//! lifecycle: they are attached, receive interaction events and are detached.

use crate::{
    core::{geo::LatLngBounds, map::Map},
    input::events::LayerEvent,
    Result,
};

/// Trait for layer-like objects
pub trait LayerOperations: Send + Sync {
    /// Get layer ID
    fn id(&self) -> &str;

    /// Get layer name
    fn name(&self) -> &str;

    /// Get layer type
    fn layer_type(&self) -> crate::layers::base::LayerType;

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set layer visibility
    fn set_visible(&mut self, visible: bool);

    /// Get layer opacity (0.0 to 1.0)
    fn opacity(&self) -> f32;

    /// Set layer opacity
    fn set_opacity(&mut self, opacity: f32);

    /// Get layer z-index for ordering
    fn z_index(&self) -> i32;

    /// Set layer z-index
    fn set_z_index(&mut self, z_index: i32);

    /// Position of the layer in the host's layer list; layers with an
    /// index are the main content of the map
    fn index(&self) -> Option<i32> {
        None
    }

    /// Called by the map right before the layer is inserted
    fn on_add(&mut self, _map: &mut Map) -> Result<()> {
        Ok(())
    }

    /// Called by the map right after the layer was taken out
    fn on_remove(&mut self, _map: &mut Map) -> Result<()> {
        Ok(())
    }

    /// Handle an interaction dispatched to this layer
    fn handle_event(&mut self, _event: &mut LayerEvent) -> Result<()> {
        Ok(())
    }

    /// Get layer bounds if applicable
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// Check if layer intersects with given bounds
    fn intersects_bounds(&self, bounds: &LatLngBounds) -> bool {
        if let Some(layer_bounds) = self.bounds() {
            layer_bounds.intersects(bounds)
        } else {
            true
        }
    }

    /// Get layer options
    fn options(&self) -> serde_json::Value;

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}
