//! Map controls
//!
//! Controls sit in one of the four map corners. They are attached through
//! [`Map::add_control`](crate::core::map::Map::add_control) and see every
//! map event, so they can keep their own state in sync with the layers.

pub mod builtin;
pub mod fit_bounds;
pub mod legend;

pub use builtin::{create_builtin, AttributionControl, LayersControl, ScaleControl, ZoomControl};
pub use fit_bounds::FitBoundsControl;
pub use legend::{LegendControl, LegendItem};

use crate::{core::map::Map, input::events::MapEvent, layers::manager::LayerManager, Result};
use serde::{Deserialize, Serialize};

/// Corner of the map a control is placed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Trait for map controls
pub trait Control: Send + Sync {
    /// Unique id of the control on its map
    fn id(&self) -> &str;

    fn position(&self) -> ControlPosition;

    fn is_visible(&self) -> bool {
        true
    }

    /// Called by the map right before the control is inserted
    fn on_add(&mut self, _map: &mut Map) -> Result<()> {
        Ok(())
    }

    /// Called by the map right after the control was taken out
    fn on_remove(&mut self, _map: &mut Map) -> Result<()> {
        Ok(())
    }

    /// Observe a map event; `layers` is the layer state after the event
    fn on_map_event(&mut self, _event: &MapEvent, _layers: &LayerManager) {}

    /// The user activated the control
    fn on_click(&mut self, _map: &mut Map) -> Result<()> {
        Ok(())
    }

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_serde() {
        let position: ControlPosition = serde_json::from_str("\"bottomleft\"").unwrap();
        assert_eq!(position, ControlPosition::BottomLeft);
        assert_eq!(
            serde_json::to_string(&ControlPosition::TopLeft).unwrap(),
            "\"topleft\""
        );
    }
}
