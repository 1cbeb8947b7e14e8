pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{LayerEvent, LayerEventKind, MapEvent, MouseButton, PointerEvent};
pub use handler::{EventManager, Evented, ListenerId};
