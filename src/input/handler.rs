use crate::{input::events::MapEvent, prelude::HashMap};
use std::collections::VecDeque;
use std::hash::Hash;

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Event management system for the map
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type
    listeners: HashMap<String, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Process all queued events
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.event_type()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Clear all events from the queue
    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

/// Handle returned by [`Evented::on`], used to unsubscribe
pub type ListenerId = u64;

/// Listener registry of an evented object, keyed by event kind.
///
/// Listeners fire in subscription order.
#[derive(Debug, Clone)]
pub struct Evented<K, H> {
    listeners: HashMap<K, Vec<(ListenerId, H)>>,
    next_id: ListenerId,
}

impl<K: Eq + Hash, H> Default for Evented<K, H> {
    fn default() -> Self {
        Self {
            listeners: HashMap::default(),
            next_id: 1,
        }
    }
}

impl<K: Eq + Hash, H> Evented<K, H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: K, handler: H) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.entry(kind).or_default().push((id, handler));
        id
    }

    /// Removes a listener; returns whether it was subscribed
    pub fn off(&mut self, kind: &K, id: ListenerId) -> bool {
        let Some(handlers) = self.listeners.get_mut(kind) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(listener_id, _)| *listener_id != id);
        let removed = handlers.len() != before;
        if handlers.is_empty() {
            self.listeners.remove(kind);
        }
        removed
    }

    pub fn listeners(&self, kind: &K) -> impl Iterator<Item = &H> {
        self.listeners
            .get(kind)
            .into_iter()
            .flat_map(|handlers| handlers.iter().map(|(_, handler)| handler))
    }

    pub fn listens(&self, kind: &K) -> bool {
        self.listeners.contains_key(kind)
    }

    pub fn listener_count(&self, kind: &K) -> usize {
        self.listeners.get(kind).map_or(0, Vec::len)
    }
}
