use std::collections::VecDeque;

use crate::revision::Revision;

/// A state transition recorded for observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<K> {
    pub revision: Revision,
    pub kind: K,
}

/// Append-only event log drained by whoever renders or audits state changes.
///
/// With a capacity limit the oldest events are dropped first.
#[derive(Debug)]
pub struct EventBus<K> {
    events: VecDeque<Event<K>>,
    max_len: Option<usize>,
}

impl<K> Default for EventBus<K> {
    fn default() -> Self {
        Self {
            events: VecDeque::new(),
            max_len: None,
        }
    }
}

impl<K> EventBus<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            max_len: Some(max_len.max(1)),
            ..Self::default()
        }
    }

    pub fn emit(&mut self, revision: Revision, kind: K) {
        if let Some(max) = self.max_len {
            while self.events.len() >= max {
                self.events.pop_front();
            }
        }
        self.events.push_back(Event { revision, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event<K>> + '_ {
        self.events.iter()
    }

    pub fn drain(&mut self) -> Vec<Event<K>> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::revision::Revision;

    #[test]
    fn records_events_with_revision() {
        let mut bus = EventBus::new();
        bus.emit(Revision(2), "selected");
        assert_eq!(bus.len(), 1);
        assert_eq!(bus.iter().next().map(|e| e.revision), Some(Revision(2)));
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Revision(0), "k");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn bounded_bus_drops_oldest() {
        let mut bus = EventBus::with_max_len(2);
        bus.emit(Revision(1), 1);
        bus.emit(Revision(2), 2);
        bus.emit(Revision(3), 3);
        let kinds: Vec<i32> = bus.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![2, 3]);
    }
}
