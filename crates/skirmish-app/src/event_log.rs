//! Append-only event storage for replay and incremental polling.

use skirmish_core::events::SimEvent;

/// Every event the battle has produced, in emission order.
///
/// Offsets are positions in the log. Readers page through with [`EventLog::since`]
/// and resume from the returned offset.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch and return its `[start, end)` offsets.
    pub fn append_many(&mut self, events: impl IntoIterator<Item = SimEvent>) -> (usize, usize) {
        let start = self.events.len();
        self.events.extend(events);
        (start, self.events.len())
    }

    /// Up to `limit` events starting at `offset`, and the offset to resume from.
    ///
    /// An offset past the end yields an empty page and is returned unchanged.
    pub fn since(&self, offset: usize, limit: usize) -> (Vec<SimEvent>, usize) {
        let start = offset.min(self.events.len());
        let end = start.saturating_add(limit).min(self.events.len());
        let page = self.events[start..end].to_vec();
        let next = offset + page.len();
        (page, next)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::events::EventPayload;

    fn routed(t: u64, id: &str) -> SimEvent {
        SimEvent::new(t, EventPayload::Routed { unit_id: id.into() })
    }

    #[test]
    fn test_append_returns_offsets() {
        let mut log = EventLog::new();
        assert_eq!(log.append_many(vec![routed(0, "A"), routed(0, "B")]), (0, 2));
        assert_eq!(log.append_many(Vec::new()), (2, 2));
        assert_eq!(log.append_many(vec![routed(500, "C")]), (2, 3));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_since_pages_in_order() {
        let mut log = EventLog::new();
        log.append_many((0..5).map(|i| routed(i * 100, &format!("U{i}"))));

        let (page, next) = log.since(0, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(next, 2);
        let (page, next) = log.since(next, 2);
        assert_eq!(page[0].sim_time_ms, 200);
        assert_eq!(next, 4);
        let (page, next) = log.since(next, 2);
        assert_eq!(page.len(), 1);
        assert_eq!(next, 5);
        let (page, next) = log.since(next, 2);
        assert!(page.is_empty());
        assert_eq!(next, 5);
    }

    #[test]
    fn test_since_past_end_is_empty() {
        let mut log = EventLog::new();
        log.append_many(vec![routed(0, "A")]);
        let (page, next) = log.since(10, 100);
        assert!(page.is_empty());
        assert_eq!(next, 10);
        let (page, _) = log.since(0, 0);
        assert!(page.is_empty());
        let (page, next) = log.since(0, usize::MAX);
        assert_eq!(page.len(), 1);
        assert_eq!(next, 1);
    }
}
