//! Time-ordered event scheduler
//!
//! Pending events live in a binary min-heap keyed by
//! `(time, kind tie rank, scheduling sequence)`. Departures sort before arrivals
//! at an identical time; anything still tied is drained in scheduling order, so
//! a run is fully determined by its seed.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::Event;

#[derive(Debug, Clone)]
struct Scheduled {
    event: Event,
    sequence: u64,
}

impl Scheduled {
    fn key_cmp(&self, other: &Self) -> Ordering {
        self.event
            .time
            .total_cmp(&other.event.time)
            .then_with(|| self.event.kind.tie_rank().cmp(&other.event.kind.tie_rank()))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.key_cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // BinaryHeap is a max-heap; reverse so the earliest key is on top
    fn cmp(&self, other: &Self) -> Ordering {
        other.key_cmp(self)
    }
}

/// Priority queue of pending arrival and departure events
#[derive(Debug, Clone, Default)]
pub struct EventScheduler {
    heap: BinaryHeap<Scheduled>,
    next_sequence: u64,
}

impl EventScheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an event in time order
    pub fn schedule(&mut self, event: Event) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(Scheduled { event, sequence });
    }

    /// Remove and return the earliest event if its time is `<= target_time`
    ///
    /// Returns `None` when the scheduler is empty or the earliest pending event
    /// lies beyond `target_time`. Call repeatedly to drain everything due.
    pub fn pop_due(&mut self, target_time: f64) -> Option<Event> {
        match self.heap.peek() {
            Some(next) if next.event.time <= target_time => self.heap.pop().map(|s| s.event),
            _ => None,
        }
    }

    /// Remove every event due at or before `target_time`, earliest first
    ///
    /// Only for inspection; the controller drains with [`pop_due`](Self::pop_due)
    /// because applying an event may schedule further due events.
    pub fn drain_up_to(&mut self, target_time: f64) -> Vec<Event> {
        let mut due = Vec::new();
        while let Some(event) = self.pop_due(target_time) {
            due.push(event);
        }
        due
    }

    /// Earliest pending event without removing it
    pub fn peek(&self) -> Option<&Event> {
        self.heap.peek().map(|s| &s.event)
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no events are pending
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop all pending events and restart the sequence counter
    pub fn clear(&mut self) {
        self.heap.clear();
        self.next_sequence = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CustomerId, EventKind};

    #[test]
    fn test_pops_in_time_order() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(Event::arrival(3.0, CustomerId(3)));
        scheduler.schedule(Event::arrival(1.0, CustomerId(1)));
        scheduler.schedule(Event::departure(2.0, CustomerId(1)));

        let times: Vec<f64> = scheduler.drain_up_to(10.0).iter().map(|e| e.time).collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_pop_due_respects_target() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(Event::arrival(0.5, CustomerId(1)));
        scheduler.schedule(Event::arrival(1.5, CustomerId(2)));

        assert_eq!(scheduler.pop_due(0.4), None);
        assert_eq!(scheduler.pop_due(0.5).map(|e| e.customer), Some(CustomerId(1)));
        assert_eq!(scheduler.pop_due(1.0), None);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn test_departure_before_arrival_at_same_time() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(Event::arrival(2.0, CustomerId(2)));
        scheduler.schedule(Event::departure(2.0, CustomerId(1)));

        let kinds: Vec<EventKind> = scheduler.drain_up_to(2.0).iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Departure, EventKind::Arrival]);
    }

    #[test]
    fn test_same_kind_ties_are_fifo() {
        let mut scheduler = EventScheduler::new();
        for id in 1..=5 {
            scheduler.schedule(Event::arrival(1.0, CustomerId(id)));
        }

        let ids: Vec<u64> = scheduler.drain_up_to(1.0).iter().map(|e| e.customer.get()).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_empty_scheduler() {
        let mut scheduler = EventScheduler::new();
        assert!(scheduler.peek().is_none());
        assert_eq!(scheduler.pop_due(f64::MAX), None);
    }

    #[test]
    fn test_clear() {
        let mut scheduler = EventScheduler::new();
        scheduler.schedule(Event::arrival(1.0, CustomerId(1)));
        scheduler.clear();
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.len(), 0);
    }
}
