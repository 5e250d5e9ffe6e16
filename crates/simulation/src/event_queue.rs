//! Event queue with deterministic ordering.

use crate::SimulationError;
use qsim_core::{EventPriority, SimEvent, SimTime};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Key for ordering events in the queue.
///
/// Events are ordered by:
/// 1. Time (earlier first)
/// 2. Priority (completion before arrival before termination)
/// 3. Sequence number (FIFO for same time/priority)
#[derive(Debug, Clone, Copy)]
pub struct EventKey {
    /// When this event should be processed.
    pub time: SimTime,
    /// Priority for ordering at same time.
    pub priority: EventPriority,
    /// Sequence number for deterministic FIFO ordering.
    pub sequence: u64,
}

impl EventKey {
    /// Create a new event key for `event`.
    pub fn new(event: &SimEvent, sequence: u64) -> Self {
        Self {
            time: event.timestamp,
            priority: event.priority(),
            sequence,
        }
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // Order by time first
        match self.time.total_cmp(&other.time) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Then by priority
        match self.priority.cmp(&other.priority) {
            Ordering::Equal => {}
            ord => return ord,
        }

        // Finally by sequence (FIFO)
        self.sequence.cmp(&other.sequence)
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EventKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EventKey {}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    key: EventKey,
    event: SimEvent,
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Scheduled {}

/// Min-queue of pending events.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Scheduled>>,
    sequence: u64,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event`.
    pub fn insert(&mut self, event: SimEvent) {
        let key = EventKey::new(&event, self.sequence);
        self.sequence += 1;
        self.heap.push(Reverse(Scheduled { key, event }));
    }

    /// Pop the earliest event.
    ///
    /// `now` is only used to describe the failure when the queue is empty.
    pub fn remove_oldest(&mut self, now: SimTime) -> Result<SimEvent, SimulationError> {
        self.heap
            .pop()
            .map(|Reverse(scheduled)| scheduled.event)
            .ok_or(SimulationError::EmptyEventQueue { now })
    }

    /// Peek at the earliest event without removing it.
    pub fn peek(&self) -> Option<&SimEvent> {
        self.heap.peek().map(|Reverse(scheduled)| &scheduled.event)
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if no events are pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every pending event and restart sequence numbering.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.sequence = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim_core::EventKind;

    #[test]
    fn test_event_key_ordering() {
        let earlier = EventKey {
            time: 1.0,
            priority: EventPriority::Arrival,
            sequence: 1,
        };
        let later = EventKey {
            time: 2.0,
            priority: EventPriority::ServiceCompletion,
            sequence: 0,
        };
        assert!(earlier < later);
    }

    #[test]
    fn test_priority_ordering_at_same_time() {
        let completion = EventKey {
            time: 1.0,
            priority: EventPriority::ServiceCompletion,
            sequence: 2, // Higher sequence, but should still be first
        };
        let arrival = EventKey {
            time: 1.0,
            priority: EventPriority::Arrival,
            sequence: 1,
        };
        assert!(
            completion < arrival,
            "Completions should process before arrivals"
        );
    }

    #[test]
    fn test_sequence_ordering_at_same_time_and_priority() {
        let first = EventKey {
            time: 1.0,
            priority: EventPriority::Arrival,
            sequence: 1,
        };
        let second = EventKey {
            time: 1.0,
            priority: EventPriority::Arrival,
            sequence: 2,
        };
        assert!(first < second);
    }

    #[test]
    fn test_pop_order() {
        let mut queue = EventQueue::new();
        queue.insert(SimEvent::termination(5.0));
        queue.insert(SimEvent::arrival(5.0));
        queue.insert(SimEvent::service_completion(5.0));
        queue.insert(SimEvent::arrival(0.5));
        assert_eq!(queue.len(), 4);

        let kinds: Vec<(f64, EventKind)> = (0..4)
            .map(|_| {
                let e = queue.remove_oldest(0.0).unwrap();
                (e.timestamp, e.kind)
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                (0.5, EventKind::CustomerArrival),
                (5.0, EventKind::ServiceCompletion),
                (5.0, EventKind::CustomerArrival),
                (5.0, EventKind::Termination),
            ]
        );
    }

    #[test]
    fn test_empty_queue_is_error() {
        let mut queue = EventQueue::new();
        assert_eq!(
            queue.remove_oldest(3.0),
            Err(SimulationError::EmptyEventQueue { now: 3.0 })
        );
        queue.insert(SimEvent::arrival(1.0));
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.peek().is_none());
    }
}
