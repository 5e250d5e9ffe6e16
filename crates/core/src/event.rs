//! Simulation events and their tie-break priorities.

use crate::SimTime;
use serde::{Deserialize, Serialize};

/// Priority for ordering events that share a timestamp.
///
/// Lower values are processed first:
/// - `ServiceCompletion`: frees the server before a same-instant arrival looks at it
/// - `Arrival`: regular business
/// - `Termination`: last, so every business event at the horizon still runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventPriority {
    /// Service completions.
    ServiceCompletion = 0,
    /// Customer arrivals.
    Arrival = 1,
    /// End of the simulation.
    Termination = 2,
}

/// What an event does when it is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// A new customer arrives at the station.
    CustomerArrival,
    /// The packet in service finishes.
    ServiceCompletion,
    /// Sets the stop flag; schedules nothing.
    Termination,
}

impl EventKind {
    /// Tie-break priority of this kind.
    pub fn priority(self) -> EventPriority {
        match self {
            EventKind::ServiceCompletion => EventPriority::ServiceCompletion,
            EventKind::CustomerArrival => EventPriority::Arrival,
            EventKind::Termination => EventPriority::Termination,
        }
    }

    /// Index into per-kind arrays (`[u64; 3]`), equal to the priority value.
    pub fn index(self) -> usize {
        self.priority() as usize
    }

    /// Get a human-readable name for this event kind.
    pub fn type_name(self) -> &'static str {
        match self {
            EventKind::CustomerArrival => "CustomerArrival",
            EventKind::ServiceCompletion => "ServiceCompletion",
            EventKind::Termination => "Termination",
        }
    }
}

/// A scheduled event.
///
/// Immutable once created. The event queue consumes each one exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    /// When the event fires.
    pub timestamp: SimTime,
    /// What it does.
    pub kind: EventKind,
}

impl SimEvent {
    /// Create an event of the given kind.
    pub fn new(timestamp: SimTime, kind: EventKind) -> Self {
        Self { timestamp, kind }
    }

    /// A customer arrival at `timestamp`.
    pub fn arrival(timestamp: SimTime) -> Self {
        Self::new(timestamp, EventKind::CustomerArrival)
    }

    /// A service completion at `timestamp`.
    pub fn service_completion(timestamp: SimTime) -> Self {
        Self::new(timestamp, EventKind::ServiceCompletion)
    }

    /// Simulation termination at `timestamp`.
    pub fn termination(timestamp: SimTime) -> Self {
        Self::new(timestamp, EventKind::Termination)
    }

    /// Tie-break priority.
    pub fn priority(&self) -> EventPriority {
        self.kind.priority()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        assert!(EventPriority::ServiceCompletion < EventPriority::Arrival);
        assert!(EventPriority::Arrival < EventPriority::Termination);
    }

    #[test]
    fn test_kind_priority_mapping() {
        assert_eq!(
            SimEvent::service_completion(1.0).priority(),
            EventPriority::ServiceCompletion
        );
        assert_eq!(SimEvent::arrival(1.0).priority(), EventPriority::Arrival);
        assert_eq!(
            SimEvent::termination(1.0).priority(),
            EventPriority::Termination
        );
        assert_eq!(EventKind::Termination.index(), 2);
    }
}
