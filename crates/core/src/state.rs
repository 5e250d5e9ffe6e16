//! Server + buffer state machine.
//!
//! ```text
//!            add_packet_to_server            add_packet_to_queue
//!   ┌──────┐ ─────────────────────▶ ┌──────┐ ◀──────────────────┐
//!   │ Idle │                        │ Busy │ ───────────────────┘
//!   └──────┘ ◀───────────────────── └──────┘   (buffer 0..=S)
//!        ▲      complete_service        │
//!        └────── start_service ─────────┘  (only if buffer non-empty)
//! ```

use crate::{FiniteQueue, Packet, SimTime, StateError};

/// State of the single server and its finite buffer.
///
/// The server is busy exactly when it holds a packet, so `is_busy()` and
/// `served_packet()` can never disagree.
#[derive(Debug, Clone)]
pub struct SystemState {
    served_packet: Option<Packet>,
    buffer: FiniteQueue,
    /// Arrival instant of the most recent customer, accepted or not.
    last_arrival: SimTime,
}

impl SystemState {
    /// Create an idle station with a buffer of `buffer_size` places.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            served_packet: None,
            buffer: FiniteQueue::new(buffer_size),
            last_arrival: 0.0,
        }
    }

    /// Put an arriving customer straight into service.
    ///
    /// Returns false if the server is already busy.
    pub fn add_packet_to_server(&mut self, now: SimTime) -> bool {
        if self.is_busy() {
            return false;
        }
        let mut packet = Packet::new(now, now - self.last_arrival);
        self.last_arrival = now;
        // Arrival and start coincide, so this cannot reverse time.
        if packet.start_service(now).is_err() {
            return false;
        }
        self.served_packet = Some(packet);
        true
    }

    /// Put an arriving customer into the buffer.
    ///
    /// Returns false without touching any state if the server is idle. Returns
    /// false if the buffer is full; that arrival still counts towards
    /// inter-arrival bookkeeping.
    pub fn add_packet_to_queue(&mut self, now: SimTime) -> bool {
        if !self.is_busy() {
            return false;
        }
        let packet = Packet::new(now, now - self.last_arrival);
        self.last_arrival = now;
        self.buffer.add(packet)
    }

    /// Finish the packet in service and hand it back to the caller.
    pub fn complete_service(&mut self, now: SimTime) -> Result<Packet, StateError> {
        let mut packet = self.served_packet.take().ok_or(StateError::ServerIdle)?;
        if let Err(e) = packet.complete_service(now) {
            self.served_packet = Some(packet);
            return Err(e);
        }
        Ok(packet)
    }

    /// Move the head of the buffer into service.
    ///
    /// Returns `Ok(false)` if the buffer is empty or the server is busy.
    pub fn start_service(&mut self, now: SimTime) -> Result<bool, StateError> {
        if self.is_busy() {
            return Ok(false);
        }
        let Some(mut packet) = self.buffer.remove() else {
            return Ok(false);
        };
        packet.start_service(now)?;
        self.served_packet = Some(packet);
        Ok(true)
    }

    /// Check if the server holds a packet.
    pub fn is_busy(&self) -> bool {
        self.served_packet.is_some()
    }

    /// The packet currently in service.
    pub fn served_packet(&self) -> Option<&Packet> {
        self.served_packet.as_ref()
    }

    /// Number of packets waiting in the buffer.
    pub fn queue_length(&self) -> usize {
        self.buffer.len()
    }

    /// The waiting buffer.
    pub fn buffer(&self) -> &FiniteQueue {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PacketStatus;

    #[test]
    fn test_idle_to_busy() {
        let mut state = SystemState::new(2);
        assert!(!state.is_busy());
        assert!(state.add_packet_to_server(1.0));
        assert!(state.is_busy());
        assert_eq!(
            state.served_packet().map(|p| p.status()),
            Some(PacketStatus::InService)
        );
        assert!(!state.add_packet_to_server(1.5), "Busy server must refuse");
    }

    #[test]
    fn test_buffer_fills_then_drops() {
        let mut state = SystemState::new(2);
        assert!(state.add_packet_to_server(0.0));
        assert!(state.add_packet_to_queue(1.0));
        assert!(state.add_packet_to_queue(2.0));
        assert!(!state.add_packet_to_queue(3.0));
        assert_eq!(state.queue_length(), 2);
    }

    #[test]
    fn test_complete_then_start_next() {
        let mut state = SystemState::new(2);
        assert!(state.add_packet_to_server(0.0));
        assert!(state.add_packet_to_queue(1.0));

        let done = state.complete_service(2.0).unwrap();
        assert_eq!(done.status(), PacketStatus::Completed);
        assert_eq!(done.service_time(), Ok(2.0));
        assert!(!state.is_busy());

        assert_eq!(state.start_service(2.0), Ok(true));
        assert!(state.is_busy());
        assert_eq!(state.served_packet().unwrap().waiting_time(), Ok(1.0));
        assert_eq!(state.served_packet().unwrap().interarrival_time(), 1.0);
        assert_eq!(state.queue_length(), 0);
    }

    #[test]
    fn test_queueing_while_idle_is_refused() {
        let mut state = SystemState::new(2);
        assert!(!state.add_packet_to_queue(1.0), "Idle server must not queue");
        assert_eq!(state.queue_length(), 0);
        assert!(!state.is_busy());

        // The refused call must not count as an arrival.
        assert!(state.add_packet_to_server(3.0));
        assert_eq!(state.served_packet().unwrap().interarrival_time(), 3.0);
    }

    #[test]
    fn test_start_service_on_empty_buffer() {
        let mut state = SystemState::new(1);
        assert_eq!(state.start_service(0.0), Ok(false));
        assert!(!state.is_busy());
    }

    #[test]
    fn test_complete_while_idle_is_error() {
        let mut state = SystemState::new(1);
        assert_eq!(
            state.complete_service(1.0).unwrap_err(),
            StateError::ServerIdle
        );
    }

    #[test]
    fn test_dropped_arrival_updates_interarrival() {
        let mut state = SystemState::new(0);
        assert!(state.add_packet_to_server(1.0));
        assert!(!state.add_packet_to_queue(2.0));
        state.complete_service(3.0).unwrap();
        assert!(state.add_packet_to_server(4.5));
        assert_eq!(state.served_packet().unwrap().interarrival_time(), 2.5);
    }
}
