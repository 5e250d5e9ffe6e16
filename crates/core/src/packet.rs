//! A single customer moving through the station.

use crate::{SimTime, StateError};
use serde::{Deserialize, Serialize};

/// Lifecycle of a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacketStatus {
    /// Sitting in the buffer.
    Waiting,
    /// Occupying the server.
    InService,
    /// Service finished.
    Completed,
}

/// One customer and its measurement timestamps.
///
/// `arrival_time <= start_time <= complete_time` once the later ones are set.
/// Reading a timestamp before its transition happened is a [`StateError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    arrival_time: SimTime,
    start_time: Option<SimTime>,
    complete_time: Option<SimTime>,
    interarrival_time: SimTime,
    status: PacketStatus,
}

impl Packet {
    /// Create a waiting packet that arrived at `arrival_time`, `interarrival_time`
    /// after the previous arrival.
    pub fn new(arrival_time: SimTime, interarrival_time: SimTime) -> Self {
        Self {
            arrival_time,
            start_time: None,
            complete_time: None,
            interarrival_time,
            status: PacketStatus::Waiting,
        }
    }

    /// Move the packet into service at `now`.
    pub fn start_service(&mut self, now: SimTime) -> Result<(), StateError> {
        if now < self.arrival_time {
            return Err(StateError::TimeReversal {
                time: now,
                previous: self.arrival_time,
            });
        }
        self.start_time = Some(now);
        self.status = PacketStatus::InService;
        Ok(())
    }

    /// Finish service at `now`.
    pub fn complete_service(&mut self, now: SimTime) -> Result<(), StateError> {
        let start = self.start_time.ok_or(StateError::NotServed)?;
        if now < start {
            return Err(StateError::TimeReversal {
                time: now,
                previous: start,
            });
        }
        self.complete_time = Some(now);
        self.status = PacketStatus::Completed;
        Ok(())
    }

    /// Current status.
    pub fn status(&self) -> PacketStatus {
        self.status
    }

    /// When the packet arrived.
    pub fn arrival_time(&self) -> SimTime {
        self.arrival_time
    }

    /// When service began.
    pub fn start_time(&self) -> Result<SimTime, StateError> {
        self.start_time.ok_or(StateError::NotServed)
    }

    /// When service ended.
    pub fn complete_time(&self) -> Result<SimTime, StateError> {
        self.complete_time.ok_or(StateError::NotCompleted)
    }

    /// Time since the previous arrival.
    pub fn interarrival_time(&self) -> SimTime {
        self.interarrival_time
    }

    /// Time spent in the buffer before service.
    pub fn waiting_time(&self) -> Result<SimTime, StateError> {
        Ok(self.start_time()? - self.arrival_time)
    }

    /// Time spent in the server.
    pub fn service_time(&self) -> Result<SimTime, StateError> {
        Ok(self.complete_time()? - self.start_time()?)
    }

    /// Total time in the station (waiting + service).
    pub fn system_time(&self) -> Result<SimTime, StateError> {
        Ok(self.complete_time()? - self.arrival_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_lifecycle() {
        let mut packet = Packet::new(1.0, 0.5);
        assert_eq!(packet.status(), PacketStatus::Waiting);
        assert_eq!(packet.waiting_time(), Err(StateError::NotServed));
        assert_eq!(packet.service_time(), Err(StateError::NotCompleted));

        packet.start_service(3.0).unwrap();
        assert_eq!(packet.status(), PacketStatus::InService);
        assert_eq!(packet.waiting_time(), Ok(2.0));
        assert_eq!(packet.system_time(), Err(StateError::NotCompleted));

        packet.complete_service(7.5).unwrap();
        assert_eq!(packet.status(), PacketStatus::Completed);
        assert_eq!(packet.service_time(), Ok(4.5));
        assert_eq!(packet.system_time(), Ok(6.5));
        assert_eq!(packet.interarrival_time(), 0.5);
    }

    #[test]
    fn test_complete_before_start_is_rejected() {
        let mut packet = Packet::new(0.0, 0.0);
        assert_eq!(packet.complete_service(1.0), Err(StateError::NotServed));
    }

    #[test]
    fn test_time_reversal_is_rejected() {
        let mut packet = Packet::new(5.0, 1.0);
        assert!(matches!(
            packet.start_service(4.0),
            Err(StateError::TimeReversal { .. })
        ));
        packet.start_service(6.0).unwrap();
        assert!(matches!(
            packet.complete_service(5.5),
            Err(StateError::TimeReversal { .. })
        ));
    }
}
