//! Simulated time and packet bookkeeping.

use qsim_core::SimTime;
use serde::{Deserialize, Serialize};

/// Clock and packet counts of one run.
///
/// `now` never decreases. `packets_total == packets_accepted + packets_dropped`
/// holds after every arrival.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    /// Current simulated time.
    pub now: SimTime,
    /// Set once the run should stop after the current event.
    pub stop: bool,
    /// Arrivals seen.
    pub packets_total: u64,
    /// Arrivals that found a place in the server or buffer.
    pub packets_accepted: u64,
    /// Arrivals that found the buffer full.
    pub packets_dropped: u64,
    /// Packets that finished service.
    pub packets_completed: u64,
}

impl SimulationClock {
    /// A fresh clock at t = 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an accepted arrival.
    pub fn packet_accepted(&mut self) {
        self.packets_total += 1;
        self.packets_accepted += 1;
    }

    /// Count a dropped arrival.
    pub fn packet_dropped(&mut self) {
        self.packets_total += 1;
        self.packets_dropped += 1;
    }

    /// Count a service completion.
    pub fn packet_completed(&mut self) {
        self.packets_completed += 1;
    }

    /// Fraction of arrivals that were dropped; zero before any arrival.
    pub fn blocking_probability(&self) -> f64 {
        if self.packets_total == 0 {
            0.0
        } else {
            self.packets_dropped as f64 / self.packets_total as f64
        }
    }

    /// Clear counts and the stop flag but keep `now`.
    pub fn start_batch(&mut self) {
        *self = Self {
            now: self.now,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conservation() {
        let mut clock = SimulationClock::new();
        clock.packet_accepted();
        clock.packet_accepted();
        clock.packet_dropped();
        assert_eq!(clock.packets_total, 3);
        assert_eq!(
            clock.packets_total,
            clock.packets_accepted + clock.packets_dropped
        );
        assert!((clock.blocking_probability() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_blocking_probability_without_arrivals() {
        assert_eq!(SimulationClock::new().blocking_probability(), 0.0);
    }

    #[test]
    fn test_start_batch_keeps_time() {
        let mut clock = SimulationClock::new();
        clock.now = 12.5;
        clock.stop = true;
        clock.packet_dropped();
        clock.start_batch();
        assert_eq!(clock.now, 12.5);
        assert!(!clock.stop);
        assert_eq!(clock.packets_total, 0);
    }
}
