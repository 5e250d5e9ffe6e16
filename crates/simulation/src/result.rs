//! Aggregate outcome of a run.

use crate::{CounterCollection, SimulationClock};
use qsim_core::SimTime;
use qsim_stats::Counter;
use serde::{Deserialize, Serialize};

/// Snapshot returned by every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub packets_total: u64,
    pub packets_accepted: u64,
    pub packets_dropped: u64,
    pub packets_completed: u64,
    /// Dropped over total arrivals.
    pub blocking_probability: f64,
    /// Fraction of the observation window the server was busy.
    pub system_utilization: f64,
    /// Time-average number of packets in the buffer.
    pub mean_queue_length: f64,
    /// Mean waiting time of completed packets, if any completed.
    pub mean_waiting_time: Option<f64>,
    /// Completed packets per unit of simulated time.
    pub throughput: f64,
    /// Clock time when the run stopped.
    pub final_time: SimTime,
}

impl SimulationResult {
    /// Gather a snapshot from the clock and counters.
    pub fn gather(clock: &SimulationClock, counters: &CounterCollection) -> Self {
        let window = counters.server_busy.duration();
        let throughput = if window > 0.0 {
            clock.packets_completed as f64 / window
        } else {
            0.0
        };
        Self {
            packets_total: clock.packets_total,
            packets_accepted: clock.packets_accepted,
            packets_dropped: clock.packets_dropped,
            packets_completed: clock.packets_completed,
            blocking_probability: clock.blocking_probability(),
            system_utilization: counters.server_busy.mean().unwrap_or(0.0),
            mean_queue_length: counters.queue_length.mean().unwrap_or(0.0),
            mean_waiting_time: counters.waiting_time.mean().ok(),
            throughput,
            final_time: clock.now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qsim_core::SystemState;

    #[test]
    fn test_gather_from_empty_run() {
        let result = SimulationResult::gather(&SimulationClock::new(), &CounterCollection::new(1));
        assert_eq!(result.packets_total, 0);
        assert_eq!(result.blocking_probability, 0.0);
        assert_eq!(result.system_utilization, 0.0);
        assert_eq!(result.throughput, 0.0);
        assert!(result.mean_waiting_time.is_none());
    }

    #[test]
    fn test_gather_utilization_and_throughput() {
        let mut clock = SimulationClock::new();
        let mut counters = CounterCollection::new(1);
        let mut state = SystemState::new(1);

        counters.count_queue(1.0, &state).unwrap();
        assert!(state.add_packet_to_server(1.0));
        clock.packet_accepted();
        counters.count_queue(3.0, &state).unwrap();
        let packet = state.complete_service(3.0).unwrap();
        counters.count_packet(&packet).unwrap();
        clock.packet_completed();
        counters.count_queue(4.0, &state).unwrap();
        clock.now = 4.0;

        let result = SimulationResult::gather(&clock, &counters);
        assert_eq!(result.system_utilization, 0.5);
        assert_eq!(result.throughput, 0.25);
        assert_eq!(result.mean_waiting_time, Some(0.0));
        assert_eq!(result.final_time, 4.0);
    }
}
