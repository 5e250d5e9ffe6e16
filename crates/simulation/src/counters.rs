//! The standard set of station counters.

use qsim_core::{Packet, SimTime, StateError, SystemState};
use qsim_stats::{
    AutocorrelationCounter, Counter, CounterReport, CrossCorrelationCounter, StatsError,
    TimeDependentCounter, TimeIndependentCounter,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Counters fed by the simulation loop.
///
/// Time-dependent counters are sampled before every event, so the value they
/// see is the one that held since the previous event. Per-packet counters are
/// fed at every service completion.
#[derive(Debug, Clone)]
pub struct CounterCollection {
    /// Time between start of service and arrival.
    pub waiting_time: TimeIndependentCounter,
    /// Time spent in the server.
    pub service_time: TimeIndependentCounter,
    /// Waiting time plus service time.
    pub system_time: TimeIndependentCounter,
    /// Number of packets in the buffer over time.
    pub queue_length: TimeDependentCounter,
    /// 1 while the server is busy, 0 while idle.
    pub server_busy: TimeDependentCounter,
    /// Inter-arrival time vs waiting time.
    pub iat_waiting: CrossCorrelationCounter,
    /// Inter-arrival time vs service time.
    pub iat_service: CrossCorrelationCounter,
    /// Inter-arrival time vs system time.
    pub iat_system: CrossCorrelationCounter,
    /// Service time vs system time.
    pub service_system: CrossCorrelationCounter,
    /// Autocorrelation of consecutive waiting times.
    pub waiting_time_autocorrelation: AutocorrelationCounter,
}

impl CounterCollection {
    /// Create empty counters whose time windows start at t = 0.
    pub fn new(max_lag: usize) -> Self {
        Self {
            waiting_time: TimeIndependentCounter::new("waiting time"),
            service_time: TimeIndependentCounter::new("service time"),
            system_time: TimeIndependentCounter::new("system time"),
            queue_length: TimeDependentCounter::new("queue length"),
            server_busy: TimeDependentCounter::new("server busy"),
            iat_waiting: CrossCorrelationCounter::new("iat/waiting time"),
            iat_service: CrossCorrelationCounter::new("iat/service time"),
            iat_system: CrossCorrelationCounter::new("iat/system time"),
            service_system: CrossCorrelationCounter::new("service time/system time"),
            waiting_time_autocorrelation: AutocorrelationCounter::new(
                "waiting time autocorrelation",
                max_lag,
            ),
        }
    }

    /// Record the queue length and busy indicator that held until `now`.
    pub fn count_queue(&mut self, now: SimTime, state: &SystemState) -> Result<(), StatsError> {
        self.queue_length
            .count_value(state.queue_length() as f64, now)?;
        self.server_busy
            .count_value(if state.is_busy() { 1.0 } else { 0.0 }, now)?;
        Ok(())
    }

    /// Record the metrics of a packet that just completed service.
    ///
    /// Fails without recording anything if the packet has not completed.
    pub fn count_packet(&mut self, packet: &Packet) -> Result<(), StateError> {
        let waiting = packet.waiting_time()?;
        let service = packet.service_time()?;
        let system = packet.system_time()?;
        let iat = packet.interarrival_time();
        trace!(waiting, service, system, iat, "Counting packet");

        self.waiting_time.push(waiting);
        self.service_time.push(service);
        self.system_time.push(system);
        self.iat_waiting.push(iat, waiting);
        self.iat_service.push(iat, service);
        self.iat_system.push(iat, system);
        self.service_system.push(service, system);
        self.waiting_time_autocorrelation.push(waiting);
        Ok(())
    }

    /// Discard all samples and restart time windows at `now`.
    pub fn reset_at(&mut self, now: SimTime) {
        self.waiting_time.reset();
        self.service_time.reset();
        self.system_time.reset();
        self.queue_length.reset_at(now);
        self.server_busy.reset_at(now);
        self.iat_waiting.reset();
        self.iat_service.reset();
        self.iat_system.reset();
        self.service_system.reset();
        self.waiting_time_autocorrelation.reset();
    }

    /// Structured summary of every counter.
    pub fn report(&self) -> CollectionReport {
        CollectionReport {
            waiting_time: self.waiting_time.report(),
            service_time: self.service_time.report(),
            system_time: self.system_time.report(),
            queue_length: self.queue_length.report(),
            server_busy: self.server_busy.report(),
            iat_waiting: self.iat_waiting.report(),
            iat_service: self.iat_service.report(),
            iat_system: self.iat_system.report(),
            service_system: self.service_system.report(),
            waiting_time_autocorrelation: self.waiting_time_autocorrelation.report(),
        }
    }
}

/// Report of every counter in a [`CounterCollection`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub waiting_time: CounterReport,
    pub service_time: CounterReport,
    pub system_time: CounterReport,
    pub queue_length: CounterReport,
    pub server_busy: CounterReport,
    pub iat_waiting: CounterReport,
    pub iat_service: CounterReport,
    pub iat_system: CounterReport,
    pub service_system: CounterReport,
    pub waiting_time_autocorrelation: CounterReport,
}

impl CollectionReport {
    /// All reports in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = &CounterReport> {
        [
            &self.waiting_time,
            &self.service_time,
            &self.system_time,
            &self.queue_length,
            &self.server_busy,
            &self.iat_waiting,
            &self.iat_service,
            &self.iat_system,
            &self.service_system,
            &self.waiting_time_autocorrelation,
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_counters_weight_previous_state() {
        let mut counters = CounterCollection::new(2);
        let mut state = SystemState::new(2);

        // Idle on [0, 1)
        counters.count_queue(1.0, &state).unwrap();
        assert!(state.add_packet_to_server(1.0));
        // Busy, empty buffer on [1, 2)
        counters.count_queue(2.0, &state).unwrap();
        assert!(state.add_packet_to_queue(2.0));
        // Busy, one waiting on [2, 4)
        counters.count_queue(4.0, &state).unwrap();

        assert_eq!(counters.server_busy.mean(), Ok(0.75));
        assert_eq!(counters.queue_length.mean(), Ok(0.5));
    }

    #[test]
    fn test_count_packet_feeds_every_per_packet_counter() {
        let mut counters = CounterCollection::new(1);
        let mut state = SystemState::new(1);
        assert!(state.add_packet_to_server(0.0));
        assert!(state.add_packet_to_queue(1.0));
        let first = state.complete_service(2.0).unwrap();
        counters.count_packet(&first).unwrap();
        assert_eq!(state.start_service(2.0), Ok(true));
        let second = state.complete_service(5.0).unwrap();
        counters.count_packet(&second).unwrap();

        assert_eq!(counters.waiting_time.values(), &[0.0, 1.0]);
        assert_eq!(counters.service_time.values(), &[2.0, 3.0]);
        assert_eq!(counters.system_time.values(), &[2.0, 4.0]);
        assert_eq!(counters.iat_waiting.sample_count(), 2);
        assert_eq!(counters.waiting_time_autocorrelation.sample_count(), 2);
    }

    #[test]
    fn test_unfinished_packet_is_rejected() {
        let mut counters = CounterCollection::new(1);
        let mut state = SystemState::new(1);
        assert!(state.add_packet_to_server(0.0));

        let in_service = state.served_packet().unwrap().clone();
        assert_eq!(
            counters.count_packet(&in_service),
            Err(StateError::NotCompleted)
        );
        assert_eq!(
            counters.count_packet(&Packet::new(1.0, 1.0)),
            Err(StateError::NotServed)
        );
        assert_eq!(counters.waiting_time.sample_count(), 0);
        assert_eq!(counters.iat_waiting.sample_count(), 0);
    }

    #[test]
    fn test_reset_at_restarts_windows() {
        let mut counters = CounterCollection::new(1);
        let state = SystemState::new(1);
        counters.count_queue(3.0, &state).unwrap();
        counters.reset_at(3.0);
        counters.count_queue(5.0, &state).unwrap();
        assert_eq!(counters.queue_length.duration(), 2.0);
        assert_eq!(counters.waiting_time.sample_count(), 0);
    }

    #[test]
    fn test_report_covers_every_counter() {
        let counters = CounterCollection::new(3);
        let report = counters.report();
        assert_eq!(report.iter().count(), 10);
        assert!(report.iter().all(|r| r.samples == 0));
    }
}
