//! Deterministic simulation runner.
//!
//! One [`Simulation`] owns the clock, the station, the event queue, both
//! random streams and the counters. Events are processed strictly one at a
//! time in `(timestamp, priority, sequence)` order.

use crate::event_queue::EventQueue;
use crate::rng::VariateStreams;
use crate::{CounterCollection, SimulationClock, SimulationConfig, SimulationError, SimulationResult};
use qsim_core::{EventKind, SimEvent, SystemState};
use qsim_stats::{BootstrapPolicy, ConfidenceInterval};
use rand::Rng;
use tracing::{debug, info, trace, warn};

/// Statistics collected during simulation.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SimulationStats {
    /// Total events processed.
    pub events_processed: u64,
    /// Events processed by kind, indexed by [`EventKind::index`].
    pub events_by_kind: [u64; 3],
    /// Arrivals that were put straight into service.
    pub served_immediately: u64,
    /// Arrivals that had to wait in the buffer.
    pub queued: u64,
    /// Largest number of pending events seen.
    pub peak_pending_events: usize,
}

impl SimulationStats {
    /// Arrivals processed.
    pub fn arrivals(&self) -> u64 {
        self.events_by_kind[EventKind::CustomerArrival.index()]
    }

    /// Service completions processed.
    pub fn completions(&self) -> u64 {
        self.events_by_kind[EventKind::ServiceCompletion.index()]
    }
}

/// How a run decides to stop.
#[derive(Debug, Clone, Copy)]
enum StopCondition {
    /// When the termination event fires.
    Termination,
    /// Once this many arrivals have been processed.
    PacketCount(u64),
}

/// Single-server finite-buffer station simulation.
///
/// Given the same configuration, produces identical results every run.
pub struct Simulation {
    config: SimulationConfig,
    clock: SimulationClock,
    state: SystemState,
    events: EventQueue,
    streams: VariateStreams,
    counters: CounterCollection,
    stats: SimulationStats,
    /// Every processed event, when enabled.
    event_trace: Option<Vec<SimEvent>>,
}

impl Simulation {
    /// Create a new simulation with the given configuration.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        if config.sim_time == 0.0 {
            warn!("Simulation horizon is zero; time-limited runs will stop immediately");
        }
        let streams = VariateStreams::new(config.service_rate(), config.seed_iat, config.seed_st)?;

        info!(
            buffer_size = config.buffer_size,
            rho = config.rho,
            sim_time = config.sim_time,
            seed_iat = config.seed_iat,
            seed_st = config.seed_st,
            "Created simulation"
        );

        Ok(Self {
            clock: SimulationClock::new(),
            state: SystemState::new(config.buffer_size),
            events: EventQueue::new(),
            streams,
            counters: CounterCollection::new(config.max_lag),
            stats: SimulationStats::default(),
            event_trace: None,
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Get the clock and packet counts.
    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Get the station state.
    pub fn state(&self) -> &SystemState {
        &self.state
    }

    /// Get the counters.
    pub fn counters(&self) -> &CounterCollection {
        &self.counters
    }

    /// Get simulation statistics.
    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Number of events waiting to be processed.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Record every processed event from now on.
    pub fn enable_event_trace(&mut self) {
        if self.event_trace.is_none() {
            self.event_trace = Some(Vec::new());
        }
    }

    /// Events processed since the trace was enabled or the last reset.
    pub fn event_trace(&self) -> Option<&[SimEvent]> {
        self.event_trace.as_deref()
    }

    /// Snapshot of the current packet counts and counters.
    pub fn result(&self) -> SimulationResult {
        SimulationResult::gather(&self.clock, &self.counters)
    }

    /// Run from t = 0 until the configured horizon.
    ///
    /// Schedules the first arrival at 0 and the termination at `sim_time`.
    /// Requires a fresh or reset simulation.
    pub fn run_to_time_limit(&mut self) -> Result<SimulationResult, SimulationError> {
        self.ensure_fresh()?;
        self.schedule_initial_event();
        self.events.insert(SimEvent::termination(self.config.sim_time));
        self.run(StopCondition::Termination)
    }

    /// Run until `n` arrivals have been processed.
    ///
    /// With `continue_from_previous_batch` the run picks up where the last one
    /// stopped: time, station state and pending events are kept, while packet
    /// counts and counters start over so the snapshot describes this batch
    /// alone. Otherwise the simulation must be fresh and the first arrival is
    /// scheduled at t = 0.
    pub fn run_to_packet_count_limit(
        &mut self,
        n: u64,
        continue_from_previous_batch: bool,
    ) -> Result<SimulationResult, SimulationError> {
        if continue_from_previous_batch {
            debug!(now = self.clock.now, pending = self.events.len(), "Starting new batch");
            self.clock.start_batch();
            self.counters.reset_at(self.clock.now);
        } else {
            self.ensure_fresh()?;
            self.schedule_initial_event();
        }
        self.run(StopCondition::PacketCount(n))
    }

    /// Reinitialize everything and restart both random streams from the
    /// configured seeds.
    pub fn reset(&mut self) -> Result<(), SimulationError> {
        self.streams = VariateStreams::new(
            self.config.service_rate(),
            self.config.seed_iat,
            self.config.seed_st,
        )?;
        self.reset_preserving_streams();
        Ok(())
    }

    /// Reinitialize everything but let the random streams carry on.
    ///
    /// Successive runs then form independent replications.
    pub fn reset_preserving_streams(&mut self) {
        debug!(now = self.clock.now, "Resetting simulation");
        self.clock = SimulationClock::new();
        self.state = SystemState::new(self.config.buffer_size);
        self.events.clear();
        self.counters = CounterCollection::new(self.config.max_lag);
        self.stats = SimulationStats::default();
        if let Some(trace) = self.event_trace.as_mut() {
            trace.clear();
        }
    }

    /// Install a new configuration and reset.
    pub fn reconfigure(&mut self, config: SimulationConfig) -> Result<(), SimulationError> {
        config.validate()?;
        debug!(
            buffer_size = config.buffer_size,
            rho = config.rho,
            "Reconfiguring simulation"
        );
        self.config = config;
        self.reset()
    }

    /// t-distribution confidence interval of the mean waiting time at the
    /// configured significance level.
    pub fn waiting_time_confidence_interval(&self) -> Result<ConfidenceInterval, SimulationError> {
        Ok(self
            .counters
            .waiting_time
            .confidence_interval(self.config.alpha)?)
    }

    /// Bootstrap confidence interval of the mean waiting time.
    pub fn waiting_time_bootstrap_interval<R: Rng>(
        &self,
        policy: BootstrapPolicy,
        rng: &mut R,
    ) -> Result<ConfidenceInterval, SimulationError> {
        Ok(self.counters.waiting_time.bootstrap_confidence_interval(
            self.config.alpha,
            self.config.resample_size,
            policy,
            rng,
        )?)
    }

    /// Insert the first arrival at the current time.
    fn schedule_initial_event(&mut self) {
        self.events.insert(SimEvent::arrival(self.clock.now));
    }

    fn ensure_fresh(&self) -> Result<(), SimulationError> {
        if self.clock.now > 0.0 || !self.events.is_empty() || self.stats.events_processed > 0 {
            return Err(SimulationError::AlreadyStarted {
                now: self.clock.now,
            });
        }
        Ok(())
    }

    fn run(&mut self, stop: StopCondition) -> Result<SimulationResult, SimulationError> {
        loop {
            if let StopCondition::PacketCount(n) = stop {
                if self.clock.packets_total >= n {
                    debug!(now = self.clock.now, packets = n, "Packet limit reached");
                    self.clock.stop = true;
                }
            }
            if self.clock.stop {
                break;
            }

            let event = self.events.remove_oldest(self.clock.now)?;
            self.process_event(event)?;
        }

        let result = self.result();
        info!(
            final_time = result.final_time,
            packets_total = result.packets_total,
            packets_dropped = result.packets_dropped,
            blocking_probability = result.blocking_probability,
            events_processed = self.stats.events_processed,
            "Run finished"
        );
        Ok(result)
    }

    /// Advance the clock to `event` and dispatch it.
    fn process_event(&mut self, event: SimEvent) -> Result<(), SimulationError> {
        if event.timestamp < self.clock.now {
            return Err(SimulationError::CausalityViolation {
                now: self.clock.now,
                event_time: event.timestamp,
            });
        }
        self.clock.now = event.timestamp;
        self.counters.count_queue(self.clock.now, &self.state)?;

        trace!(time = event.timestamp, kind = event.kind.type_name(), "Processing event");

        self.stats.events_processed += 1;
        self.stats.events_by_kind[event.kind.index()] += 1;
        self.stats.peak_pending_events = self.stats.peak_pending_events.max(self.events.len());
        if let Some(trace) = self.event_trace.as_mut() {
            trace.push(event);
        }

        match event.kind {
            EventKind::CustomerArrival => self.on_arrival(),
            EventKind::ServiceCompletion => self.on_service_completion(),
            EventKind::Termination => {
                debug!(now = self.clock.now, "Time limit reached");
                self.clock.stop = true;
                Ok(())
            }
        }
    }

    fn on_arrival(&mut self) -> Result<(), SimulationError> {
        let now = self.clock.now;
        let next = now + self.streams.next_interarrival();
        self.events.insert(SimEvent::arrival(next));

        if self.state.add_packet_to_server(now) {
            let done = now + self.streams.next_service();
            self.events.insert(SimEvent::service_completion(done));
            self.clock.packet_accepted();
            self.stats.served_immediately += 1;
        } else if self.state.add_packet_to_queue(now) {
            self.clock.packet_accepted();
            self.stats.queued += 1;
        } else {
            trace!(time = now, queue_length = self.state.queue_length(), "Packet dropped");
            self.clock.packet_dropped();
        }
        Ok(())
    }

    fn on_service_completion(&mut self) -> Result<(), SimulationError> {
        let now = self.clock.now;
        let packet = self.state.complete_service(now)?;
        self.counters.count_packet(&packet)?;
        self.clock.packet_completed();

        if self.state.start_service(now)? {
            let done = now + self.streams.next_service();
            self.events.insert(SimEvent::service_completion(done));
        }
        Ok(())
    }

    #[cfg(test)]
    fn schedule(&mut self, event: SimEvent) {
        self.events.insert(event);
    }
}
