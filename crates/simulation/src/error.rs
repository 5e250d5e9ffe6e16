//! Error types for simulation runs.

use qsim_core::{SimTime, StateError};
use qsim_stats::StatsError;
use thiserror::Error;

/// Errors raised while configuring or running a simulation.
///
/// `CausalityViolation` and `EmptyEventQueue` are fatal for the current run.
/// The instance stays usable after `reset()`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// An event was scheduled before the current simulated time.
    #[error("Event at {event_time} is earlier than current time {now}")]
    CausalityViolation {
        /// Clock time when the event was popped.
        now: SimTime,
        /// Timestamp of the offending event.
        event_time: SimTime,
    },

    /// The event queue ran dry before the run was stopped.
    #[error("Event queue is empty at time {now}")]
    EmptyEventQueue {
        /// Clock time when the queue was found empty.
        now: SimTime,
    },

    /// A fresh run was requested on a simulation that already ran.
    #[error("Simulation already started at time {now}; reset it first")]
    AlreadyStarted {
        /// Clock time of the existing run.
        now: SimTime,
    },

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Distribution parameters were rejected.
    #[error("Invalid distribution: {0}")]
    InvalidDistribution(String),

    /// A packet or server transition was invalid.
    #[error(transparent)]
    State(#[from] StateError),

    /// A statistics counter rejected a sample.
    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl SimulationError {
    /// Check if this error aborts the current run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SimulationError::CausalityViolation { .. } | SimulationError::EmptyEventQueue { .. }
        )
    }
}
