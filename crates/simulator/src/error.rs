//! Error types for the replication runner.

use qsim_simulation::SimulationError;
use qsim_stats::StatsError;
use thiserror::Error;

/// Errors while running or summarizing replications.
#[derive(Debug, Error)]
pub enum SimulatorError {
    /// At least one replication is required.
    #[error("No replications requested")]
    NoReplications,

    /// A replication failed.
    #[error("Replication {index} failed: {source}")]
    Replication {
        /// Index of the failed replication.
        index: u64,
        /// Underlying failure.
        #[source]
        source: SimulationError,
    },

    /// The simulation could not be built.
    #[error(transparent)]
    Simulation(#[from] SimulationError),

    /// Summary statistics could not be computed.
    #[error(transparent)]
    Stats(#[from] StatsError),
}
