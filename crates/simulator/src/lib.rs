//! Queueing station simulator.
//!
//! Builds on `qsim-simulation` to provide:
//!
//! - **Replications**: independent runs with derived seeds, spread over cores
//!   with rayon and summarized with confidence intervals
//! - **Reports**: boxed console summaries and serde-serializable reports
//!
//! # Example
//!
//! ```ignore
//! use qsim_simulation::SimulationConfig;
//! use qsim_simulator::run_replications;
//!
//! let config = SimulationConfig::new(4).with_rho(0.9);
//! let summary = run_replications(&config, 10)?;
//! summary.print_summary();
//! ```

mod error;
mod replications;
mod report;

pub use error::SimulatorError;
pub use replications::{
    derive_seed, replication_config, run_replications, run_replications_with, ReplicationSummary,
    RunMode, SeedStream,
};
pub use report::RunReport;
