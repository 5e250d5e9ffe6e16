//! Deterministic simulation runner.
//!
//! This crate drives a single-server, finite-buffer queueing station through
//! simulated time. Given the same configuration and seeds, it produces
//! identical results every run.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                      Simulation                         │
//! │                                                         │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Event Queue (BinaryHeap<Reverse<EventKey>>)    │ │
//! │  │     Ordered by: time, priority, sequence           │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │ pop, check causality        │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     CounterCollection::count_queue(now, state)     │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     SystemState (server + FiniteQueue)             │ │
//! │  │     Arrival / ServiceCompletion / Termination      │ │
//! │  └────────────────────────┬───────────────────────────┘ │
//! │                           │                             │
//! │                           ▼                             │
//! │  ┌────────────────────────────────────────────────────┐ │
//! │  │     Draw from VariateStreams → schedule new events │ │
//! │  └────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────┘
//! ```

mod clock;
mod config;
mod counters;
mod error;
mod event_queue;
mod result;
mod rng;
mod runner;

pub use clock::SimulationClock;
pub use config::SimulationConfig;
pub use counters::{CollectionReport, CounterCollection};
pub use error::SimulationError;
pub use event_queue::{EventKey, EventQueue};
pub use result::SimulationResult;
pub use rng::{RandomVariateSource, VariateStreams};
pub use runner::{Simulation, SimulationStats};
