//! Core types for the queueing station simulation.
//!
//! This crate holds the pieces of the model that do not depend on random
//! numbers or on a clock of their own:
//!
//! - [`SimEvent`]: a scheduled event (arrival, service completion, termination)
//! - [`Packet`]: one customer moving through the station
//! - [`FiniteQueue`]: the bounded FIFO waiting buffer
//! - [`SystemState`]: the server + buffer state machine
//!
//! Every transition takes the current simulated time as an argument. The
//! runner owns the clock and passes `now` down, so the same inputs always
//! produce the same state.

mod error;
mod event;
mod packet;
mod queue;
mod state;

pub use error::StateError;
pub use event::{EventKind, EventPriority, SimEvent};
pub use packet::{Packet, PacketStatus};
pub use queue::FiniteQueue;
pub use state::SystemState;

/// Simulated time, in abstract time units.
pub type SimTime = f64;
