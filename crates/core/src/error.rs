//! Error types for packet and system state queries.

use thiserror::Error;

/// Precondition violations on packets and the server state machine.
///
/// These are recoverable: the caller asked too early (or in the wrong
/// state) and may simply try again later.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    /// Waiting time requested before the packet entered service.
    #[error("Packet has not been served yet")]
    NotServed,

    /// Service or system time requested before the packet completed.
    #[error("Packet is not completed yet")]
    NotCompleted,

    /// A service completion was requested while the server was idle.
    #[error("Server is idle, no packet to complete")]
    ServerIdle,

    /// A transition was requested with a time earlier than the packet's
    /// previous timestamp.
    #[error("Timestamp {time} precedes packet timestamp {previous}")]
    TimeReversal {
        /// The offending timestamp.
        time: f64,
        /// The timestamp it must not precede.
        previous: f64,
    },
}
