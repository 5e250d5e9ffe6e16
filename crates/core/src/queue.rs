//! Bounded FIFO waiting buffer.

use crate::Packet;
use std::collections::VecDeque;

/// FIFO buffer holding at most `capacity` packets.
///
/// A full buffer refuses new packets; the caller counts that as a drop.
#[derive(Debug, Clone)]
pub struct FiniteQueue {
    packets: VecDeque<Packet>,
    capacity: usize,
}

impl FiniteQueue {
    /// Create an empty buffer with room for `capacity` packets.
    pub fn new(capacity: usize) -> Self {
        Self {
            packets: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a packet. Returns false (and discards it) if the buffer is full.
    pub fn add(&mut self, packet: Packet) -> bool {
        if self.is_full() {
            return false;
        }
        self.packets.push_back(packet);
        true
    }

    /// Remove the packet at the head of the buffer.
    pub fn remove(&mut self) -> Option<Packet> {
        self.packets.pop_front()
    }

    /// Number of waiting packets.
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Check if the buffer cannot accept another packet.
    pub fn is_full(&self) -> bool {
        self.packets.len() >= self.capacity
    }

    /// Configured capacity `S`.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
