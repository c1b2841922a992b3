//! Server occupancy and the FIFO waiting line
//!
//! Holds identities only; customer records stay in the registry. At most one
//! customer is in service and it never also sits in the queue.

use std::collections::VecDeque;

use crate::types::CustomerId;

/// Single server plus its waiting line
#[derive(Debug, Clone, Default)]
pub struct ServerQueueState {
    occupant: Option<CustomerId>,
    queue: VecDeque<CustomerId>,
}

impl ServerQueueState {
    /// Create an idle server with an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a customer is in service
    pub fn is_busy(&self) -> bool {
        self.occupant.is_some()
    }

    /// Customer currently in service
    pub fn occupant(&self) -> Option<CustomerId> {
        self.occupant
    }

    /// Put a customer into service
    ///
    /// # Panics
    /// When the server is already occupied.
    pub fn occupy(&mut self, id: CustomerId) {
        if let Some(current) = self.occupant {
            panic!("cannot put {} into service: server is busy with {}", id, current);
        }
        debug_assert!(!self.queue.contains(&id), "{} is in service and in the queue", id);
        self.occupant = Some(id);
    }

    /// Free the server, returning whoever was in service
    pub fn release(&mut self) -> Option<CustomerId> {
        self.occupant.take()
    }

    /// Append a customer to the tail of the queue
    pub fn enqueue(&mut self, id: CustomerId) {
        debug_assert!(self.occupant != Some(id), "{} is already in service", id);
        debug_assert!(!self.queue.contains(&id), "{} is already queued", id);
        self.queue.push_back(id);
    }

    /// Remove and return the customer at the head of the queue
    pub fn dequeue_next(&mut self) -> Option<CustomerId> {
        self.queue.pop_front()
    }

    /// Customers in service plus customers waiting
    pub fn customers_in_system(&self) -> usize {
        usize::from(self.is_busy()) + self.queue.len()
    }

    /// Customers waiting
    pub fn customers_in_queue(&self) -> usize {
        self.queue.len()
    }

    /// Waiting customers, head first
    pub fn queued(&self) -> impl Iterator<Item = CustomerId> + '_ {
        self.queue.iter().copied()
    }

    /// Empty the server and the queue
    pub fn clear(&mut self) {
        self.occupant = None;
        self.queue.clear();
    }
}
