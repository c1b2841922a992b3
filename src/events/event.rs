//! Scheduled arrival and departure events
//!
//! This module contains the immutable event record drained by the scheduler.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{CustomerId, EventKind};

/// A pending state change at a point in logical time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Logical time (minutes) at which the event fires
    pub time: f64,
    /// Whether the customer arrives or departs
    pub kind: EventKind,
    /// Customer the event refers to
    pub customer: CustomerId,
}

impl Event {
    /// Create a new event
    pub fn new(time: f64, kind: EventKind, customer: CustomerId) -> Self {
        debug_assert!(time >= 0.0, "event time must be non-negative, got {}", time);
        Self { time, kind, customer }
    }

    /// Create an arrival event
    pub fn arrival(time: f64, customer: CustomerId) -> Self {
        Self::new(time, EventKind::Arrival, customer)
    }

    /// Create a departure event
    pub fn departure(time: f64, customer: CustomerId) -> Self {
        Self::new(time, EventKind::Departure, customer)
    }

    /// Check if this is an arrival
    pub fn is_arrival(&self) -> bool {
        self.kind == EventKind::Arrival
    }

    /// Check if this is a departure
    pub fn is_departure(&self) -> bool {
        self.kind == EventKind::Departure
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} at t={:.4}", self.kind, self.customer, self.time)
    }
}
