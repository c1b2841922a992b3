//! Customer records
//!
//! A customer carries the three timestamps of its lifecycle. Each one is written
//! at most once; a second write means the engine is broken, so it panics.

use serde::{Deserialize, Serialize};

use crate::types::CustomerId;

/// One customer passing through the queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Identity, unique within the run
    pub id: CustomerId,
    /// When the customer enters the system
    pub arrival_time: f64,
    /// When the customer enters the server
    pub service_start_time: Option<f64>,
    /// Departure time planned when service started, if it falls before the horizon
    pub scheduled_departure: Option<f64>,
    /// When the departure event was processed
    pub departure_time: Option<f64>,
}

impl Customer {
    /// Create a customer that has not been served yet
    pub fn new(id: CustomerId, arrival_time: f64) -> Self {
        assert!(arrival_time >= 0.0, "{} has negative arrival time {}", id, arrival_time);
        Self {
            id,
            arrival_time,
            service_start_time: None,
            scheduled_departure: None,
            departure_time: None,
        }
    }

    /// Record the moment the customer enters the server
    pub fn mark_service_start(&mut self, time: f64) {
        assert!(
            self.service_start_time.is_none(),
            "{} already started service at {:?}",
            self.id,
            self.service_start_time
        );
        assert!(
            time >= self.arrival_time,
            "{} cannot start service at {} before arriving at {}",
            self.id,
            time,
            self.arrival_time
        );
        self.service_start_time = Some(time);
    }

    /// Record the planned departure time
    pub fn mark_scheduled_departure(&mut self, time: f64) {
        assert!(
            self.scheduled_departure.is_none(),
            "{} already has a departure scheduled",
            self.id
        );
        self.scheduled_departure = Some(time);
    }

    /// Record the moment the customer leaves the system
    pub fn mark_departure(&mut self, time: f64) {
        assert!(self.departure_time.is_none(), "{} already departed", self.id);
        let service_start = self
            .service_start_time
            .unwrap_or_else(|| panic!("{} departs without a recorded service start", self.id));
        assert!(
            time >= service_start,
            "{} cannot depart at {} before service started at {}",
            self.id,
            time,
            service_start
        );
        self.departure_time = Some(time);
    }

    /// Time spent waiting in the queue, once service has started
    pub fn wait_time(&self) -> Option<f64> {
        self.service_start_time.map(|start| start - self.arrival_time)
    }

    /// Time spent being served, once departed
    pub fn service_time(&self) -> Option<f64> {
        match (self.service_start_time, self.departure_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Total time in the system, once departed
    pub fn system_time(&self) -> Option<f64> {
        self.departure_time.map(|end| end - self.arrival_time)
    }

    /// Whether the customer has entered service
    pub fn has_started_service(&self) -> bool {
        self.service_start_time.is_some()
    }

    /// Whether the customer has left the system
    pub fn has_departed(&self) -> bool {
        self.departure_time.is_some()
    }
}
