//! Per-tick snapshots handed to the driver

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::simulation::{RunStatistics, TimeSample};
use crate::types::RunPhase;

/// Reconstructible view of the queue at a point in logical time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Logical time (minutes)
    pub logical_time: f64,
    /// Customers in service plus waiting
    pub customers_in_system: usize,
    /// Customers waiting
    pub customers_in_queue: usize,
    /// Whether a customer is in service
    pub server_busy: bool,
}

impl RunState {
    /// State of an empty system at time zero
    pub fn initial() -> Self {
        Self { logical_time: 0.0, customers_in_system: 0, customers_in_queue: 0, server_busy: false }
    }

    /// Whether the in-system count agrees with queue length and occupancy
    pub fn is_consistent(&self) -> bool {
        self.customers_in_system == self.customers_in_queue + usize::from(self.server_busy)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:.4} in_system={} queued={} server={}",
            self.logical_time,
            self.customers_in_system,
            self.customers_in_queue,
            if self.server_busy { "busy" } else { "idle" }
        )
    }
}

/// Everything produced by one `tick`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Phase after the tick; `Complete` tells the driver to stop
    pub phase: RunPhase,
    /// Snapshot at the new logical time
    pub state: RunState,
    /// Cumulative statistics at the new logical time
    pub statistics: RunStatistics,
    /// One sample per event applied during this tick, in order
    pub samples: Vec<TimeSample>,
    /// Number of events applied during this tick
    pub events_applied: usize,
}

impl TickReport {
    /// Whether the driver should stop ticking
    pub fn is_complete(&self) -> bool {
        self.phase == RunPhase::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = RunState::initial();
        assert!(state.is_consistent());
        assert!(!state.server_busy);
        assert_eq!(state.to_string(), "t=0.0000 in_system=0 queued=0 server=idle");
    }

    #[test]
    fn test_consistency_check() {
        let state = RunState {
            logical_time: 1.0,
            customers_in_system: 3,
            customers_in_queue: 2,
            server_busy: true,
        };
        assert!(state.is_consistent());

        let broken = RunState { server_busy: false, ..state };
        assert!(!broken.is_consistent());
    }
}
