//! Simulation engine and its supporting services
//!
//! This module contains the tick-driven controller together with variate
//! generation, statistics, the time-series trace, reporting, error handling
//! and logging setup.
//!
//! # Overview
//!
//! - **SimulationController**: owns a run and applies due events on every tick
//! - **VariateGenerator**: seeded exponential samples for gaps and service times
//! - **RunStatistics**: cumulative totals and the averages derived from them
//! - **TimeSeries / TraceSink**: per-event samples of the number in system
//! - **RunReport**: end-of-run summary rendered as text or JSON
//! - **SimulationError**: recoverable errors surfaced to the driver
//!
//! # Usage Example
//!
//! ```rust
//! use mm1_queue_simulator::simulation::*;
//! use mm1_queue_simulator::types::*;
//!
//! let params = QueueParameters::new(3.0, 4.0, 60.0);
//! let mut controller: SimulationController = SimulationController::new(params, Some(42), 1_000);
//!
//! controller.start().unwrap();
//! let tick = controller.tick(0.1).unwrap();
//! assert!(tick.state.is_consistent());
//!
//! let report = controller.run_to_completion(0.1).unwrap();
//! assert_eq!(report.phase, RunPhase::Complete);
//! assert!(report.statistics.total_arrived >= report.statistics.total_served);
//! ```

pub mod controller;
pub mod error;
pub mod logging;
pub mod report;
pub mod state;
pub mod statistics;
pub mod trace;
pub mod variate;

// Re-export all public types for convenience
pub use controller::*;
pub use error::*;
pub use logging::*;
pub use report::*;
pub use state::*;
pub use statistics::*;
pub use trace::*;
pub use variate::*;
